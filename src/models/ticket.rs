use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::category::{Gender, TicketCategory};
use crate::pricing::PriceTable;
use crate::ticketing::identity;

/// One issued visitor ticket. Built exactly once at form submission and
/// immutable afterwards; it exists only for the current session and the
/// rendered artwork, and is never persisted server-side.
///
/// The serialized form is the QR payload, so the field names follow the
/// wire contract of the scanning side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    #[serde(rename = "ticketId")]
    pub id: String,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    #[serde(rename = "ticketType")]
    pub category: TicketCategory,
    pub price: f64,
    pub visit_date: NaiveDate,
    pub purchase_date: DateTime<Utc>,
    pub valid_until: NaiveDate,
}

impl TicketRecord {
    /// Issues a ticket: generates the ID, copies the unit price out of the
    /// schedule, and stamps the purchase instant and validity window.
    pub fn issue(
        name: String,
        age: u8,
        gender: Gender,
        category: TicketCategory,
        visit_date: NaiveDate,
        prices: &PriceTable,
    ) -> Self {
        let purchase_date = Utc::now();
        let valid_until = identity::validity_window(purchase_date.date_naive());
        Self {
            id: identity::generate_id(),
            name,
            age,
            gender,
            category,
            price: prices.price_of(category),
            visit_date,
            purchase_date,
            valid_until,
        }
    }

    /// Download file name for the rendered artwork.
    pub fn file_name(&self) -> String {
        format!("zoo-ticket-{}.png", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TicketRecord {
        TicketRecord::issue(
            "Mara Keller".to_string(),
            34,
            Gender::Female,
            TicketCategory::Adult,
            Utc::now().date_naive(),
            &PriceTable::default(),
        )
    }

    #[test]
    fn test_issue_copies_unit_price_from_schedule() {
        let record = sample();
        assert_eq!(record.price, 30.0);
    }

    #[test]
    fn test_validity_is_three_months_after_purchase() {
        let record = sample();
        let expected = identity::validity_window(record.purchase_date.date_naive());
        assert_eq!(record.valid_until, expected);
    }

    #[test]
    fn test_qr_payload_field_names() {
        let record = sample();
        let payload = serde_json::to_value(&record).unwrap();
        for key in [
            "ticketId",
            "name",
            "age",
            "gender",
            "ticketType",
            "price",
            "visitDate",
            "purchaseDate",
            "validUntil",
        ] {
            assert!(payload.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(payload["ticketType"], "adult");
    }

    #[test]
    fn test_download_file_name() {
        let record = sample();
        assert_eq!(record.file_name(), format!("zoo-ticket-{}.png", record.id));
    }
}
