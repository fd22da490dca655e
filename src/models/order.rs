use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::TicketCategory;

/// Multiplier applied to the subtotal of a school group order. Shared by the
/// form's running-total display and the service's authoritative computation,
/// with the service result taking precedence on any disagreement.
pub const GROUP_DISCOUNT_MULTIPLIER: f64 = 0.8;

/// One ordered position of a school group order.
///
/// The type travels as a plain string on the wire; the group form only ever
/// produces the four known categories, but the service stores what it was
/// sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "type")]
    pub ticket_type: String,
    pub quantity: u32,
    pub price: f64,
}

impl LineItem {
    pub fn new(category: TicketCategory, quantity: u32, price: f64) -> Self {
        Self {
            ticket_type: category.as_str().to_string(),
            quantity,
            price,
        }
    }
}

/// Request body of `POST /api/school-orders`. Missing fields deserialize to
/// their defaults and are rejected by the handler's validation, mirroring
/// the behavior of the service this replaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolOrderRequest {
    #[serde(default)]
    pub school_name: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub tickets: Vec<LineItem>,
}

impl SchoolOrderRequest {
    pub fn subtotal(&self) -> f64 {
        self.tickets
            .iter()
            .map(|item| f64::from(item.quantity) * item.price)
            .sum()
    }

    pub fn discounted_total(&self) -> f64 {
        self.subtotal() * GROUP_DISCOUNT_MULTIPLIER
    }
}

/// Success body of `POST /api/school-orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolOrderResponse {
    pub success: bool,
    pub invoice_number: String,
    pub total: f64,
}

/// A persisted school order. Owned exclusively by the order service; clients
/// only ever see the echoed invoice number and total.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SchoolOrderRecord {
    pub id: i64,
    pub school_name: String,
    pub contact_email: String,
    pub total_amount: f64,
    pub invoice_number: String,
    pub created_at: DateTime<Utc>,
}
