use std::collections::BTreeMap;

use chrono::Local;
use tracing::info;

use crate::models::category::TicketCategory;
use crate::models::order::{LineItem, SchoolOrderRequest, SchoolOrderResponse};
use crate::orders::{invoice, OrderError, SubmitOrder};
use crate::pricing::PriceTable;

/// What the user gets back after a confirmed order: the service's response
/// and the print-ready invoice document.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    pub response: SchoolOrderResponse,
    pub invoice_html: String,
}

/// The school group form: one quantity counter per category plus school
/// name and contact email. Every counter change recomputes the discounted
/// running total; submission validates, sends once, and resets on success.
#[derive(Debug, Clone)]
pub struct GroupOrderForm {
    prices: PriceTable,
    school_name: String,
    contact_email: String,
    quantities: BTreeMap<TicketCategory, u32>,
}

impl GroupOrderForm {
    pub fn new(prices: PriceTable) -> Self {
        let quantities = TicketCategory::ALL.into_iter().map(|c| (c, 0)).collect();
        Self {
            prices,
            school_name: String::new(),
            contact_email: String::new(),
            quantities,
        }
    }

    pub fn set_school_name(&mut self, name: impl Into<String>) {
        self.school_name = name.into();
    }

    pub fn set_contact_email(&mut self, email: impl Into<String>) {
        self.contact_email = email.into();
    }

    pub fn school_name(&self) -> &str {
        &self.school_name
    }

    pub fn quantity(&self, category: TicketCategory) -> u32 {
        self.quantities.get(&category).copied().unwrap_or(0)
    }

    /// Unbounded upward.
    pub fn increment(&mut self, category: TicketCategory) -> u32 {
        let count = self.quantities.entry(category).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Floors at zero.
    pub fn decrement(&mut self, category: TicketCategory) -> u32 {
        let count = self.quantities.entry(category).or_insert(0);
        *count = count.saturating_sub(1);
        *count
    }

    pub fn set_quantity(&mut self, category: TicketCategory, quantity: u32) {
        self.quantities.insert(category, quantity);
    }

    pub fn subtotal(&self) -> f64 {
        self.quantities
            .iter()
            .map(|(category, quantity)| f64::from(*quantity) * self.prices.price_of(*category))
            .sum()
    }

    /// Client-side estimate of the discounted total; the service's figure
    /// is authoritative once the order is confirmed.
    pub fn total(&self) -> f64 {
        self.to_request().discounted_total()
    }

    /// Running total as shown next to the counters.
    pub fn display_total(&self) -> String {
        format!("CHF {:.2} (20% discount applied)", self.total())
    }

    /// First failure wins: no tickets selected, then missing school name.
    pub fn validate(&self) -> Result<(), OrderError> {
        if !self.quantities.values().any(|q| *q > 0) {
            return Err(OrderError::InvalidInput(
                "Please select at least one ticket",
            ));
        }
        if self.school_name.trim().is_empty() {
            return Err(OrderError::InvalidInput("Please enter a school name"));
        }
        Ok(())
    }

    /// Line items in category order, zero quantities included, exactly as
    /// the counters read.
    pub fn to_request(&self) -> SchoolOrderRequest {
        let tickets = TicketCategory::ALL
            .into_iter()
            .map(|category| {
                LineItem::new(category, self.quantity(category), self.prices.price_of(category))
            })
            .collect();
        SchoolOrderRequest {
            school_name: self.school_name.clone(),
            contact_email: self.contact_email.clone(),
            tickets,
        }
    }

    /// Validates and sends the order once. On any failure the form keeps its
    /// state for resubmission; on success it resets to a blank form and
    /// returns the service's confirmation with the printable invoice.
    pub async fn submit(
        &mut self,
        service: &impl SubmitOrder,
    ) -> Result<OrderConfirmation, OrderError> {
        self.validate()?;
        let request = self.to_request();
        let response = service.submit(&request).await?;
        info!(
            invoice = %response.invoice_number,
            total = response.total,
            "School order confirmed"
        );
        let invoice_html =
            invoice::printable_invoice(&response, &self.school_name, Local::now().date_naive());
        self.reset();
        Ok(OrderConfirmation {
            response,
            invoice_html,
        })
    }

    /// Back to a blank form: zero counters, empty fields.
    pub fn reset(&mut self) {
        self.school_name.clear();
        self.contact_email.clear();
        for quantity in self.quantities.values_mut() {
            *quantity = 0;
        }
    }
}
