use thiserror::Error;

pub mod client;
pub mod form;
pub mod invoice;

pub use client::{OrderServiceClient, SubmitOrder};
pub use form::{GroupOrderForm, OrderConfirmation};
pub use invoice::printable_invoice;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Validation failure before anything is sent. The message is the
    /// user-facing prompt.
    #[error("{0}")]
    InvalidInput(&'static str),

    /// The request never completed. Not retried automatically; the form
    /// keeps its state for resubmission.
    #[error("Order submission failed: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("Order service rejected the request (status {status})")]
    Service { status: u16, message: String },
}
