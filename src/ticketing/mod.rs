use thiserror::Error;

pub mod identity;
pub mod pipeline;
pub mod qr;
pub mod render;

pub use pipeline::{PipelineState, TicketDownload, TicketForm, TicketPipeline};
pub use render::{RenderOptions, RenderedTicket};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    /// Invalid form input. The message is the user-facing prompt; form state
    /// is kept so the visitor can correct and resubmit.
    #[error("{0}")]
    InvalidInput(&'static str),

    /// QR encoding failed. Retryable; the entered form data survives.
    #[error("QR encoding failed: {0}")]
    Encoding(String),

    #[error("Ticket rendering failed: {0}")]
    Render(String),

    #[error("No ticket ready to {0}")]
    InvalidState(&'static str),
}
