mod inmemory;
mod resend;

pub use inmemory::{InMemoryEmailGateway, SentEmail};
pub use resend::ResendEmailGateway;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryFailure {
    #[error("No recipient address")]
    MissingRecipient,
    #[error("Email provider is not configured")]
    NotConfigured,
    #[error("Unable to reach the email provider: {0}")]
    Network(String),
    #[error("Email provider rejected the message with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Capability to deliver a rendered email.
///
/// Implementations report every problem as a `DeliveryFailure` and never
/// panic, a failed delivery is an expected outcome for the caller.
#[async_trait::async_trait]
pub trait IEmailGateway: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), DeliveryFailure>;
}
