use super::{DeliveryFailure, IEmailGateway};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Keeps delivered emails in memory instead of sending them
pub struct InMemoryEmailGateway {
    outbox: Mutex<Vec<SentEmail>>,
    failing: AtomicBool,
}

impl InMemoryEmailGateway {
    pub fn new() -> Self {
        Self {
            outbox: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// When set, every following delivery fails
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.outbox.lock().unwrap().clone()
    }
}

impl Default for InMemoryEmailGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEmailGateway for InMemoryEmailGateway {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), DeliveryFailure> {
        // Suspend like a real network call would
        tokio::task::yield_now().await;

        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryFailure::Rejected {
                status: 503,
                message: "In memory gateway is set to fail".into(),
            });
        }
        if to.trim().is_empty() {
            return Err(DeliveryFailure::MissingRecipient);
        }
        self.outbox.lock().unwrap().push(SentEmail {
            to: to.into(),
            subject: subject.into(),
            html: html.into(),
        });
        Ok(())
    }
}
