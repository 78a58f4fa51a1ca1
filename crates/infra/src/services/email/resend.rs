use super::{DeliveryFailure, IEmailGateway};
use crate::config::EmailConfig;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

/// Sends emails through the Resend HTTP api
pub struct ResendEmailGateway {
    client: Client,
    config: EmailConfig,
}

impl ResendEmailGateway {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[async_trait::async_trait]
impl IEmailGateway for ResendEmailGateway {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), DeliveryFailure> {
        let api_key = match &self.config.api_key {
            Some(key) => key,
            None => return Err(DeliveryFailure::NotConfigured),
        };
        if to.trim().is_empty() {
            return Err(DeliveryFailure::MissingRecipient);
        }

        let body = SendEmailRequest {
            from: &self.config.from,
            to,
            subject,
            html,
        };
        let res = match self
            .client
            .post(&format!(
                "{}/emails",
                self.config.api_url.trim_end_matches('/')
            ))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!(
                    "[Network Error] Resend API POST error. Error message: {:?}",
                    e
                );
                return Err(DeliveryFailure::Network(e.to_string()));
            }
        };

        let status = res.status();
        if status.is_success() {
            info!("Reminder email accepted by Resend for: {}", to);
            return Ok(());
        }
        let message = res.text().await.unwrap_or_default();
        error!(
            "[Unexpected Response] Resend API POST error. Status: {}. Body: {}",
            status, message
        );
        Err(DeliveryFailure::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
