use crate::config::MailConfig;
use crate::domain::model::OutboundEmail;
use crate::domain::ports::EmailSender;
use crate::utils::error::{EnquiryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 透過 Resend HTTP API 寄信
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl ResendMailer {
    pub fn new(client: Client, api_key: &str, api_base: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            endpoint: format!("{}/emails", api_base.trim_end_matches('/')),
        }
    }

    /// 行程啟動時建立一次，連線池在請求之間共用
    pub fn from_config(config: &MailConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self::new(client, &config.api_key, &config.api_base))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmailSender for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        tracing::debug!("Posting email to: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Email API response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EnquiryError::EmailDeliveryError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
