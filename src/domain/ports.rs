use crate::domain::model::OutboundEmail;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 寄送通知郵件的外部服務
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}
