// Adapters layer: concrete implementations for external systems (email provider, http server, lambda).

pub mod http;
pub mod lambda;
pub mod resend;

use crate::config::AppConfig;
use crate::core::handler::EnquiryHandler;
use crate::utils::error::Result;
use resend::ResendMailer;

/// 依設定組出 handler：有郵件設定時接上 Resend，否則只回應不寄信
pub fn build_handler(config: &AppConfig) -> Result<EnquiryHandler> {
    let handler = EnquiryHandler::new(config.site.clone());
    match &config.mail {
        Some(mail) => {
            let mailer = ResendMailer::from_config(mail)?;
            tracing::info!("📧 Email dispatch enabled (to: {})", mail.to);
            Ok(handler.with_sender(mailer, &mail.from, &mail.to))
        }
        None => {
            tracing::warn!("Email dispatch disabled: RESEND_API_KEY or ENQUIRY_TO_EMAIL not set");
            Ok(handler)
        }
    }
}
