use crate::config::SiteConfig;
use crate::core::notification;
use crate::core::response::{ApiResponse, HandlerResponse};
use crate::domain::model::{Enquiry, Submission};
use crate::domain::ports::EmailSender;
use crate::utils::error::{EnquiryError, Result};
use crate::utils::validation::build_enquiry;
use chrono::Utc;
use tracing::Instrument;

pub const SUCCESS_MESSAGE: &str =
    "Thank you. We have received your enquiry and will be in touch shortly.";
pub const HONEYPOT_MESSAGE: &str = "Thanks.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed. Use POST.";
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Something went wrong on our side. Please try again later.";

/// 請求 body：尚未解析的原始位元組，或已經是結構化的 JSON
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Raw(Vec<u8>),
    Structured(serde_json::Value),
}

impl RequestBody {
    pub fn into_submission(self) -> Result<Submission> {
        let value = match self {
            RequestBody::Raw(bytes) => serde_json::from_slice(&bytes)?,
            RequestBody::Structured(value) => value,
        };
        Submission::from_json(value)
    }
}

impl From<&str> for RequestBody {
    fn from(value: &str) -> Self {
        RequestBody::Raw(value.as_bytes().to_vec())
    }
}

struct MailDispatch {
    sender: Box<dyn EmailSender>,
    from: String,
    to: String,
}

/// 處理單一詢問表單請求：method 檢查 → 解析 → 蜜罐 → 驗證 → 寄信 → 回應
pub struct EnquiryHandler {
    site: SiteConfig,
    dispatch: Option<MailDispatch>,
}

impl EnquiryHandler {
    pub fn new(site: SiteConfig) -> Self {
        Self {
            site,
            dispatch: None,
        }
    }

    pub fn with_sender<S>(mut self, sender: S, from: &str, to: &str) -> Self
    where
        S: EmailSender + 'static,
    {
        self.dispatch = Some(MailDispatch {
            sender: Box::new(sender),
            from: from.to_string(),
            to: to.to_string(),
        });
        self
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn dispatch_enabled(&self) -> bool {
        self.dispatch.is_some()
    }

    /// 永遠回傳一個回應；所有錯誤在此轉成對應的 HTTP 狀態
    pub async fn handle(&self, method: &str, body: RequestBody) -> HandlerResponse {
        let span = tracing::info_span!("enquiry", method = %method);

        match self.process(method, body).instrument(span).await {
            Ok(response) => response,
            Err(e) => error_response(e),
        }
    }

    async fn process(&self, method: &str, body: RequestBody) -> Result<HandlerResponse> {
        if method.eq_ignore_ascii_case("OPTIONS") {
            return Ok(HandlerResponse::no_content());
        }
        if !method.eq_ignore_ascii_case("POST") {
            return Err(EnquiryError::MethodNotAllowed {
                method: method.to_string(),
            });
        }

        let submission = body.into_submission()?;

        if submission.is_spam() {
            tracing::info!("Honeypot triggered, dropping submission");
            return Ok(HandlerResponse::json(200, ApiResponse::ok(HONEYPOT_MESSAGE)));
        }

        let enquiry =
            build_enquiry(&submission, Utc::now()).map_err(EnquiryError::ValidationError)?;

        self.notify(&enquiry).await;

        Ok(HandlerResponse::json(200, ApiResponse::ok(SUCCESS_MESSAGE)))
    }

    /// 寄信失敗只記錄，不影響回應
    async fn notify(&self, enquiry: &Enquiry) {
        let Some(dispatch) = &self.dispatch else {
            tracing::debug!("Email dispatch disabled; enquiry not forwarded");
            return;
        };

        let email = notification::compose(&self.site.name, &dispatch.from, &dispatch.to, enquiry);

        match dispatch.sender.send(&email).await {
            Ok(()) => tracing::info!("✅ Enquiry forwarded to {}", dispatch.to),
            Err(e) => tracing::error!("❌ Failed to send enquiry email: {}", e),
        }
    }
}

/// 錯誤轉成回應：405 / 400 照實回報，其餘一律 500 且不洩漏細節
pub fn error_response(error: EnquiryError) -> HandlerResponse {
    match error {
        EnquiryError::MethodNotAllowed { method } => {
            tracing::debug!("Rejected method {:?}", method);
            HandlerResponse::method_not_allowed(METHOD_NOT_ALLOWED_MESSAGE)
        }
        EnquiryError::ValidationError(errors) => {
            tracing::info!("Enquiry rejected, {}", errors);
            HandlerResponse::json(400, ApiResponse::invalid(errors))
        }
        e => {
            tracing::error!("❌ Enquiry handling failed: {}", e);
            HandlerResponse::json(e.status_code(), ApiResponse::error(INTERNAL_ERROR_MESSAGE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::OutboundEmail;
    use crate::utils::validation::{EMAIL_REQUIRED, NAME_REQUIRED};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSender {
        sent: Arc<Mutex<Vec<OutboundEmail>>>,
    }

    #[async_trait]
    impl EmailSender for RecordingSender {
        async fn send(&self, email: &OutboundEmail) -> Result<()> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    struct FailingSender;

    #[async_trait]
    impl EmailSender for FailingSender {
        async fn send(&self, _email: &OutboundEmail) -> Result<()> {
            Err(EnquiryError::EmailDeliveryError {
                status: 503,
                message: "provider down".to_string(),
            })
        }
    }

    fn valid_json() -> serde_json::Value {
        serde_json::json!({
            "name": "Jo",
            "email": "jo@x.com",
            "role": "tenant",
            "message": "I am interested in leasing space.",
            "source_page": "/contact"
        })
    }

    fn valid_body() -> RequestBody {
        RequestBody::Structured(valid_json())
    }

    fn site() -> SiteConfig {
        SiteConfig {
            name: "Harbour Quay".to_string(),
        }
    }

    #[tokio::test]
    async fn test_valid_submission_without_mail_config() {
        let handler = EnquiryHandler::new(site());
        let response = handler.handle("POST", valid_body()).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.body, Some(ApiResponse::ok(SUCCESS_MESSAGE)));
    }

    #[tokio::test]
    async fn test_valid_submission_sends_email() {
        let sender = RecordingSender::default();
        let handler = EnquiryHandler::new(site()).with_sender(
            sender.clone(),
            "Harbour Quay <onboarding@resend.dev>",
            "leasing@example.com",
        );

        let response = handler.handle("post", valid_body()).await;
        assert_eq!(response.status, 200);

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "New Harbour Quay enquiry – tenant – Jo");
        assert_eq!(sent[0].to, "leasing@example.com");
        assert!(sent[0].text.contains("Source page: /contact"));
    }

    #[tokio::test]
    async fn test_email_failure_does_not_change_response() {
        let handler = EnquiryHandler::new(site()).with_sender(
            FailingSender,
            "Harbour Quay <onboarding@resend.dev>",
            "leasing@example.com",
        );

        let response = handler.handle("POST", valid_body()).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, Some(ApiResponse::ok(SUCCESS_MESSAGE)));
    }

    #[tokio::test]
    async fn test_honeypot_short_circuits() {
        let sender = RecordingSender::default();
        let handler =
            EnquiryHandler::new(site()).with_sender(sender.clone(), "a@b.com", "c@d.com");

        let body = RequestBody::Structured(serde_json::json!({
            "name": "A",
            "honeypot": "  buy now  "
        }));
        let response = handler.handle("POST", body).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.body, Some(ApiResponse::ok(HONEYPOT_MESSAGE)));
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_string_honeypot_short_circuits() {
        let sender = RecordingSender::default();
        let handler =
            EnquiryHandler::new(site()).with_sender(sender.clone(), "a@b.com", "c@d.com");

        for honeypot in [serde_json::json!(1), serde_json::json!(true)] {
            let mut body = valid_json();
            body["honeypot"] = honeypot;

            let response = handler.handle("POST", RequestBody::Structured(body)).await;
            assert_eq!(response.status, 200);
            assert_eq!(response.body, Some(ApiResponse::ok(HONEYPOT_MESSAGE)));
        }
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_honeypot_is_ignored() {
        let body = RequestBody::Structured(serde_json::json!({
            "name": "A",
            "honeypot": "   "
        }));
        let response = EnquiryHandler::new(site()).handle("POST", body).await;
        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn test_validation_failure_lists_fields() {
        let sender = RecordingSender::default();
        let handler =
            EnquiryHandler::new(site()).with_sender(sender.clone(), "a@b.com", "c@d.com");

        let body = RequestBody::from(
            r#"{"name":"A","email":"bad","role":"x","message":"hi"}"#,
        );
        let response = handler.handle("POST", body).await;

        assert_eq!(response.status, 400);
        let errors = response.body.unwrap().errors.unwrap();
        assert_eq!(
            errors.fields(),
            vec!["email", "message", "name", "role", "source_page"]
        );
        assert_eq!(errors.get("name"), Some(NAME_REQUIRED));
        assert_eq!(errors.get("email"), Some(EMAIL_REQUIRED));
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_options_preflight() {
        let response = EnquiryHandler::new(site())
            .handle("OPTIONS", RequestBody::Raw(Vec::new()))
            .await;
        assert_eq!(response.status, 204);
        assert!(response.body.is_none());
    }

    #[tokio::test]
    async fn test_other_methods_rejected() {
        for method in ["GET", "PUT", "DELETE", "PATCH", "HEAD"] {
            let response = EnquiryHandler::new(site())
                .handle(method, RequestBody::Raw(Vec::new()))
                .await;
            assert_eq!(response.status, 405);
            assert_eq!(response.header("Allow"), Some("POST, OPTIONS"));
            assert_eq!(
                response.body,
                Some(ApiResponse::error(METHOD_NOT_ALLOWED_MESSAGE))
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_generic_500() {
        let handler = EnquiryHandler::new(site());

        for body in ["{not json", "", "[1,2,3]", "null"] {
            let response = handler.handle("POST", RequestBody::from(body)).await;
            assert_eq!(response.status, 500);
            assert_eq!(
                response.body,
                Some(ApiResponse::error(INTERNAL_ERROR_MESSAGE))
            );
        }
    }

    #[test]
    fn test_internal_error_response_is_generic() {
        let response = error_response(EnquiryError::InternalError {
            message: "length limit exceeded".to_string(),
        });

        assert_eq!(response.status, 500);
        assert_eq!(response.body, Some(ApiResponse::error(INTERNAL_ERROR_MESSAGE)));
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert!(!response.body_string().contains("length limit"));
    }
}
