use crate::domain::model::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnquiryError {
    #[error("Method not allowed: {method}")]
    MethodNotAllowed { method: String },

    #[error("Validation failed: {0}")]
    ValidationError(ValidationErrors),

    #[error("Body parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    InternalError { message: String },

    #[error("Email API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Email delivery rejected (status {status}): {message}")]
    EmailDeliveryError { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl EnquiryError {
    /// 對應到 HTTP 狀態碼
    pub fn status_code(&self) -> u16 {
        match self {
            EnquiryError::MethodNotAllowed { .. } => 405,
            EnquiryError::ValidationError(_) => 400,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, EnquiryError>;
