use crate::domain::model::{Enquiry, Role, Submission, ValidationErrors};
use crate::utils::error::{EnquiryError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::net::SocketAddr;
use std::sync::LazyLock;
use url::Url;

pub const NAME_REQUIRED: &str = "Name is required.";
pub const EMAIL_REQUIRED: &str = "Valid email required.";
pub const MESSAGE_TOO_SHORT: &str = "Message is too short.";
pub const INVALID_ROLE: &str = "Invalid role.";
pub const SOURCE_PAGE_MISSING: &str = "Source page missing.";

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim)
}

fn trimmed_or_empty(value: &Option<String>) -> String {
    trimmed(value).unwrap_or_default().to_string()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// 驗證所有欄位並收集錯誤（不會在第一個錯誤就停止）
pub fn check_submission(submission: &Submission) -> ValidationErrors {
    inspect(submission).0
}

/// 逐欄檢查，同時回傳解析成功的 role
fn inspect(submission: &Submission) -> (ValidationErrors, Option<Role>) {
    let mut errors = ValidationErrors::default();

    let name_ok = trimmed(&submission.name)
        .map(|n| n.chars().count() >= MIN_NAME_CHARS)
        .unwrap_or(false);
    if !name_ok {
        errors.add("name", NAME_REQUIRED);
    }

    let email_ok = trimmed(&submission.email)
        .map(is_valid_email)
        .unwrap_or(false);
    if !email_ok {
        errors.add("email", EMAIL_REQUIRED);
    }

    let message_ok = trimmed(&submission.message)
        .map(|m| m.chars().count() >= MIN_MESSAGE_CHARS)
        .unwrap_or(false);
    if !message_ok {
        errors.add("message", MESSAGE_TOO_SHORT);
    }

    let role = submission.role.as_deref().and_then(Role::parse);
    if role.is_none() {
        errors.add("role", INVALID_ROLE);
    }

    let source_ok = trimmed(&submission.source_page)
        .map(|s| !s.is_empty())
        .unwrap_or(false);
    if !source_ok {
        errors.add("source_page", SOURCE_PAGE_MISSING);
    }

    (errors, role)
}

/// 驗證並建立正規化的 Enquiry
pub fn build_enquiry(
    submission: &Submission,
    received_at: DateTime<Utc>,
) -> std::result::Result<Enquiry, ValidationErrors> {
    let role = match inspect(submission) {
        (errors, Some(role)) if errors.is_empty() => role,
        (errors, _) => return Err(errors),
    };

    Ok(Enquiry {
        name: trimmed_or_empty(&submission.name),
        email: trimmed_or_empty(&submission.email),
        organisation: trimmed_or_empty(&submission.organisation),
        role,
        message: trimmed_or_empty(&submission.message),
        source_page: trimmed_or_empty(&submission.source_page),
        phone: trimmed_or_empty(&submission.phone),
        utm_source: trimmed_or_empty(&submission.utm_source),
        received_at,
    })
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EnquiryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EnquiryError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EnquiryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// 接受 `addr@example.com` 或 `Name <addr@example.com>`
pub fn validate_mailbox(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    let trimmed = value.trim();
    let address = match (trimmed.rfind('<'), trimmed.ends_with('>')) {
        (Some(start), true) => &trimmed[start + 1..trimmed.len() - 1],
        _ => trimmed,
    };

    if !is_valid_email(address) {
        return Err(EnquiryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Not a valid email address".to_string(),
        });
    }
    Ok(())
}

pub fn validate_socket_addr(field_name: &str, value: &str) -> Result<SocketAddr> {
    value
        .parse()
        .map_err(|e: std::net::AddrParseError| EnquiryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EnquiryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EnquiryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
