use crate::utils::error::{EnquiryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 表單送出的原始欄位。非字串的值視為未提供（蜜罐欄位除外）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Submission {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub organisation: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source_page: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub utm_source: Option<String>,
    #[serde(default, deserialize_with = "honeypot_value")]
    pub honeypot: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// 蜜罐欄位：任何非 null 的值都算有填，非字串轉成 JSON 文字
fn honeypot_value<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

impl Submission {
    /// 從 JSON 值建立，非物件的 body 視為解析失敗
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(EnquiryError::ParseError(serde::de::Error::custom(
                "request body must be a JSON object",
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// 蜜罐欄位有非空白內容即視為垃圾提交
    pub fn is_spam(&self) -> bool {
        self.honeypot
            .as_deref()
            .map(|h| !h.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tenant,
    Investor,
    Partner,
    Other,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "tenant" => Some(Role::Tenant),
            "investor" => Some(Role::Investor),
            "partner" => Some(Role::Partner),
            "other" => Some(Role::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tenant => "tenant",
            Role::Investor => "investor",
            Role::Partner => "partner",
            Role::Other => "other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 驗證通過後的正規化詢問紀錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enquiry {
    pub name: String,
    pub email: String,
    pub organisation: String,
    pub role: Role,
    pub message: String,
    pub source_page: String,
    pub phone: String,
    pub utm_source: String,
    pub received_at: DateTime<Utc>,
}

impl Enquiry {
    pub fn received_at_iso(&self) -> String {
        self.received_at
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }
}

/// 欄位名稱 -> 錯誤訊息，僅包含驗證失敗的欄位
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fields: {}", self.fields().join(", "))
    }
}

/// 交給郵件服務的訊息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}
