use crate::domain::model::ValidationErrors;
use serde::{Deserialize, Serialize};

pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// 回傳給前端表單的 JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ApiResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: Some(message.to_string()),
            errors: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.to_string()),
            errors: None,
        }
    }

    pub fn invalid(errors: ValidationErrors) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: None,
            errors: Some(errors),
        }
    }
}

/// 與傳輸層無關的回應，由 axum 或 Lambda adapter 轉換
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<ApiResponse>,
}

impl HandlerResponse {
    fn with_cors(status: u16, body: Option<ApiResponse>) -> Self {
        let mut headers: Vec<(String, String)> = CORS_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn json(status: u16, body: ApiResponse) -> Self {
        Self::with_cors(status, Some(body))
    }

    pub fn no_content() -> Self {
        Self::with_cors(204, None)
    }

    pub fn method_not_allowed(message: &str) -> Self {
        let mut response = Self::json(405, ApiResponse::error(message));
        response
            .headers
            .push(("Allow".to_string(), ALLOWED_METHODS.to_string()));
        response
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// 序列化後的 body，204 時為空字串
    pub fn body_string(&self) -> String {
        match &self.body {
            Some(body) => serde_json::to_string(body).unwrap_or_else(|e| {
                tracing::error!("Failed to serialize response body: {}", e);
                r#"{"status":"error"}"#.to_string()
            }),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_headers_on_every_response() {
        for response in [
            HandlerResponse::no_content(),
            HandlerResponse::json(200, ApiResponse::ok("Thanks.")),
            HandlerResponse::method_not_allowed("nope"),
        ] {
            assert_eq!(response.header("access-control-allow-origin"), Some("*"));
            assert_eq!(
                response.header("Access-Control-Allow-Methods"),
                Some("POST, OPTIONS")
            );
            assert_eq!(
                response.header("Access-Control-Allow-Headers"),
                Some("Content-Type")
            );
        }
    }

    #[test]
    fn test_no_content_has_empty_body() {
        let response = HandlerResponse::no_content();
        assert_eq!(response.status, 204);
        assert_eq!(response.body_string(), "");
        assert_eq!(response.header("Content-Type"), None);
    }

    #[test]
    fn test_body_shapes() {
        let ok = HandlerResponse::json(200, ApiResponse::ok("Thanks."));
        assert_eq!(ok.body_string(), r#"{"status":"ok","message":"Thanks."}"#);

        let mut errors = ValidationErrors::default();
        errors.add("name", "Name is required.");
        let invalid = HandlerResponse::json(400, ApiResponse::invalid(errors));
        assert_eq!(
            invalid.body_string(),
            r#"{"status":"error","errors":{"name":"Name is required."}}"#
        );
    }

    #[test]
    fn test_method_not_allowed_sets_allow_header() {
        let response = HandlerResponse::method_not_allowed("Method not allowed. Use POST.");
        assert_eq!(response.status, 405);
        assert_eq!(response.header("Allow"), Some("POST, OPTIONS"));
    }
}
