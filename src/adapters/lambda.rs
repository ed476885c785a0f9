//! API Gateway proxy event shapes for the Lambda deployment.

use crate::core::handler::{EnquiryHandler, RequestBody};
use crate::core::response::HandlerResponse;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// API Gateway REST (v1) 帶 `httpMethod`；HTTP API (v2) 與 Function URL 放在 `requestContext.http.method`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub http: Option<HttpContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpContext {
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ProxyRequest {
    /// 找不到 method 時回傳空字串，交由 handler 回 405
    pub fn method(&self) -> String {
        self.http_method
            .clone()
            .or_else(|| {
                self.request_context
                    .as_ref()
                    .and_then(|ctx| ctx.http.as_ref())
                    .and_then(|http| http.method.clone())
            })
            .unwrap_or_default()
    }

    /// body 為字串時視為原始 JSON 文字，否則是已解析的結構
    pub fn request_body(self) -> RequestBody {
        match self.body {
            Some(serde_json::Value::String(raw)) => RequestBody::Raw(raw.into_bytes()),
            Some(value) => RequestBody::Structured(value),
            None => RequestBody::Raw(Vec::new()),
        }
    }
}

impl From<HandlerResponse> for ProxyResponse {
    fn from(response: HandlerResponse) -> Self {
        let body = response.body_string();
        Self {
            status_code: response.status,
            headers: response.headers.into_iter().collect(),
            body,
        }
    }
}

pub async fn handle_event(handler: &EnquiryHandler, request: ProxyRequest) -> ProxyResponse {
    let method = request.method();
    if method.is_empty() {
        tracing::warn!("Lambda event carries no HTTP method");
    }
    handler.handle(&method, request.request_body()).await.into()
}
