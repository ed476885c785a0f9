//! axum router exposing the enquiry handler.

use crate::core::handler::{error_response, EnquiryHandler, RequestBody};
use crate::core::response::HandlerResponse;
use crate::utils::error::EnquiryError;
use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, State},
    http::{HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;

pub const ENQUIRIES_PATH: &str = "/api/enquiries";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<EnquiryHandler>,
}

/// Assemble the HTTP router. Every method is routed to the handler so it can answer 405 itself.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(ENQUIRIES_PATH, any(enquiries))
        .with_state(state)
}

/// body 讀取失敗（超過大小上限、連線中斷）同樣回傳帶 CORS 的 JSON 錯誤
pub async fn enquiries(
    State(state): State<AppState>,
    method: Method,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let response = match body {
        Ok(body) => {
            state
                .handler
                .handle(method.as_str(), RequestBody::Raw(body.to_vec()))
                .await
        }
        Err(rejection) => error_response(EnquiryError::InternalError {
            message: format!("failed to read {} body: {}", method, rejection.body_text()),
        }),
    };
    into_axum(response)
}

fn into_axum(response: HandlerResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = match response.body {
        Some(_) => Body::from(response.body_string()),
        None => Body::empty(),
    };

    let mut out = (status, body).into_response();
    for (name, value) in &response.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                out.headers_mut().insert(name, value);
            }
            _ => tracing::error!("Dropping invalid response header {}: {}", name, value),
        }
    }
    out
}
