//! Posts a sample enquiry to a running endpoint and prints the reply.
//!
//! Usage: `send_enquiry [URL]` (default `ENQUIRY_URL` or http://127.0.0.1:3000/api/enquiries)

use anyhow::{Context, Result};
use enquiry_relay::core::response::ApiResponse;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    let url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ENQUIRY_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:3000/api/enquiries".to_string());

    let payload = json!({
        "name": "Smoke Test",
        "email": "smoke-test@example.com",
        "organisation": "enquiry-relay",
        "role": "other",
        "message": "This is a test enquiry sent by send_enquiry.",
        "source_page": "/smoke-test",
        "utm_source": "cli"
    });

    println!("🚀 POST {}", url);
    let response = reqwest::Client::new()
        .post(&url)
        .json(&payload)
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?;

    let status = response.status();
    let body: ApiResponse = response
        .json()
        .await
        .context("response body was not an enquiry API response")?;

    println!("{} {}", status, serde_json::to_string_pretty(&body)?);
    if !status.is_success() {
        anyhow::bail!("endpoint answered {}", status);
    }
    Ok(())
}
