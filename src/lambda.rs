#[cfg(feature = "lambda")]
use enquiry_relay::adapters::lambda::{handle_event, ProxyRequest, ProxyResponse};
#[cfg(feature = "lambda")]
use enquiry_relay::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use enquiry_relay::{build_handler, AppConfig, EnquiryHandler};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
async fn function_handler(
    handler: Arc<EnquiryHandler>,
    event: LambdaEvent<ProxyRequest>,
) -> Result<ProxyResponse, Error> {
    tracing::debug!("Lambda request id: {}", event.context.request_id);
    Ok(handle_event(&handler, event.payload).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時載入一次設定與郵件客戶端
    let config_file = std::env::var("ENQUIRY_CONFIG").ok();
    let config = AppConfig::load(config_file.as_deref().map(std::path::Path::new))
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    config
        .mail
        .as_ref()
        .map(|mail| mail.validate())
        .transpose()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let handler = Arc::new(
        build_handler(&config)
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?,
    );

    tracing::info!("Enquiry Lambda function ready");
    run(service_fn(move |event| {
        let handler = Arc::clone(&handler);
        async move { function_handler(handler, event).await }
    }))
    .await
}
