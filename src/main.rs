use clap::Parser;
use enquiry_relay::config::Settings;
use enquiry_relay::utils::{logger, validation::Validate};
use enquiry_relay::{build_handler, build_router, AppState, CliConfig, TomlConfig};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting enquiry-relay {}", env!("CARGO_PKG_VERSION"));

    // 環境變數 < TOML 檔 < CLI 參數
    let mut settings = Settings::from_env();
    if let Some(path) = &cli.config {
        match TomlConfig::from_file(path) {
            Ok(file) => settings = settings.merge(file.settings),
            Err(e) => {
                tracing::error!("❌ Failed to load {}: {}", path.display(), e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        }
    }
    let config = settings.merge(cli.overrides()).resolve();

    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let handler = build_handler(&config)?;
    let app = build_router(AppState {
        handler: Arc::new(handler),
    });

    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Enquiry endpoint: POST http://{}/api/enquiries", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
