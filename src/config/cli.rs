use super::{ServerSettings, Settings, SiteSettings};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "enquiry-relay")]
#[command(about = "Receives website enquiry submissions and forwards them by email")]
pub struct CliConfig {
    #[arg(long, help = "Socket address to listen on (default 127.0.0.1:3000)")]
    pub bind: Option<String>,

    #[arg(long, help = "Optional TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Site name used in notification emails")]
    pub site_name: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// CLI 參數優先於 TOML 與環境變數
    pub fn overrides(&self) -> Settings {
        Settings {
            server: ServerSettings {
                bind: self.bind.clone(),
            },
            site: SiteSettings {
                name: self.site_name.clone(),
            },
            ..Default::default()
        }
    }
}
