#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_mailbox, validate_non_empty_string, validate_range, validate_socket_addr,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_SITE_NAME: &str = "Website";
pub const DEFAULT_API_BASE: &str = "https://api.resend.com";
pub const DEFAULT_SENDER_ADDRESS: &str = "onboarding@resend.dev";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 各來源（環境變數、TOML、CLI）共用的部分設定，None 表示該來源未提供
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub mail: MailSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailSettings {
    pub api_key: Option<String>,
    pub to: Option<String>,
    pub from: Option<String>,
    pub api_base: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// 空白或仍是 `${VAR}` 佔位字串的值視為未設定
fn provided(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.contains("${"))
        .map(str::to_string)
}

impl Settings {
    /// 以 `other` 覆蓋目前的值
    pub fn merge(self, other: Settings) -> Settings {
        Settings {
            server: ServerSettings {
                bind: other.server.bind.or(self.server.bind),
            },
            site: SiteSettings {
                name: other.site.name.or(self.site.name),
            },
            mail: MailSettings {
                api_key: other.mail.api_key.or(self.mail.api_key),
                to: other.mail.to.or(self.mail.to),
                from: other.mail.from.or(self.mail.from),
                api_base: other.mail.api_base.or(self.mail.api_base),
                timeout_seconds: other.mail.timeout_seconds.or(self.mail.timeout_seconds),
            },
        }
    }

    pub fn resolve(&self) -> AppConfig {
        let site = SiteConfig {
            name: provided(&self.site.name).unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
        };
        let mail = self.mail.resolve(&site);

        AppConfig {
            server: ServerConfig {
                bind: provided(&self.server.bind).unwrap_or_else(|| DEFAULT_BIND.to_string()),
            },
            site,
            mail,
        }
    }
}

impl MailSettings {
    /// 缺少 API key 或收件地址時回傳 None，代表停用郵件發送
    pub fn resolve(&self, site: &SiteConfig) -> Option<MailConfig> {
        let api_key = provided(&self.api_key)?;
        let to = provided(&self.to)?;

        Some(MailConfig {
            api_key,
            to,
            from: provided(&self.from)
                .unwrap_or_else(|| format!("{} <{}>", site.name, DEFAULT_SENDER_ADDRESS)),
            api_base: provided(&self.api_base)
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            timeout_seconds: self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub api_key: String,
    pub to: String,
    pub from: String,
    pub api_base: String,
    pub timeout_seconds: u64,
}

// api_key 不可出現在日誌
impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_key", &"***")
            .field("to", &self.to)
            .field("from", &self.from)
            .field("api_base", &self.api_base)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Validate for MailConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("mail.api_key", &self.api_key)?;
        validate_mailbox("mail.to", &self.to)?;
        validate_mailbox("mail.from", &self.from)?;
        validate_url("mail.api_base", &self.api_base)?;
        validate_range("mail.timeout_seconds", self.timeout_seconds, 1, 120)?;
        Ok(())
    }
}

/// 啟動時載入一次，之後注入 handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    /// 環境變數 < TOML 檔
    pub fn load(config_file: Option<&std::path::Path>) -> Result<Self> {
        let mut settings = Settings::from_env();
        if let Some(path) = config_file {
            settings = settings.merge(TomlConfig::from_file(path)?.settings);
        }
        Ok(settings.resolve())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_socket_addr("server.bind", &self.server.bind)?;
        validate_non_empty_string("site.name", &self.site.name)?;

        if let Some(mail) = &self.mail {
            mail.validate()?;
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
