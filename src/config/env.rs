use super::{MailSettings, ServerSettings, Settings, SiteSettings};

pub const ENV_BIND: &str = "ENQUIRY_ADDR";
pub const ENV_SITE_NAME: &str = "SITE_NAME";
pub const ENV_API_KEY: &str = "RESEND_API_KEY";
pub const ENV_TO: &str = "ENQUIRY_TO_EMAIL";
pub const ENV_FROM: &str = "ENQUIRY_FROM_EMAIL";
pub const ENV_API_BASE: &str = "RESEND_API_BASE";
pub const ENV_TIMEOUT: &str = "RESEND_TIMEOUT_SECONDS";

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 以任意查詢函式讀取設定（測試時不需改動行程環境變數）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_seconds = lookup(ENV_TIMEOUT).and_then(|raw| match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring non-numeric {}: {:?}", ENV_TIMEOUT, raw);
                None
            }
        });

        Settings {
            server: ServerSettings {
                bind: lookup(ENV_BIND),
            },
            site: SiteSettings {
                name: lookup(ENV_SITE_NAME),
            },
            mail: MailSettings {
                api_key: lookup(ENV_API_KEY),
                to: lookup(ENV_TO),
                from: lookup(ENV_FROM),
                api_base: lookup(ENV_API_BASE),
                timeout_seconds,
            },
        }
    }
}
