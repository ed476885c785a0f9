pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::build_handler;
pub use adapters::http::{build_router, AppState};
pub use adapters::resend::ResendMailer;
pub use config::{AppConfig, TomlConfig};
pub use core::handler::{EnquiryHandler, RequestBody};
pub use utils::error::{EnquiryError, Result};
