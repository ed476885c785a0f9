use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter,
};

const CLI_FILTER: &str = "enquiry_relay=info,warn";
const CLI_VERBOSE_FILTER: &str = "enquiry_relay=debug,hyper=warn,info";
const LAMBDA_FILTER: &str = "enquiry_relay=info,lambda_runtime=warn,warn";

/// `RUST_LOG` 優先，否則使用預設過濾規則
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// CLI 與 Lambda 共用的輸出欄位；每個 `enquiry` span 結束時記錄耗時
fn base_layer<S>() -> fmt::Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::CLOSE)
}

pub fn init_cli_logger(verbose: bool) {
    let default = if verbose { CLI_VERBOSE_FILTER } else { CLI_FILTER };

    tracing_subscriber::registry()
        .with(env_filter(default))
        .with(base_layer().compact())
        .init();
}

/// CloudWatch 以 JSON 行輸出
pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(env_filter(LAMBDA_FILTER))
        .with(base_layer().json())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_parse() {
        for directives in [CLI_FILTER, CLI_VERBOSE_FILTER, LAMBDA_FILTER] {
            assert!(
                directives.parse::<EnvFilter>().is_ok(),
                "bad filter: {}",
                directives
            );
        }
    }
}
