use clap::ValueEnum;

pub const DEFAULT_LOG_FILTER: &str = "info,solana_client=warn,reqwest=warn,hyper=warn";

#[derive(Debug, Clone, ValueEnum)]
pub enum LoggingFormat {
    Standard,
    Json,
}

/// Installs the global tracing subscriber. `RUST_LOG` takes precedence over the default filter.
pub fn setup_logging(format: &LoggingFormat) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter);
    match format {
        LoggingFormat::Standard => subscriber.init(),
        LoggingFormat::Json => subscriber.json().init(),
    }
}
