//! Console logging setup.
//!
//! - LOG_FORMAT=compact|pretty (default: compact)
//! - RUST_LOG=level (default: info)

use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or_default().trim().to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

/// Installs the global subscriber. Logs go to stderr so that stdout stays
/// free for piping.
pub fn init_logging() {
    let format = LogFormat::from_env();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }

    tracing::debug!(log_format = ?format, "Logging initialized");
}
