//! Tracing setup shared by the service binaries

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Initialize the process-wide subscriber.
///
/// `RUST_LOG` overrides the configured level. Calling this more than once is
/// a no-op, so tests and embedding code can initialize freely.
pub fn init(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.format.as_str() {
        "json" => {
            let _ = builder.json().try_init();
        }
        "pretty" => {
            let _ = builder.pretty().try_init();
        }
        _ => {
            let _ = builder.try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_does_not_panic() {
        let config = LoggingConfig::default();
        init(&config);
        init(&config);
    }
}
