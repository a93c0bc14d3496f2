use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::constants::DEFAULT_LOG_FILTER;

/// Installs the tracing subscriber. Logs go to stderr so they stay out of the
/// response text on stdout; `RUST_LOG=info` shows provider traffic.
///
/// `RUST_LOG` is read at call time, so load `.env` first.
pub fn init_logging() {
    let directive = filter_directive(std::env::var("RUST_LOG").ok());

    tracing_subscriber::registry()
        .with(EnvFilter::new(directive))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub fn filter_directive(rust_log: Option<String>) -> String {
    rust_log
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(Some("providers=debug".to_string())), "providers=debug");
        assert_eq!(filter_directive(Some("  ".to_string())), "warn");
        assert_eq!(filter_directive(None), "warn");
    }
}
