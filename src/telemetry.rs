//! Tracing subscriber setup
//!
//! Logs go to stderr so CLI output stays clean on stdout.
//! `RUST_LOG` wins over the configured level when it is set, so
//! `RUST_LOG=travelweather=debug` shows query classification for every search.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn setup_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(logging))
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = if logging.format == "json" {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.compact().try_init()
    };

    if let Err(err) = result {
        tracing::debug!("Tracing subscriber already installed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_twice_does_not_panic() {
        let logging = LoggingConfig::default();
        setup_tracing(&logging);
        setup_tracing(&logging);
    }
}
