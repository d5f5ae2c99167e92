// Logging module - Logging infrastructure
use crate::domain::error::{TermBridgeError, TermBridgeResult};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for a configured level name; unknown names fall back to `warn`.
pub fn filter_directive(log_level: &str, verbose: bool) -> String {
    let level = if verbose {
        "debug"
    } else {
        match log_level {
            "error" | "warn" | "info" | "debug" | "trace" => log_level,
            _ => "warn",
        }
    };

    format!("termbridge={}", level)
}

/// Initialize logging system
///
/// Logs go to stderr; stdout carries device output. `RUST_LOG` overrides
/// the configured level.
pub fn init_logging(log_level: &str, verbose: bool) -> TermBridgeResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(log_level, verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true)
                .with_thread_names(true),
        )
        .try_init()
        .map_err(|e| TermBridgeError::Config {
            message: format!("Failed to initialize logging: {}", e),
        })?;

    tracing::debug!("TermBridge logging system initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("info", false), "termbridge=info");
        assert_eq!(filter_directive("info", true), "termbridge=debug");
        assert_eq!(filter_directive("loud", false), "termbridge=warn");
    }

    #[test]
    fn test_logging_init_twice_fails_cleanly() {
        // The first call may race other tests for the global subscriber
        let _ = init_logging("warn", false);
        assert!(init_logging("warn", false).is_err());
    }
}
