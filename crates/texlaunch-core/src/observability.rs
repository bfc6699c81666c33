//! Tracing initialization.
//!
//! Uses `config::ObservabilityConfig` for TEXLAUNCH_QUIET, TEXLAUNCH_LOG_LEVEL
//! and TEXLAUNCH_LOG_JSON. Logs go to stderr so they never mix with the
//! status lines printed on stdout.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing. Call once at process startup.
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing() {
    let cfg = crate::config::ObservabilityConfig::from_env();
    let level = filter_directive(cfg.quiet, &cfg.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()
    };
}

fn filter_directive(quiet: bool, log_level: &str) -> String {
    if quiet {
        "error".to_string()
    } else {
        log_level.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_overrides_level() {
        assert_eq!(filter_directive(true, "texlaunch_provision=debug"), "error");
    }

    #[test]
    fn test_level_passthrough() {
        assert_eq!(filter_directive(false, "texlaunch_provision=debug"), "texlaunch_provision=debug");
    }
}
