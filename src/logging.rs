//! Logging setup.

use crate::error::{DdnsError, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Log output settings, applied once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    /// Log this crate at debug level.
    #[serde(default)]
    pub debug: bool,

    /// Emit JSON lines instead of the human readable format.
    #[serde(default)]
    pub json: bool,
}

impl LogConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> &'static str {
        if self.debug {
            "info,cloudflare_ddns=debug"
        } else {
            "info"
        }
    }

    /// Install the global subscriber. `RUST_LOG` takes precedence over `debug`.
    pub fn init(&self) -> Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let installed = if self.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };

        installed.map_err(|e| DdnsError::Config(format!("could not install logger: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(LogConfig::default().default_directive(), "info");

        let debug = LogConfig {
            debug: true,
            json: false,
        };
        assert_eq!(debug.default_directive(), "info,cloudflare_ddns=debug");
    }

    #[test]
    fn test_second_init_fails() {
        let config = LogConfig::default();
        let _ = config.init();
        assert!(config.init().is_err());
    }
}
