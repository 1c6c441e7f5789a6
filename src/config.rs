//! Configuration management for cloudflare-ddns.

use crate::detector::DEFAULT_IP_ENDPOINT;
use crate::error::Result;
use crate::logging::LogConfig;
use crate::providers::Credentials;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Domains to point at the current IP.
    #[serde(default)]
    pub domains: Vec<String>,

    /// IP echo service to query.
    #[serde(default = "default_ip_endpoint")]
    pub ip_endpoint: String,

    /// Cloudflare credentials.
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

fn default_ip_endpoint() -> String {
    DEFAULT_IP_ENDPOINT.to_string()
}

/// Credential fields as written in the config file.
///
/// Values starting with `$` name an environment variable to read instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsConfig {
    /// API token with Zone.DNS permission.
    pub token: Option<String>,
    /// Global API key.
    pub key: Option<String>,
    /// Account email.
    pub email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            ip_endpoint: default_ip_endpoint(),
            credentials: CredentialsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Candidate config file locations, most specific first.
    pub fn search_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("cloudflare-ddns/config.toml")),
            Some(PathBuf::from("/etc/cloudflare-ddns/config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from an explicit path, or the first existing default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::search_paths().into_iter().find(|p| p.exists()) {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// The configured domains as one comma separated list.
    pub fn domain_list(&self) -> String {
        self.domains.join(",")
    }

    /// Resolve the configured credentials.
    ///
    /// A `$VAR` reference to an unset variable counts as missing.
    pub fn credentials(&self) -> Result<Credentials> {
        let creds = &self.credentials;
        Credentials::from_parts(
            creds.token.as_deref().and_then(resolve_env),
            creds.key.as_deref().and_then(resolve_env),
            creds.email.as_deref().and_then(resolve_env),
        )
    }
}

/// Resolve environment variable references (values starting with $).
pub(crate) fn resolve_env(value: &str) -> Option<String> {
    match value.strip_prefix('$') {
        Some(var_name) => match std::env::var(var_name) {
            Ok(resolved) => Some(resolved),
            Err(_) => {
                tracing::warn!("Environment variable {} not set", var_name);
                None
            }
        },
        None => Some(value.to_string()),
    }
}
