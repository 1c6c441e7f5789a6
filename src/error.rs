//! Error types for cloudflare-ddns.

use thiserror::Error;

/// Result type alias for cloudflare-ddns.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// DDNS error types.
#[derive(Error, Debug)]
pub enum DdnsError {
    /// Domain name without at least a name and a TLD.
    #[error("{0} did not contain a TLD")]
    InvalidDomain(String),

    /// The provider could not resolve a zone name to an identifier.
    #[error("could not find zone by name {zone}: {message}")]
    ZoneLookup { zone: String, message: String },

    /// Listing the records of a zone failed.
    #[error("could not locate dns record {name} for zone: {message}")]
    RecordLookup { name: String, message: String },

    /// The record lookup did not return exactly one record.
    #[error("expected to find a single dns record for {name}, got {count}")]
    RecordCount { name: String, count: usize },

    /// Network failure reaching the IP endpoint or the provider.
    #[error("transport error: {0}")]
    Transport(String),

    /// Missing or unusable credentials.
    #[error("credential error: {0}")]
    Credential(String),

    /// The provider rejected a record update.
    #[error("could not update the DNS record {name}: {message}")]
    Update { name: String, message: String },

    /// Public IP lookup failed.
    #[error("could not get the current IP address: {0}")]
    CurrentIp(#[source] Box<DdnsError>),

    /// A single domain failed somewhere in its update.
    #[error("could not update {domain}: {source}")]
    Domain {
        domain: String,
        #[source]
        source: Box<DdnsError>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DdnsError {
    /// Strip the context wrappers and return the underlying error.
    pub fn root(&self) -> &DdnsError {
        match self {
            DdnsError::CurrentIp(inner) => inner.root(),
            DdnsError::Domain { source, .. } => source.root(),
            other => other,
        }
    }

    /// Wrap this error with the domain it occurred for.
    pub fn for_domain(self, domain: &str) -> Self {
        DdnsError::Domain {
            domain: domain.to_string(),
            source: Box::new(self),
        }
    }
}

impl From<reqwest::Error> for DdnsError {
    fn from(e: reqwest::Error) -> Self {
        DdnsError::Transport(e.to_string())
    }
}

impl From<toml::de::Error> for DdnsError {
    fn from(e: toml::de::Error) -> Self {
        DdnsError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_unwraps_context() {
        let err = DdnsError::Transport("connection refused".to_string()).for_domain("a.example.com");
        assert!(matches!(err.root(), DdnsError::Transport(_)));

        let err = DdnsError::CurrentIp(Box::new(DdnsError::Transport("timeout".to_string())));
        assert!(matches!(err.root(), DdnsError::Transport(_)));
    }

    #[test]
    fn test_wrapped_message_keeps_cause() {
        let err = DdnsError::RecordCount {
            name: "a.example.com".to_string(),
            count: 0,
        }
        .for_domain("a.example.com");

        assert_eq!(
            err.to_string(),
            "could not update a.example.com: expected to find a single dns record for a.example.com, got 0"
        );
    }

    #[test]
    fn test_invalid_domain_message() {
        let err = DdnsError::InvalidDomain("localhost".to_string());
        assert_eq!(err.to_string(), "localhost did not contain a TLD");
    }
}
