//! Domain to zone name derivation.

use crate::error::{DdnsError, Result};

/// Derive the zone name for a domain: its last two labels.
///
/// This does not know about multi-label public suffixes, so
/// `home.example.co.uk` yields `co.uk`.
pub fn zone_name(domain: &str) -> Result<String> {
    let labels: Vec<&str> = domain.split('.').collect();

    if labels.len() < 2 {
        return Err(DdnsError::InvalidDomain(domain.to_string()));
    }

    Ok(labels[labels.len() - 2..].join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_two_labels() {
        assert_eq!(zone_name("a.b.example.com").unwrap(), "example.com");
        assert_eq!(zone_name("vpn.example.com").unwrap(), "example.com");
    }

    #[test]
    fn test_apex_domain() {
        assert_eq!(zone_name("example.com").unwrap(), "example.com");
    }

    #[test]
    fn test_missing_tld() {
        for domain in ["localhost", ""] {
            let err = zone_name(domain).unwrap_err();
            assert!(matches!(err, DdnsError::InvalidDomain(ref d) if d == domain));
        }
    }

    #[test]
    fn test_multi_label_suffix_not_handled() {
        assert_eq!(zone_name("home.example.co.uk").unwrap(), "co.uk");
    }
}
