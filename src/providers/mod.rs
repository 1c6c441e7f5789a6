//! DNS provider abstraction.

mod cloudflare;


pub use cloudflare::{CloudflareProvider, Credentials};

use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// A DNS record as stored by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    /// Provider-assigned record identifier.
    pub id: String,
    /// Fully qualified record name.
    pub name: String,
    /// Record content, an IP address for A/AAAA records.
    pub content: String,
    /// Zone the record belongs to.
    #[serde(default)]
    pub zone_id: String,
    /// Record type (A, AAAA, ...).
    #[serde(rename = "type", default)]
    pub record_type: String,
}

/// Record management operations consumed from a DNS provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &'static str;

    /// Find the zone identifier for an exact zone name.
    async fn zone_id(&self, zone_name: &str) -> Result<String>;

    /// List the records in a zone whose name matches exactly.
    async fn list_records(&self, zone_id: &str, name: &str) -> Result<Vec<DnsRecord>>;

    /// Write the record's content back to the provider.
    async fn update_record(&self, record: &DnsRecord) -> Result<DnsRecord>;
}
