//! Per-domain update loop.

use crate::detector::IpDetector;
use crate::error::{DdnsError, Result};
use crate::providers::{DnsProvider, DnsRecord};
use crate::zone::zone_name;

/// Outcome of a successful record update.
#[derive(Debug, Clone)]
pub struct UpdateResult {
    /// Domain that was updated.
    pub domain: String,
    /// Zone the record lives in.
    pub zone_id: String,
    /// Record that was written.
    pub record_id: String,
    /// Content before the update.
    pub previous_content: String,
    /// Content after the update.
    pub content: String,
    /// Timestamp of the update.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Points a list of domains at the current public IP.
pub struct DomainUpdater<P> {
    provider: P,
    detector: IpDetector,
}

impl<P: DnsProvider> DomainUpdater<P> {
    pub fn new(provider: P, detector: IpDetector) -> Self {
        Self { provider, detector }
    }

    /// Update every domain in a comma separated list.
    ///
    /// The IP is fetched once. Domains are processed in order and the first
    /// failure aborts the rest; records already written stay written.
    pub async fn run(&self, domains: &str) -> Result<Vec<UpdateResult>> {
        let ip = self
            .detector
            .current_ip()
            .await
            .map_err(|e| DdnsError::CurrentIp(Box::new(e)))?;

        let mut results = Vec::new();

        for domain in domains.split(',').map(str::trim) {
            let result = self
                .update_domain(domain, &ip)
                .await
                .map_err(|e| e.for_domain(domain))?;
            results.push(result);
        }

        Ok(results)
    }

    /// Point a single domain at `ip`.
    ///
    /// The update is sent even when the record already holds `ip`.
    pub async fn update_domain(&self, domain: &str, ip: &str) -> Result<UpdateResult> {
        let zone = zone_name(domain)?;
        let zone_id = self.provider.zone_id(&zone).await?;

        let mut record = resolve_record(&self.provider, &zone_id, domain).await?;
        let previous_content = std::mem::replace(&mut record.content, ip.to_string());

        let updated = self.provider.update_record(&record).await?;

        tracing::info!(
            name = %updated.name,
            previous = %previous_content,
            content = %updated.content,
            "updated record"
        );

        Ok(UpdateResult {
            domain: domain.to_string(),
            zone_id,
            record_id: updated.id,
            previous_content,
            content: updated.content,
            timestamp: chrono::Utc::now(),
        })
    }
}

/// Fetch the one record named `domain` in a zone.
pub async fn resolve_record<P>(provider: &P, zone_id: &str, domain: &str) -> Result<DnsRecord>
where
    P: DnsProvider + ?Sized,
{
    let mut records = provider.list_records(zone_id, domain).await?;

    if records.len() != 1 {
        return Err(DdnsError::RecordCount {
            name: domain.to_string(),
            count: records.len(),
        });
    }

    Ok(records.remove(0))
}
