//! Cloudflare DNS provider.

use super::{DnsProvider, DnsRecord};
use crate::error::{DdnsError, Result};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com";

/// Cloudflare API credentials.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Scoped API token with Zone.DNS permission.
    Token(String),
    /// Global API key plus the account email.
    KeyEmail { key: String, email: String },
}

impl Credentials {
    /// Pick the credential mode from optional inputs.
    ///
    /// A token wins over key + email. Empty values count as missing.
    pub fn from_parts(
        token: Option<String>,
        key: Option<String>,
        email: Option<String>,
    ) -> Result<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());

        match (present(token), present(key), present(email)) {
            (Some(token), _, _) => Ok(Credentials::Token(token)),
            (None, Some(key), Some(email)) => Ok(Credentials::KeyEmail { key, email }),
            _ => Err(DdnsError::Credential(
                "either --key and --email or --token must be defined".to_string(),
            )),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::Token(token) => request.bearer_auth(token),
            Credentials::KeyEmail { key, email } => request
                .header("X-Auth-Key", key)
                .header("X-Auth-Email", email),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.debug_tuple("Token").field(&"<REDACTED>").finish(),
            Credentials::KeyEmail { email, .. } => f
                .debug_struct("KeyEmail")
                .field("key", &"<REDACTED>")
                .field("email", email)
                .finish(),
        }
    }
}

/// Cloudflare DNS provider.
#[derive(Debug)]
pub struct CloudflareProvider {
    client: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CloudflareResponse<T> {
    success: bool,
    result: Option<T>,
    #[serde(default)]
    errors: Vec<CloudflareError>,
}

#[derive(Debug, Deserialize)]
struct CloudflareError {
    #[serde(default)]
    code: u32,
    message: String,
}

#[derive(Debug, Deserialize)]
struct Zone {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    content: &'a str,
}

impl<T> CloudflareResponse<T> {
    /// Unwrap the envelope, turning API failures into their message.
    fn into_result(self) -> std::result::Result<T, String> {
        match (self.success, self.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err("response contained no result".to_string()),
            (false, _) => Err(self
                .errors
                .first()
                .map(|e| format!("{} (code {})", e.message, e.code))
                .unwrap_or_else(|| "Unknown error".to_string())),
        }
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL.to_string())
    }

    /// Create with custom base URL (for testing).
    pub fn with_base_url(credentials: Credentials, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            base_url,
        }
    }

    /// Send an authorized request and decode the response envelope.
    ///
    /// The outer error is a transport failure, the inner one the API's own
    /// error message.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<std::result::Result<T, String>> {
        let response = self.credentials.authorize(request).send().await?;
        let status = response.status();

        let body: CloudflareResponse<T> = response.json().await.map_err(|e| {
            DdnsError::Transport(format!("invalid Cloudflare response (HTTP {}): {}", status, e))
        })?;

        Ok(body.into_result())
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn name(&self) -> &'static str {
        "cloudflare"
    }

    async fn zone_id(&self, zone_name: &str) -> Result<String> {
        let url = format!("{}/client/v4/zones", self.base_url);
        let request = self.client.get(&url).query(&[("name", zone_name)]);

        let zones: Vec<Zone> = self
            .send(request)
            .await?
            .map_err(|message| DdnsError::ZoneLookup {
                zone: zone_name.to_string(),
                message,
            })?;

        let mut matching = zones.into_iter().filter(|z| z.name == zone_name);

        match (matching.next(), matching.next()) {
            (Some(zone), None) => {
                tracing::debug!(zone_id = %zone.id, zone = zone_name, "got zone id");
                Ok(zone.id)
            }
            (None, _) => Err(DdnsError::ZoneLookup {
                zone: zone_name.to_string(),
                message: "zone could not be found".to_string(),
            }),
            (Some(_), Some(_)) => Err(DdnsError::ZoneLookup {
                zone: zone_name.to_string(),
                message: "ambiguous zone name".to_string(),
            }),
        }
    }

    async fn list_records(&self, zone_id: &str, name: &str) -> Result<Vec<DnsRecord>> {
        let url = format!("{}/client/v4/zones/{}/dns_records", self.base_url, zone_id);
        let request = self.client.get(&url).query(&[("name", name)]);

        let mut records: Vec<DnsRecord> =
            self.send(request)
                .await?
                .map_err(|message| DdnsError::RecordLookup {
                    name: name.to_string(),
                    message,
                })?;

        for record in records.iter_mut().filter(|r| r.zone_id.is_empty()) {
            record.zone_id = zone_id.to_string();
        }

        tracing::debug!(zone_id, name, count = records.len(), "listed dns records");
        Ok(records)
    }

    async fn update_record(&self, record: &DnsRecord) -> Result<DnsRecord> {
        let url = format!(
            "{}/client/v4/zones/{}/dns_records/{}",
            self.base_url, record.zone_id, record.id
        );
        let request = self.client.patch(&url).json(&UpdateRequest {
            content: &record.content,
        });

        let mut updated: DnsRecord =
            self.send(request)
                .await?
                .map_err(|message| DdnsError::Update {
                    name: record.name.clone(),
                    message,
                })?;

        if updated.zone_id.is_empty() {
            updated.zone_id = record.zone_id.clone();
        }

        Ok(updated)
    }
}
