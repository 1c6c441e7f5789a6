//! Public IP detection.

use crate::error::{DdnsError, Result};
use std::time::Duration;

/// Default IP echo service.
pub const DEFAULT_IP_ENDPOINT: &str = "https://api.ipify.org/";

/// Fetches the machine's public IP from a plain-text echo endpoint.
#[derive(Debug, Clone)]
pub struct IpDetector {
    client: reqwest::Client,
    endpoint: String,
}

impl IpDetector {
    /// Create a detector for the default endpoint.
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DEFAULT_IP_ENDPOINT)
    }

    /// Create a detector for a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// The endpoint queried by this detector.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the current public IP.
    ///
    /// One request, no retries. The body is returned with surrounding
    /// whitespace removed.
    pub async fn current_ip(&self) -> Result<String> {
        let response = self.client.get(&self.endpoint).send().await?;

        if !response.status().is_success() {
            return Err(DdnsError::Transport(format!(
                "HTTP {} from {}",
                response.status(),
                self.endpoint
            )));
        }

        let text = response.text().await?;
        let ip = text.trim().to_string();

        tracing::debug!(ip = %ip, endpoint = %self.endpoint, "got current IP address");
        Ok(ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_default_endpoint() {
        let detector = IpDetector::new().unwrap();
        assert_eq!(detector.endpoint(), DEFAULT_IP_ENDPOINT);
    }

    #[tokio::test]
    async fn test_returns_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("203.0.113.5"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let detector = IpDetector::with_endpoint(format!("{}/", mock_server.uri())).unwrap();
        assert_eq!(detector.current_ip().await.unwrap(), "203.0.113.5");
    }

    #[tokio::test]
    async fn test_trims_trailing_newline() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("2001:db8::1\n"))
            .mount(&mock_server)
            .await;

        let detector = IpDetector::with_endpoint(mock_server.uri()).unwrap();
        assert_eq!(detector.current_ip().await.unwrap(), "2001:db8::1");
    }

    #[tokio::test]
    async fn test_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let detector = IpDetector::with_endpoint(mock_server.uri()).unwrap();
        let err = detector.current_ip().await.unwrap_err();
        assert!(matches!(err, DdnsError::Transport(ref msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let detector = IpDetector::with_endpoint("http://127.0.0.1:1/").unwrap();
        let err = tokio_test::assert_err!(detector.current_ip().await);
        assert!(matches!(err, DdnsError::Transport(_)));
    }
}
