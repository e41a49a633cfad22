// # ipify IP Source
//
// HTTP-based public-IP discovery against https://www.ipify.org/.
//
// One GET per call, JSON response `{ "ip": "<string>" }`. The client
// performs no retries and caches nothing; a failed or malformed response
// surfaces as an error for the reconciler to back off on.

use std::time::Duration;

use async_trait::async_trait;
use dyndns_core::error::{Error, Result};
use dyndns_core::traits::IpSource;
use serde::Deserialize;
use tracing::debug;

/// The ipify JSON endpoint
const IPIFY_ENDPOINT: &str = "https://api.ipify.org?format=json";

/// HTTP timeout for discovery requests, kept well under the poll interval
/// so a hung call cannot stall the loop
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Response body of the ipify JSON endpoint
#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: String,
}

/// Public-IP discovery client backed by ipify
pub struct IpifyClient {
    /// Full endpoint URL including the `format=json` query
    endpoint: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl IpifyClient {
    /// Create a client against the public ipify endpoint
    pub fn new() -> Self {
        Self::with_endpoint(IPIFY_ENDPOINT)
    }

    /// Create a client against a custom endpoint (for tests)
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::builder()
                .timeout(DEFAULT_HTTP_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for IpifyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IpSource for IpifyClient {
    async fn current_ip(&self) -> Result<String> {
        debug!(endpoint = %self.endpoint, "fetching current ip");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::discovery(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::discovery(format!(
                "unexpected status: {}",
                response.status()
            )));
        }

        let body: IpifyResponse = response
            .json()
            .await
            .map_err(|e| Error::discovery(format!("malformed response: {e}")))?;

        Ok(body.ip)
    }
}
