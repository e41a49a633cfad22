// # name.com Registrar
//
// Registrar implementation against the name.com v4 API.
//
// ## API Reference
//
// - List records: GET `/v4/domains/{domain}/records`
// - Update record: PUT `/v4/domains/{domain}/records/{id}` with the full
//   record body
//
// Both calls authenticate with HTTP Basic auth (username + API token).
// The client is stateless and single-shot: no retries, no backoff, no
// caching. Error recovery is owned by the reconciliation loop.
//
// ## Security
//
// The API token never appears in logs; the Debug implementation redacts
// it.

use std::time::Duration;

use async_trait::async_trait;
use dyndns_core::error::{Error, Result};
use dyndns_core::record::DnsRecord;
use dyndns_core::traits::Registrar;
use serde::Deserialize;
use tracing::debug;

/// name.com API base URL
const NAMECOM_API_BASE: &str = "https://api.name.com";

/// HTTP timeout for registrar requests, kept well under the poll interval
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Listing response body
///
/// name.com omits the `records` key entirely for a domain with no
/// records, so the field defaults to empty. Individual records still have
/// strict shapes; a malformed record fails the whole parse.
#[derive(Debug, Deserialize)]
struct RecordsResponse {
    #[serde(default)]
    records: Vec<DnsRecord>,
}

/// name.com registrar client
pub struct NameComClient {
    /// Account username for Basic auth
    username: String,

    /// API token for Basic auth
    token: String,

    /// API base URL, overridable for tests
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl std::fmt::Debug for NameComClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameComClient")
            .field("username", &self.username)
            .field("token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl NameComClient {
    /// Create a client against the production name.com API
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_base_url(username, token, NAMECOM_API_BASE)
    }

    /// Create a client against a custom base URL (for tests)
    pub fn with_base_url(
        username: impl Into<String>,
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(DEFAULT_HTTP_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    fn records_url(&self, domain: &str) -> String {
        format!("{}/v4/domains/{domain}/records", self.base_url)
    }

    fn record_url(&self, domain: &str, id: i64) -> String {
        format!("{}/v4/domains/{domain}/records/{id}", self.base_url)
    }
}

#[async_trait]
impl Registrar for NameComClient {
    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        let url = self.records_url(domain);
        debug!(%url, "listing records");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.token))
            .send()
            .await
            .map_err(|e| Error::registrar(format!("list request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::registrar(format!(
                "list returned status {}",
                response.status()
            )));
        }

        let body: RecordsResponse = response
            .json()
            .await
            .map_err(|e| Error::registrar(format!("malformed listing: {e}")))?;

        Ok(body.records)
    }

    async fn update_record(&self, domain: &str, id: i64, record: &DnsRecord) -> Result<()> {
        let url = self.record_url(domain, id);
        debug!(%url, "updating record");

        let response = self
            .client
            .put(&url)
            .basic_auth(&self.username, Some(&self.token))
            .json(record)
            .send()
            .await
            .map_err(|e| Error::registrar(format!("update request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::registrar(format!(
                "update of record {id} returned status {}",
                response.status()
            )));
        }

        Ok(())
    }
}
