// # Registrar Trait
//
// Defines the interface for the DNS-hosting provider that owns the
// domain's records.
//
// ## Implementations
//
// - name.com v4 API: `dyndns-registrar-namecom` crate
//
// Registrar implementations are stateless single-shot API wrappers. They
// must not retry, back off, or decide whether an update is needed; all
// of that is owned by the reconciliation loop.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::DnsRecord;

/// Trait for registrar implementations
///
/// Both operations attach the credentials built at startup. Each call is
/// atomic from the caller's point of view: an update either fully
/// succeeds with a 2xx response or surfaces an error. The registrar API
/// offers no batching, so N changed records cost N sequential calls.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// List all DNS records for a domain
    ///
    /// Returns the records in the registrar's listing order. A record
    /// whose wire shape does not match [`DnsRecord`] is a parse failure
    /// surfaced as `Err`, not silently dropped.
    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>>;

    /// Update a single record by identifier
    ///
    /// Sends the full record body. Fails loudly on any non-2xx response;
    /// there are no partial-success semantics.
    async fn update_record(&self, domain: &str, id: i64, record: &DnsRecord) -> Result<()>;
}
