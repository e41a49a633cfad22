//! DNS record snapshot types and change-set computation
//!
//! Records are owned by the registrar. The reconciler holds a read-only
//! snapshot for the duration of one iteration and never caches it.

use serde::{Deserialize, Serialize};

/// One DNS record as the registrar reports it
///
/// `id` is registrar-assigned and immutable; `record_type` ("A"/"AAAA")
/// is never rewritten by this system; `answer` is the published IP value.
/// All three fields are required on the wire, so a record with a missing
/// or mistyped field is a parse failure rather than a silent drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Registrar-assigned record identifier, unique within a domain
    pub id: i64,

    /// Record type, e.g. "A" or "AAAA"
    #[serde(rename = "type")]
    pub record_type: String,

    /// The IP value currently published for this record
    pub answer: String,
}

impl DnsRecord {
    /// Copy of this record with a new answer, id and type unchanged
    pub fn with_answer(&self, answer: impl Into<String>) -> Self {
        Self {
            id: self.id,
            record_type: self.record_type.clone(),
            answer: answer.into(),
        }
    }
}

/// Compute the change set for one iteration
///
/// Filters the listing to records whose answer differs from the current
/// IP and rewrites each answer, preserving listing order. The IP is an
/// opaque token here; only equality matters.
pub fn change_set(records: &[DnsRecord], current_ip: &str) -> Vec<DnsRecord> {
    records
        .iter()
        .filter(|record| record.answer != current_ip)
        .map(|record| record.with_answer(current_ip))
        .collect()
}
