//! Test doubles and common utilities for reconciler contract tests
//!
//! The fakes here script the two external collaborators and record every
//! call, so the tests can assert on exactly which registrar writes the
//! loop issued and when the discovery attempts happened.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dyndns_core::config::Config;
use dyndns_core::error::{Error, Result};
use dyndns_core::record::DnsRecord;
use dyndns_core::traits::{IpSource, Registrar};
use tokio::time::Instant;

/// Shorthand for building a record literal
pub fn record(id: i64, record_type: &str, answer: &str) -> DnsRecord {
    DnsRecord {
        id,
        record_type: record_type.to_string(),
        answer: answer.to_string(),
    }
}

/// Minimal config for driving a Reconciler in tests
pub fn test_config(poll_secs: u64, backoff_secs: u64) -> Config {
    let vars = [
        ("DOMAIN", "example.com".to_string()),
        ("USERNAME", "u".to_string()),
        ("TOKEN", "t".to_string()),
        ("POLL_INTERVAL_SECS", poll_secs.to_string()),
        ("BACKOFF_SECS", backoff_secs.to_string()),
    ];
    Config::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test config loads")
}

/// An IpSource that replays a script of results and records call times
///
/// When the script runs out, the last entry repeats. Call instants use
/// tokio's clock so tests running under paused time can assert the exact
/// gaps between discovery attempts.
#[derive(Clone)]
pub struct ScriptedIpSource {
    script: Arc<Mutex<VecDeque<std::result::Result<String, String>>>>,
    last: Arc<Mutex<std::result::Result<String, String>>>,
    call_instants: Arc<Mutex<Vec<Instant>>>,
    call_count: Arc<AtomicUsize>,
}

impl ScriptedIpSource {
    pub fn new(script: Vec<std::result::Result<String, String>>) -> Self {
        assert!(!script.is_empty(), "script must have at least one entry");
        let last = script.last().cloned().unwrap();
        Self {
            script: Arc::new(Mutex::new(script.into())),
            last: Arc::new(Mutex::new(last)),
            call_instants: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source that always returns the same IP
    pub fn constant(ip: &str) -> Self {
        Self::new(vec![Ok(ip.to_string())])
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn call_instants(&self) -> Vec<Instant> {
        self.call_instants.lock().unwrap().clone()
    }
}

#[async_trait]
impl IpSource for ScriptedIpSource {
    async fn current_ip(&self) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.call_instants.lock().unwrap().push(Instant::now());

        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last.lock().unwrap().clone());

        next.map_err(Error::discovery)
    }
}

/// A Registrar that replays scripted listings and update results while
/// recording every call it receives
#[derive(Clone)]
pub struct RecordingRegistrar {
    listings: Arc<Mutex<VecDeque<std::result::Result<Vec<DnsRecord>, String>>>>,
    last_listing: Arc<Mutex<std::result::Result<Vec<DnsRecord>, String>>>,
    update_results: Arc<Mutex<VecDeque<std::result::Result<(), String>>>>,
    update_calls: Arc<Mutex<Vec<(String, i64, DnsRecord)>>>,
    list_call_count: Arc<AtomicUsize>,
}

impl RecordingRegistrar {
    pub fn new(listings: Vec<std::result::Result<Vec<DnsRecord>, String>>) -> Self {
        assert!(!listings.is_empty(), "listings must have at least one entry");
        let last = listings.last().cloned().unwrap();
        Self {
            listings: Arc::new(Mutex::new(listings.into())),
            last_listing: Arc::new(Mutex::new(last)),
            update_results: Arc::new(Mutex::new(VecDeque::new())),
            update_calls: Arc::new(Mutex::new(Vec::new())),
            list_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A registrar that always returns the same listing and accepts all
    /// updates
    pub fn with_records(records: Vec<DnsRecord>) -> Self {
        Self::new(vec![Ok(records)])
    }

    /// Script the outcome of each update call, in order. Calls beyond the
    /// script succeed.
    pub fn script_updates(self, results: Vec<std::result::Result<(), String>>) -> Self {
        *self.update_results.lock().unwrap() = results.into();
        self
    }

    pub fn list_call_count(&self) -> usize {
        self.list_call_count.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> Vec<(String, i64, DnsRecord)> {
        self.update_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Registrar for RecordingRegistrar {
    async fn list_records(&self, _domain: &str) -> Result<Vec<DnsRecord>> {
        self.list_call_count.fetch_add(1, Ordering::SeqCst);

        let next = self
            .listings
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last_listing.lock().unwrap().clone());

        next.map_err(Error::registrar)
    }

    async fn update_record(&self, domain: &str, id: i64, record: &DnsRecord) -> Result<()> {
        self.update_calls
            .lock()
            .unwrap()
            .push((domain.to_string(), id, record.clone()));

        let result = self
            .update_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()));

        result.map_err(Error::registrar)
    }
}

/// Poll (under paused tokio time) until the discovery call count reaches
/// `count`, or panic after too many checks
///
/// The one-second step only advances the virtual clock; the reconciler's
/// own sleep deadlines are hit exactly, so recorded call instants stay
/// precise.
pub async fn wait_for_discovery_calls(source: &ScriptedIpSource, count: usize) {
    for _ in 0..10_000 {
        if source.call_count() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    panic!(
        "discovery call count never reached {count}, got {}",
        source.call_count()
    );
}
