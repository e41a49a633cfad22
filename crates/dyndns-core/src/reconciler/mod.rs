//! Core reconciliation loop
//!
//! The Reconciler is responsible for:
//! - Discovering the current public IP via [`IpSource`]
//! - Fetching the domain's records via [`Registrar`]
//! - Computing the change set and pushing one update per stale record
//! - Driving the fixed poll/backoff timing
//!
//! ## Control Flow
//!
//! ```text
//! ┌───────────┐  iteration ok   ┌──────────────────┐
//! │  RUNNING  │────────────────▶│ sleep(poll_intvl) │──┐
//! └───────────┘                 └──────────────────┘  │
//!       ▲  │ any failure                              │
//!       │  ▼                                          │
//! ┌───────────┐                 ┌──────────────────┐  │
//! │  BACKOFF  │────────────────▶│  sleep(backoff)  │──┤
//! └───────────┘                 └──────────────────┘  │
//!       ▲                                             │
//!       └─────────────────────────────────────────────┘
//! ```
//!
//! One iteration is discover → list → diff → update each stale record in
//! listing order. Any failure, including a mid-batch update failure,
//! aborts the iteration and enters BACKOFF; the next attempt re-derives
//! everything from scratch. There is no resumption mid-iteration and no
//! exponential growth of the backoff. The loop has no terminal state; it
//! runs until a shutdown signal arrives.

use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::record::{DnsRecord, change_set};
use crate::traits::{IpSource, Registrar};

/// Loop state: either reconciling on the poll interval or delaying after
/// a failure. Modeled explicitly so the retry contract is testable rather
/// than implicit in exception flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Normal operation: reconcile, then sleep the poll interval
    Running,

    /// A failure occurred: sleep the backoff, then re-enter Running
    Backoff,
}

/// Result of one successful reconciliation iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every record already carried the current IP; nothing was written
    NoChange,

    /// These records were reissued with the current IP, in listing order
    Updated {
        /// The change set as it was applied
        records: Vec<DnsRecord>,
    },
}

/// Core reconciler
///
/// Owns the two external collaborators and the loop timing. All state
/// beyond the immutable configuration is re-derived every iteration: no
/// caching of the last-known IP, no persistence across restarts. The
/// live registrar listing is the per-iteration source of truth, so
/// redundant no-op listings on every interval are expected and correct.
pub struct Reconciler {
    /// Public-IP discovery client
    ip_source: Box<dyn IpSource>,

    /// Registrar client holding the startup credentials
    registrar: Box<dyn Registrar>,

    /// Domain whose records are reconciled
    domain: String,

    /// Delay after a successful iteration
    poll_interval: Duration,

    /// Delay after a failed iteration, constant regardless of how many
    /// consecutive failures occur
    backoff: Duration,
}

impl Reconciler {
    /// Create a new reconciler from loaded configuration
    pub fn new(ip_source: Box<dyn IpSource>, registrar: Box<dyn Registrar>, config: &Config) -> Self {
        Self {
            ip_source,
            registrar,
            domain: config.domain.clone(),
            poll_interval: config.poll_interval,
            backoff: config.backoff,
        }
    }

    /// Run the loop until a shutdown signal arrives
    ///
    /// Transient failures never terminate the loop; they are logged and
    /// answered with the fixed backoff. The only exits are external.
    pub async fn run(&self) -> Result<()> {
        self.run_internal(None).await
    }

    /// Test-only helper to run the loop with a controlled shutdown signal
    ///
    /// Production code should use [`Reconciler::run`], which relies on the
    /// daemon's OS signal handling instead of a programmatic channel.
    pub async fn run_with_shutdown(&self, shutdown_rx: oneshot::Receiver<()>) -> Result<()> {
        self.run_internal(Some(shutdown_rx)).await
    }

    async fn run_internal(&self, mut shutdown_rx: Option<oneshot::Receiver<()>>) -> Result<()> {
        info!(domain = %self.domain, "starting reconciler");

        let mut state = State::Running;

        loop {
            state = match state {
                State::Running => match self.reconcile_once().await {
                    Ok(_) => {
                        if !self.wait(self.poll_interval, shutdown_rx.as_mut()).await {
                            info!("shutdown signal received");
                            return Ok(());
                        }
                        State::Running
                    }
                    Err(e) => {
                        error!("error {e}");
                        State::Backoff
                    }
                },
                State::Backoff => {
                    // The failed attempt is not resumed; after the delay the
                    // next iteration re-fetches the IP from scratch.
                    if !self.wait(self.backoff, shutdown_rx.as_mut()).await {
                        info!("shutdown signal received");
                        return Ok(());
                    }
                    State::Running
                }
            };
        }
    }

    /// Perform one full reconciliation iteration
    ///
    /// discover → list → diff → update each stale record. Fails on the
    /// first error; a mid-batch update failure leaves the remaining
    /// records of the change set untouched for this iteration. The next
    /// successful iteration re-derives and reapplies the remaining diffs,
    /// which is safe because every update is idempotent.
    pub async fn reconcile_once(&self) -> Result<Outcome> {
        let ip = self.ip_source.current_ip().await?;
        info!("got ip {ip}");

        let records = self.registrar.list_records(&self.domain).await?;
        let changes = change_set(&records, &ip);

        if changes.is_empty() {
            info!("no changes");
            return Ok(Outcome::NoChange);
        }

        info!("changes {changes:?}");
        for record in &changes {
            self.registrar
                .update_record(&self.domain, record.id, record)
                .await?;
            info!(id = record.id, "record updated");
        }

        Ok(Outcome::Updated { records: changes })
    }

    /// Sleep for `delay`, returning false if shutdown arrives first
    async fn wait(&self, delay: Duration, shutdown_rx: Option<&mut oneshot::Receiver<()>>) -> bool {
        match shutdown_rx {
            Some(rx) => {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => true,
                    _ = rx => false,
                }
            }
            None => {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => true,
                    _ = tokio::signal::ctrl_c() => false,
                }
            }
        }
    }
}
