// # dyndns-core
//
// Core library for the dynamic-DNS reconciler.
//
// ## Architecture Overview
//
// This library provides everything except the actual HTTP clients:
// - **IpSource**: Trait for discovering the current public IP
// - **Registrar**: Trait for listing and updating DNS records
// - **Reconciler**: The poll/backoff loop tying the two together
// - **Config**: Environment-based startup configuration
//
// ## Design Principles
//
// 1. **Separation of Concerns**: the loop never sees HTTP, only traits
// 2. **Stateless Iterations**: every pass re-derives the diff from the
//    live registrar listing; nothing is cached or persisted
// 3. **Uniform Retry**: any failure, transient or not, gets the same
//    fixed backoff and a full fresh iteration

pub mod config;
pub mod error;
pub mod record;
pub mod reconciler;
pub mod traits;

// Re-export core types for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use reconciler::{Outcome, Reconciler, State};
pub use record::{DnsRecord, change_set};
pub use traits::{IpSource, Registrar};
