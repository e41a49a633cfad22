// # IP Source Trait
//
// Defines the interface for discovering the caller's current public IP.
//
// ## Implementations
//
// - ipify (HTTP): `dyndns-ip-ipify` crate
//
// The reconciler treats the IP as an opaque string token and only ever
// compares it for equality against record answers, so implementations
// return whatever textual form their backing service reports.

use async_trait::async_trait;

use crate::error::Result;

/// Trait for public-IP discovery implementations
///
/// One outbound call per invocation, no internal retry: retrying on
/// failure is owned by the reconciliation loop, which backs off and
/// re-enters the iteration from scratch. Implementations must be
/// thread-safe and usable across async tasks.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Discover the current externally visible IP address
    ///
    /// Produced fresh on every call; implementations must not cache
    /// across calls. Connection failures, timeouts, non-2xx responses
    /// and malformed bodies all surface as `Err`, never a panic.
    async fn current_ip(&self) -> Result<String>;
}
