//! Error types for the reconciler
//!
//! Two kinds of failure exist in this system: configuration errors, which
//! are fatal and stop the daemon before any network call, and network-ish
//! errors from the discovery or registrar clients, which are caught by the
//! reconciliation loop and answered with a fixed backoff.

use thiserror::Error;

/// Result type alias for reconciler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the dynamic-DNS reconciler
#[derive(Error, Debug)]
pub enum Error {
    /// A required configuration value is missing or blank. Fatal.
    #[error("configuration error: {0}")]
    Config(String),

    /// IP discovery failed (connection, timeout, bad status, bad body)
    #[error("ip discovery error: {0}")]
    Discovery(String),

    /// A registrar call failed (connection, timeout, bad status, bad body)
    #[error("registrar error: {0}")]
    Registrar(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an IP discovery error
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    /// Create a registrar error
    pub fn registrar(msg: impl Into<String>) -> Self {
        Self::Registrar(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
