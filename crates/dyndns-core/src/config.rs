//! Configuration types for the reconciler
//!
//! All configuration comes from the process environment. The three
//! registrar settings are required and validated at startup; the loop
//! timings have defaults and exist as tuning knobs only.

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default polling interval between successful iterations (5 minutes)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Default delay after a failed iteration (2 minutes)
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(2 * 60);

/// Required environment variables
const ENV_DOMAIN: &str = "DOMAIN";
const ENV_USERNAME: &str = "USERNAME";
const ENV_TOKEN: &str = "TOKEN";

/// Optional loop-timing overrides (seconds)
const ENV_POLL_INTERVAL_SECS: &str = "POLL_INTERVAL_SECS";
const ENV_BACKOFF_SECS: &str = "BACKOFF_SECS";

/// Startup configuration for the reconciler
///
/// Immutable after [`Config::from_env`] returns. The token never appears
/// in logs; the Debug implementation redacts it.
#[derive(Clone)]
pub struct Config {
    /// Registrar domain whose records are managed
    pub domain: String,

    /// Registrar account username
    pub username: String,

    /// Registrar API token (paired with username for HTTP Basic auth)
    pub token: String,

    /// Delay between successful reconciliation iterations
    pub poll_interval: Duration,

    /// Delay before retrying after a failed iteration
    pub backoff: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("domain", &self.domain)
            .field("username", &self.username)
            .field("token", &"<REDACTED>")
            .field("poll_interval", &self.poll_interval)
            .field("backoff", &self.backoff)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// `DOMAIN`, `USERNAME` and `TOKEN` are required and must be non-blank
    /// after trimming. A missing or blank value fails with a
    /// [`Error::Config`] naming the variable, before any network call is
    /// made. No defaults, no partial configs.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an injectable lookup function
    ///
    /// `from_env` delegates here; tests pass closures over maps instead of
    /// mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let domain = required(&lookup, ENV_DOMAIN)?;
        let username = required(&lookup, ENV_USERNAME)?;
        let token = required(&lookup, ENV_TOKEN)?;

        let poll_interval = duration_secs(&lookup, ENV_POLL_INTERVAL_SECS)?
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        let backoff = duration_secs(&lookup, ENV_BACKOFF_SECS)?.unwrap_or(DEFAULT_BACKOFF);

        Ok(Self {
            domain,
            username,
            token,
            poll_interval,
            backoff,
        })
    }
}

/// Read a required value, trimmed, rejecting absent or blank settings
fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    match lookup(key) {
        Some(value) => {
            let value = value.trim();
            if value.is_empty() {
                Err(Error::config(format!("{key} must not be blank")))
            } else {
                Ok(value.to_string())
            }
        }
        None => Err(Error::config(format!("{key} is required"))),
    }
}

/// Read an optional duration given in whole seconds
fn duration_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<Duration>> {
    match lookup(key) {
        Some(value) => {
            let secs: u64 = value
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("{key} must be a number of seconds")))?;
            if secs == 0 {
                return Err(Error::config(format!("{key} must be greater than 0")));
            }
            Ok(Some(Duration::from_secs(secs)))
        }
        None => Ok(None),
    }
}
