// # dyndnsd - dynamic-DNS daemon
//
// Thin integration layer only. The daemon is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing tracing and the tokio runtime
// 3. Wiring the ipify discovery client and the name.com registrar client
//    into the core reconciler
// 4. Running the loop until SIGINT/SIGTERM
//
// All reconciliation logic lives in dyndns-core.
//
// ## Configuration
//
// Required:
// - `DOMAIN`: registrar domain whose records are managed
// - `USERNAME`: name.com account username
// - `TOKEN`: name.com API token (Basic auth, paired with USERNAME)
//
// Optional:
// - `POLL_INTERVAL_SECS`: delay between successful iterations (default 300)
// - `BACKOFF_SECS`: delay after a failed iteration (default 120)
// - `LOG_LEVEL`: trace, debug, info, warn or error (default info)
//
// ## Example
//
// ```bash
// export DOMAIN=example.com
// export USERNAME=pedro
// export TOKEN=your_token
//
// dyndnsd
// ```

use std::env;
use std::process::ExitCode;

use anyhow::Result;
use dyndns_core::{Config, Reconciler};
use dyndns_ip_ipify::IpifyClient;
use dyndns_registrar_namecom::NameComClient;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes following systemd conventions
#[derive(Debug, Clone, Copy)]
enum DaemonExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DaemonExitCode> for ExitCode {
    fn from(code: DaemonExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Parse a log level name, rejecting unknown values instead of silently
/// falling back
fn parse_log_level(value: &str) -> Result<Level, String> {
    match value.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(format!(
            "LOG_LEVEL '{other}' is not valid. Valid levels: trace, debug, info, warn, error"
        )),
    }
}

fn main() -> ExitCode {
    // Fail fast on configuration before any network call
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            return DaemonExitCode::ConfigError.into();
        }
    };

    let raw_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_level = match parse_log_level(&raw_level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{e}");
            return DaemonExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {e}");
        return DaemonExitCode::ConfigError.into();
    }

    info!("starting dyndnsd");
    info!(domain = %config.domain, "configuration loaded");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create tokio runtime: {e}");
            return DaemonExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run_daemon(config).await {
            Ok(()) => DaemonExitCode::CleanShutdown,
            Err(e) => {
                error!("daemon error: {e}");
                DaemonExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Wire the clients into the reconciler and run until a signal arrives
async fn run_daemon(config: Config) -> Result<()> {
    let ip_source = Box::new(IpifyClient::new());
    let registrar = Box::new(NameComClient::new(&config.username, &config.token));
    let reconciler = Reconciler::new(ip_source, registrar, &config);

    #[cfg(unix)]
    {
        // The loop itself handles SIGINT between suspension points;
        // SIGTERM is what systemd sends, so handle it here as well.
        let mut sigterm = signal(SignalKind::terminate())
            .map_err(|e| anyhow::anyhow!("failed to setup SIGTERM handler: {e}"))?;

        tokio::select! {
            result = reconciler.run() => result?,
            _ = sigterm.recv() => info!("SIGTERM received, shutting down"),
        }
    }

    #[cfg(not(unix))]
    reconciler.run().await?;

    Ok(())
}
