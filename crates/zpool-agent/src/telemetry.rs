//! Logging setup for one agent invocation.
//!
//! Events go to stderr only: stdout carries the `meta-data` and `usage`
//! documents the orchestrator parses, and the orchestrator folds agent
//! stderr into its own log. The subscriber is installed at most once per
//! process.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::Subscriber;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::UtcTime;

use zpool_agent_config::AgentConfig;

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Errors encountered while configuring logging.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured log filter expression does not parse.
    #[error("invalid log filter '{filter}': {reason}")]
    Filter {
        /// Filter expression as configured.
        filter: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// Another global subscriber was installed first.
    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Installs the stderr subscriber described by `config`.
///
/// Later calls in the same process are no-ops, whatever their
/// configuration.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter expression is invalid or a
/// different subscriber is already installed.
pub fn initialise(config: &AgentConfig) -> Result<(), TelemetryError> {
    INSTALLED.get_or_try_init(|| -> Result<(), TelemetryError> {
        let subscriber = build_subscriber(config, io::stderr, io::stderr().is_terminal())?;
        tracing::subscriber::set_global_default(subscriber)?;
        Ok(())
    })?;
    Ok(())
}

/// Builds a subscriber writing through `writer`.
fn build_subscriber<W>(
    config: &AgentConfig,
    writer: W,
    ansi: bool,
) -> Result<Box<dyn Subscriber + Send + Sync>, TelemetryError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(config.log_filter()).map_err(|error| TelemetryError::Filter {
        filter: config.log_filter().to_owned(),
        reason: error.to_string(),
    })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .with_timer(UtcTime::rfc_3339());

    if config.log_format().is_structured() {
        Ok(Box::new(
            builder.with_ansi(false).json().flatten_event(true).finish(),
        ))
    } else {
        Ok(Box::new(builder.with_ansi(ansi).compact().finish()))
    }
}
