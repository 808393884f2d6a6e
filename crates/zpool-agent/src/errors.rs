//! Error types surfaced at the binary boundary.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Failures reported on stderr alongside the action result.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to write {document}: {source}")]
    WriteDocument {
        document: &'static str,
        #[source]
        source: io::Error,
    },
}
