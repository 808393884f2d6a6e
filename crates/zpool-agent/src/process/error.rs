//! Errors raised while running external tools.
//!
//! I/O errors are wrapped in `Arc` to satisfy the `result_large_err` Clippy
//! lint and keep the error cloneable for test doubles.

use std::sync::Arc;

use thiserror::Error;

/// Errors arising from running an external program.
#[derive(Debug, Clone, Error)]
pub enum ProcessError {
    /// The program could not be spawned.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}
