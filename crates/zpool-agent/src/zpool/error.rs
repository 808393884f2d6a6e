//! Errors raised by pool tool operations.

use thiserror::Error;

use crate::process::ProcessError;

/// Errors arising from a pool tool invocation.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    /// The tool could not be run at all.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// The tool ran and reported failure.
    #[error("'zpool {operation}' for pool '{pool}' failed with status {status:?}: {stderr}")]
    Failed {
        /// Tool subcommand, such as `import`.
        operation: &'static str,
        /// Pool the operation targeted.
        pool: String,
        /// Exit status, absent when killed by a signal.
        status: Option<i32>,
        /// Trimmed standard error of the tool.
        stderr: String,
    },
}
