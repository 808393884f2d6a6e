//! Execution of the external pool tool.
//!
//! Every call the agent makes to the outside world goes through the
//! [`ProcessRunner`] trait. The production implementation is
//! [`SystemRunner`], which spawns the program with `std::process::Command`
//! and blocks until it exits. Tests substitute doubles that record the
//! invocations and return canned output without touching real pools.

mod error;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use tracing::debug;

pub use self::error::ProcessError;

/// Tracing target for process operations.
const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");

/// Captured result of a finished program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status, or `None` when the program was killed by a signal.
    pub status: Option<i32>,
    /// Captured standard output, decoded lossily.
    pub stdout: String,
    /// Captured standard error, decoded lossily.
    pub stderr: String,
}

impl CommandOutput {
    /// Output of a program that exited with status zero.
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Output of a program that exited with `status` and wrote `stderr`.
    #[must_use]
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the program exited with status zero.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, Some(0))
    }
}

/// Trait abstracting external program execution for testability.
///
/// Implementations block until the program exits. No timeout is enforced:
/// the orchestrator owns timeout policy and kills the agent on expiry.
pub trait ProcessRunner {
    /// Runs `program` with `args` and captures its output.
    ///
    /// A non-zero exit is not an error; callers inspect
    /// [`CommandOutput::status`].
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessError`] when the program cannot be spawned.
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput, ProcessError>;

    /// Resolves `program` to an executable path, or `None` when absent.
    fn locate(&self, program: &Path) -> Option<PathBuf>;
}

impl<T: ProcessRunner + ?Sized> ProcessRunner for &T {
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput, ProcessError> {
        (**self).run(program, args)
    }

    fn locate(&self, program: &Path) -> Option<PathBuf> {
        (**self).locate(program)
    }
}

/// Runs programs as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput, ProcessError> {
        debug!(
            target: PROCESS_TARGET,
            program = %program.display(),
            ?args,
            "running external tool"
        );

        let output = Command::new(program)
            .args(args.iter().map(OsStr::new))
            .output()
            .map_err(|source| ProcessError::Spawn {
                program: program.display().to_string(),
                source: Arc::new(source),
            })?;

        let captured = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            target: PROCESS_TARGET,
            program = %program.display(),
            status = ?captured.status,
            "external tool exited"
        );
        Ok(captured)
    }

    fn locate(&self, program: &Path) -> Option<PathBuf> {
        which::which(program).ok()
    }
}
