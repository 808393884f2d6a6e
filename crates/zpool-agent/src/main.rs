//! Entrypoint for the ZFS pool resource agent.
//!
//! The binary delegates to [`zpool_agent::run`], which parses the action
//! word, loads the resource parameters, and reports the outcome through the
//! exit status.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    zpool_agent::run(std::env::args_os(), &mut stdout, &mut stderr)
}
