//! Cluster resource agent for a ZFS storage pool.
//!
//! The orchestrator runs the agent with one action word (`start`, `stop`,
//! `monitor`, `status`, `validate-all`, `meta-data`, `usage`) and reads the
//! outcome from the exit status. Resource parameters arrive through the
//! environment and are loaded once into an immutable
//! [`zpool_agent_config::AgentConfig`].
//!
//! Each invocation is short-lived and single-threaded. State is never kept
//! between invocations: every handler re-probes the storage subsystem,
//! preferring the kernel statistics directory over the pool tool, and runs
//! at most one import or export. The agent performs no retries and enforces
//! no timeouts; both belong to the orchestrator.
//!
//! All external programs run through the [`process::ProcessRunner`] trait so
//! the handlers can be exercised without real pools.

use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use zpool_agent_config::default_zpool_binary;

pub mod action;
mod cli;
mod config;
pub mod dispatch;
mod errors;
pub mod kstat;
pub mod lifecycle;
pub mod metadata;
pub mod monitor;
pub mod probe;
pub mod process;
pub mod telemetry;
pub mod validate;
pub mod zpool;

pub use action::{Action, ActionResult};
use cli::Cli;
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub use dispatch::ActionDispatcher;
use errors::AppError;
use process::{ProcessRunner, SystemRunner};

/// Program name used in usage text when argv is empty.
const DEFAULT_PROGRAM: &str = "zpool-agent";

/// Bundles the IO streams provided to the agent runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

struct AgentRunner<'a, W: Write, E: Write, L: ConfigLoader, R: ProcessRunner> {
    io: IoStreams<'a, W, E>,
    loader: &'a L,
    runner: R,
}

impl<'a, W, E, L, R> AgentRunner<'a, W, E, L, R>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
    R: ProcessRunner,
{
    const fn new(io: IoStreams<'a, W, E>, loader: &'a L, runner: R) -> Self {
        Self { io, loader, runner }
    }

    fn run<I>(&mut self, args: I) -> ActionResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);
        let program = program_name(&args);

        let action = match parse_action(&args, &split) {
            Ok(action) => action,
            Err(result) => {
                if let Err(source) = metadata::write_usage(&mut *self.io.stderr, &program) {
                    report(&mut *self.io.stderr, &AppError::WriteDocument {
                        document: "usage",
                        source,
                    });
                }
                return result;
            }
        };

        if action.is_descriptive() {
            self.describe(action, &program)
        } else {
            self.run_pool_action(action, &split.config_arguments)
        }
    }

    /// Writes the document for `meta-data` or `usage` without loading any
    /// configuration.
    fn describe(&mut self, action: Action, program: &str) -> ActionResult {
        if action == Action::Usage {
            self.emit("usage", |stdout| metadata::write_usage(stdout, program))
        } else {
            self.emit("meta-data", metadata::write_metadata)
        }
    }

    fn emit<F>(&mut self, document: &'static str, write: F) -> ActionResult
    where
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        match write(&mut *self.io.stdout) {
            Ok(()) => ActionResult::Success,
            Err(source) => {
                report(&mut *self.io.stderr, &AppError::WriteDocument { document, source });
                ActionResult::GenericError
            }
        }
    }

    fn run_pool_action(&mut self, action: Action, config_arguments: &[OsString]) -> ActionResult {
        let config = match self.loader.load(config_arguments) {
            Ok(config) => config,
            Err(error) => {
                report(&mut *self.io.stderr, &error);
                return self.configuration_failure(action);
            }
        };

        if let Err(error) = telemetry::initialise(&config) {
            report(&mut *self.io.stderr, &AppError::from(error));
        }

        ActionDispatcher::from_config(&self.runner, &config).dispatch(action, &config)
    }

    /// Result for an action whose configuration failed to load.
    ///
    /// `validate-all` still reports a missing default tool first.
    fn configuration_failure(&self, action: Action) -> ActionResult {
        if action == Action::ValidateAll
            && self
                .runner
                .locate(default_zpool_binary().as_std_path())
                .is_none()
        {
            ActionResult::NotInstalled
        } else {
            ActionResult::Misconfigured
        }
    }
}

/// Runs the agent using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let io = IoStreams::new(stdout, stderr);
    run_with(args, io, &OrthoConfigLoader, SystemRunner).into()
}

/// Runs the agent with substituted configuration and process collaborators.
pub(crate) fn run_with<I, W, E, L, R>(
    args: I,
    io: IoStreams<'_, W, E>,
    loader: &L,
    runner: R,
) -> ActionResult
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
    R: ProcessRunner,
{
    AgentRunner::new(io, loader, runner).run(args)
}

/// Checks arity and maps the single action word onto [`Action`].
fn parse_action(args: &[OsString], split: &ConfigArgumentSplit) -> Result<Action, ActionResult> {
    let cli = Cli::try_parse_from(prepare_cli_arguments(args, split))
        .map_err(|_| ActionResult::BadArguments)?;
    let [word] = cli.words.as_slice() else {
        return Err(ActionResult::BadArguments);
    };
    word.parse::<Action>().map_err(|_| ActionResult::Unimplemented)
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.iter()
        .take(1)
        .chain(args.iter().skip(split.command_start.max(1)))
        .cloned()
        .collect()
}

fn program_name(args: &[OsString]) -> String {
    args.first()
        .and_then(|program| Path::new(program).file_name())
        .map_or_else(
            || String::from(DEFAULT_PROGRAM),
            |name| name.to_string_lossy().into_owned(),
        )
}

fn report<E: Write>(stderr: &mut E, message: &dyn fmt::Display) {
    // Nothing useful remains to be done when stderr itself is gone.
    drop(writeln!(stderr, "{message}"));
}

#[cfg(test)]
mod tests;
