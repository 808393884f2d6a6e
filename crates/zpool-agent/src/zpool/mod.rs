//! The external pool tool and its output formats.
//!
//! [`ZpoolTool`] owns the exact argument lists for every invocation the agent
//! makes, so the lifecycle and validation logic never assemble command lines
//! themselves. Output is handed to the structured parsers in [`parse`].

mod error;
pub mod parse;

use std::path::{Path, PathBuf};

use camino::Utf8Path;
use tracing::{debug, warn};
use zpool_agent_config::PoolResource;

use crate::process::{CommandOutput, ProcessRunner};

pub use self::error::ToolError;
pub use self::parse::{ImportCandidate, PoolHealth, parse_import_candidates};

const TOOL_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::zpool");

/// Import option keeping the pool out of the persistent cache file, so the
/// orchestrator alone decides which node imports it after a reboot.
const NO_CACHEFILE: [&str; 2] = ["-o", "cachefile=none"];

/// Invokes the pool tool through a [`ProcessRunner`].
#[derive(Debug, Clone)]
pub struct ZpoolTool<R> {
    runner: R,
    binary: PathBuf,
}

impl<R> ZpoolTool<R> {
    /// Creates a tool wrapper running `binary` through `runner`.
    pub fn new(runner: R, binary: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }

    /// Creates a tool wrapper from a configured UTF-8 path.
    pub fn from_config_path(runner: R, binary: &Utf8Path) -> Self {
        Self::new(runner, binary.as_std_path())
    }

    /// Configured tool path.
    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl<R: ProcessRunner> ZpoolTool<R> {
    /// Whether the tool can be found on this system.
    pub fn is_installed(&self) -> bool {
        let located = self.runner.locate(&self.binary);
        debug!(
            target: TOOL_TARGET,
            binary = %self.binary.display(),
            found = located.is_some(),
            "checked for pool tool"
        );
        located.is_some()
    }

    /// Whether the listing query knows `pool`.
    ///
    /// Any failure, including an unrunnable tool, counts as "not listed".
    pub fn is_listed(&self, pool: &str) -> bool {
        let args = [String::from("list"), String::from("-H"), pool.to_owned()];
        self.query(&args).is_some()
    }

    /// Health column of the listing query, or `None` when the query failed.
    pub fn health(&self, pool: &str) -> Option<String> {
        let args = [
            String::from("list"),
            String::from("-H"),
            String::from("-o"),
            String::from("health"),
            pool.to_owned(),
        ];
        self.query(&args).map(|output| output.stdout)
    }

    /// Lists pools that could be imported with `import_args`, without
    /// importing anything.
    pub fn discover(&self, import_args: &[String]) -> Vec<ImportCandidate> {
        let mut args = vec![String::from("import")];
        args.extend(import_args.iter().cloned());
        match self.runner.run(&self.binary, &args) {
            Ok(output) => {
                if !output.is_success() {
                    debug!(
                        target: TOOL_TARGET,
                        status = ?output.status,
                        stderr = %output.stderr.trim(),
                        "import discovery reported failure"
                    );
                }
                parse_import_candidates(&output.stdout)
            }
            Err(error) => {
                warn!(target: TOOL_TARGET, %error, "import discovery could not run");
                Vec::new()
            }
        }
    }

    /// Imports the resource's pool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] when the tool cannot run or reports failure.
    pub fn import(&self, resource: &PoolResource) -> Result<(), ToolError> {
        self.execute("import", resource.name(), &import_arguments(resource))
    }

    /// Force-exports `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] when the tool cannot run or reports failure,
    /// including when the pool is still busy.
    pub fn export(&self, pool: &str) -> Result<(), ToolError> {
        let args = [String::from("export"), String::from("-f"), pool.to_owned()];
        self.execute("export", pool, &args)
    }

    fn query(&self, args: &[String]) -> Option<CommandOutput> {
        match self.runner.run(&self.binary, args) {
            Ok(output) if output.is_success() => Some(output),
            Ok(output) => {
                debug!(
                    target: TOOL_TARGET,
                    ?args,
                    status = ?output.status,
                    "listing query reported failure"
                );
                None
            }
            Err(error) => {
                debug!(target: TOOL_TARGET, ?args, %error, "listing query could not run");
                None
            }
        }
    }

    fn execute(&self, operation: &'static str, pool: &str, args: &[String]) -> Result<(), ToolError> {
        let output = self.runner.run(&self.binary, args)?;
        if output.is_success() {
            return Ok(());
        }
        Err(ToolError::Failed {
            operation,
            pool: pool.to_owned(),
            status: output.status,
            stderr: output.stderr.trim().to_owned(),
        })
    }
}

/// Builds `import <importargs...> [-f] -o cachefile=none <pool>`.
fn import_arguments(resource: &PoolResource) -> Vec<String> {
    let mut args = vec![String::from("import")];
    args.extend(resource.import_args().iter().cloned());
    if resource.force_import() {
        args.push(String::from("-f"));
    }
    args.extend(NO_CACHEFILE.iter().map(|arg| (*arg).to_owned()));
    args.push(resource.name().to_owned());
    args
}
