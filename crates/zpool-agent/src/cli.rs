//! Command-line surface of the agent.
//!
//! The orchestrator invokes the agent with exactly one action word. Arity
//! and action names are checked after parsing so the results map onto the
//! agent's exit codes rather than clap's own error handling.

use clap::Parser;

/// Command-line interface for the pool agent.
#[derive(Parser, Debug)]
#[command(
    name = "zpool-agent",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub(crate) struct Cli {
    /// The action to perform (for example `monitor`).
    #[arg(
        value_name = "ACTION",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub(crate) words: Vec<String>,
}
