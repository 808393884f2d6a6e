//! The closed set of agent actions and the result codes they produce.

use std::process::ExitCode;

use strum::{Display, EnumString, IntoStaticStr};

/// Actions the orchestrator may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Action {
    /// Attach the pool on this node.
    Start,
    /// Detach the pool from this node.
    Stop,
    /// Report whether the pool is running.
    Status,
    /// Report whether the pool is running and healthy.
    Monitor,
    /// Check that the resource can be managed on this node.
    ValidateAll,
    /// Print the resource agent description.
    MetaData,
    /// Print the usage line.
    Usage,
}

impl Action {
    /// Every action, in the order the usage line lists them.
    pub const ALL: [Self; 7] = [
        Self::Start,
        Self::Stop,
        Self::Status,
        Self::Monitor,
        Self::ValidateAll,
        Self::MetaData,
        Self::Usage,
    ];

    /// Whether the action only describes the agent and needs no pool.
    #[must_use]
    pub const fn is_descriptive(self) -> bool {
        matches!(self, Self::MetaData | Self::Usage)
    }
}

/// Outcome of one action, reported to the orchestrator as the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ActionResult {
    /// The action completed; for monitors, the pool is running.
    Success,
    /// The action failed.
    GenericError,
    /// The agent was invoked with the wrong number of arguments.
    BadArguments,
    /// The requested action is not implemented.
    Unimplemented,
    /// The pool tool is not installed.
    NotInstalled,
    /// The resource parameters do not describe a manageable pool.
    Misconfigured,
    /// The pool is not running on this node.
    NotRunning,
}

impl ActionResult {
    /// Numeric exit status in the orchestrator's resource agent convention.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::GenericError => 1,
            Self::BadArguments => 2,
            Self::Unimplemented => 3,
            Self::NotInstalled => 5,
            Self::Misconfigured => 6,
            Self::NotRunning => 7,
        }
    }
}

impl From<ActionResult> for ExitCode {
    fn from(result: ActionResult) -> Self {
        Self::from(result.code())
    }
}
