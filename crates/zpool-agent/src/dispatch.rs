//! Routing of actions to their handlers.
//!
//! Every [`Action`] maps to exactly one handler. Handlers that manage the
//! pool need a [`PoolResource`]; when the configuration cannot provide one
//! the action is reported as misconfigured without touching the pool.

use tracing::{debug, error, info};
use zpool_agent_config::{AgentConfig, PoolResource};

use crate::action::{Action, ActionResult};
use crate::kstat::KstatSource;
use crate::lifecycle::LifecycleController;
use crate::monitor::HealthMonitor;
use crate::probe::PoolStateProbe;
use crate::process::ProcessRunner;
use crate::validate::Validator;
use crate::zpool::ZpoolTool;

/// Tracing target for dispatch operations.
const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Single entry point mapping actions onto handlers.
#[derive(Debug)]
pub struct ActionDispatcher<R> {
    probe: PoolStateProbe<R>,
}

impl<R> ActionDispatcher<R> {
    /// Creates a dispatcher around `probe`.
    pub const fn new(probe: PoolStateProbe<R>) -> Self {
        Self { probe }
    }

    /// Builds a dispatcher for the configured tool and statistics root.
    pub fn from_config(runner: R, config: &AgentConfig) -> Self {
        let tool = ZpoolTool::from_config_path(runner, config.zpool_binary());
        let kstat = KstatSource::from_config_path(config.kstat_root());
        Self::new(PoolStateProbe::new(kstat, tool))
    }
}

impl<R: ProcessRunner> ActionDispatcher<R> {
    /// Runs `action` against the configured pool.
    ///
    /// `meta-data` and `usage` have no pool effect; their documents are
    /// written by the caller, so they succeed here unconditionally.
    pub fn dispatch(&self, action: Action, config: &AgentConfig) -> ActionResult {
        info!(target: DISPATCH_TARGET, %action, pool = %config.pool, "dispatching action");
        let result = match action {
            Action::Start => {
                Self::with_resource(config, |resource| {
                    LifecycleController::new(&self.probe).start(resource)
                })
            }
            Action::Stop => {
                Self::with_resource(config, |resource| {
                    LifecycleController::new(&self.probe).stop(resource)
                })
            }
            Action::Status | Action::Monitor => Self::with_resource(config, |resource| {
                HealthMonitor::new(&self.probe).monitor(resource)
            }),
            Action::ValidateAll => self.validate_all(config),
            Action::MetaData | Action::Usage => ActionResult::Success,
        };
        debug!(target: DISPATCH_TARGET, %action, %result, "action finished");
        result
    }

    /// A missing tool outranks a missing pool name, so `validate-all`
    /// reports it regardless of the other parameters.
    fn validate_all(&self, config: &AgentConfig) -> ActionResult {
        let validator = Validator::new(&self.probe);
        match config.resource() {
            Ok(resource) => validator.validate(&resource),
            Err(source) => match validator.ensure_installed() {
                ActionResult::Success => {
                    error!(target: DISPATCH_TARGET, %source, "invalid resource parameters");
                    ActionResult::Misconfigured
                }
                other => other,
            },
        }
    }

    fn with_resource<F>(config: &AgentConfig, handler: F) -> ActionResult
    where
        F: FnOnce(&PoolResource) -> ActionResult,
    {
        match config.resource() {
            Ok(resource) => handler(&resource),
            Err(source) => {
                error!(target: DISPATCH_TARGET, %source, "invalid resource parameters");
                ActionResult::Misconfigured
            }
        }
    }
}
