//! Preflight checks before the orchestrator places the resource.

use tracing::{debug, info};
use zpool_agent_config::PoolResource;

use crate::action::ActionResult;
use crate::probe::{PoolState, PoolStateProbe};
use crate::process::ProcessRunner;

const VALIDATE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::validate");

/// Confirms the pool tool is installed and the pool is importable.
#[derive(Debug)]
pub struct Validator<'a, R> {
    probe: &'a PoolStateProbe<R>,
}

impl<'a, R: ProcessRunner> Validator<'a, R> {
    /// Creates a validator reading through `probe`.
    pub const fn new(probe: &'a PoolStateProbe<R>) -> Self {
        Self { probe }
    }

    /// Reports whether the tool is present.
    pub fn ensure_installed(&self) -> ActionResult {
        if self.probe.tool().is_installed() {
            ActionResult::Success
        } else {
            info!(
                target: VALIDATE_TARGET,
                binary = %self.probe.tool().binary().display(),
                "pool tool not installed"
            );
            ActionResult::NotInstalled
        }
    }

    /// Validates the resource against this node.
    ///
    /// An attached pool is valid by definition. Otherwise the pool must
    /// appear in the import discovery listing under exactly its configured
    /// name.
    pub fn validate(&self, resource: &PoolResource) -> ActionResult {
        let installed = self.ensure_installed();
        if installed != ActionResult::Success {
            return installed;
        }

        let pool = resource.name();
        if self.probe.state(pool) == PoolState::Attached {
            debug!(target: VALIDATE_TARGET, pool, "pool imported; valid");
            return ActionResult::Success;
        }

        let candidates = self.probe.tool().discover(resource.import_args());
        if candidates.iter().any(|candidate| candidate.name == pool) {
            debug!(target: VALIDATE_TARGET, pool, "pool importable");
            ActionResult::Success
        } else {
            info!(
                target: VALIDATE_TARGET,
                pool,
                discovered = candidates.len(),
                "pool not found among importable pools"
            );
            ActionResult::Misconfigured
        }
    }
}
