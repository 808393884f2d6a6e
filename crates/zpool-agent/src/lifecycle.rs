//! Import and export of the managed pool.
//!
//! Both transitions are idempotent: the pool's current attachment state is
//! probed first and the tool is only invoked when a change is needed.
//!
//! `stop` assumes every other consumer of the pool (shares, mounts, volumes
//! handed to other resources) has already been released. The export is
//! forced, but a pool held busy still makes it fail and the pool stays
//! imported.

use tracing::{error, info};
use zpool_agent_config::PoolResource;

use crate::action::ActionResult;
use crate::probe::{PoolState, PoolStateProbe};
use crate::process::ProcessRunner;

const LIFECYCLE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::lifecycle");

/// Drives the pool between attached and unattached.
#[derive(Debug)]
pub struct LifecycleController<'a, R> {
    probe: &'a PoolStateProbe<R>,
}

impl<'a, R: ProcessRunner> LifecycleController<'a, R> {
    /// Creates a controller acting through `probe`.
    pub const fn new(probe: &'a PoolStateProbe<R>) -> Self {
        Self { probe }
    }

    /// Imports the pool unless it is already attached.
    pub fn start(&self, resource: &PoolResource) -> ActionResult {
        let pool = resource.name();
        if self.probe.state(pool) == PoolState::Attached {
            info!(target: LIFECYCLE_TARGET, pool, "pool already imported");
            return ActionResult::Success;
        }

        match self.probe.tool().import(resource) {
            Ok(()) => {
                info!(
                    target: LIFECYCLE_TARGET,
                    pool,
                    forced = resource.force_import(),
                    "pool imported"
                );
                ActionResult::Success
            }
            Err(source) => {
                error!(target: LIFECYCLE_TARGET, pool, %source, "pool import failed");
                ActionResult::GenericError
            }
        }
    }

    /// Force-exports the pool unless it is already unattached.
    pub fn stop(&self, resource: &PoolResource) -> ActionResult {
        let pool = resource.name();
        if self.probe.state(pool) == PoolState::Unattached {
            info!(target: LIFECYCLE_TARGET, pool, "pool not imported");
            return ActionResult::Success;
        }

        match self.probe.tool().export(pool) {
            Ok(()) => {
                info!(target: LIFECYCLE_TARGET, pool, "pool exported");
                ActionResult::Success
            }
            Err(source) => {
                error!(
                    target: LIFECYCLE_TARGET,
                    pool,
                    %source,
                    "pool export failed; pool remains imported"
                );
                ActionResult::GenericError
            }
        }
    }
}
