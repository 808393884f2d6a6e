//! Health classification of the managed pool.

use tracing::{debug, warn};
use zpool_agent_config::PoolResource;

use crate::action::ActionResult;
use crate::probe::{PoolState, PoolStateProbe};
use crate::process::ProcessRunner;
use crate::zpool::PoolHealth;

const MONITOR_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::monitor");

/// Classifies the pool as running, not running, or indeterminate.
#[derive(Debug)]
pub struct HealthMonitor<'a, R> {
    probe: &'a PoolStateProbe<R>,
}

impl<'a, R: ProcessRunner> HealthMonitor<'a, R> {
    /// Creates a monitor reading through `probe`.
    pub const fn new(probe: &'a PoolStateProbe<R>) -> Self {
        Self { probe }
    }

    /// Reports whether the pool is running on this node.
    pub fn monitor(&self, resource: &PoolResource) -> ActionResult {
        let pool = resource.name();
        if self.probe.state(pool) == PoolState::Unattached {
            debug!(target: MONITOR_TARGET, pool, "pool not imported");
            return ActionResult::NotRunning;
        }

        let health = self.probe.health(pool);
        let result = classify(&health);
        if result == ActionResult::GenericError {
            warn!(
                target: MONITOR_TARGET,
                pool,
                health = health.as_str(),
                "unrecognised pool health"
            );
        }
        result
    }
}

/// Maps a health report onto the monitor result.
///
/// Degraded pools still serve I/O and count as running; device-level
/// degradation is left to dedicated storage monitoring. Unknown reports fail
/// closed.
#[must_use]
pub fn classify(health: &PoolHealth) -> ActionResult {
    match health {
        PoolHealth::Online | PoolHealth::Degraded => ActionResult::Success,
        PoolHealth::Faulted => ActionResult::NotRunning,
        PoolHealth::Unknown(_) => ActionResult::GenericError,
    }
}
