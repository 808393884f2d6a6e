//! Discovery of a pool's attachment state and health.
//!
//! Every probe re-derives state from the storage subsystem; nothing is cached
//! between calls, so an action may be aborted and re-invoked at any point.

use tracing::debug;

use crate::kstat::KstatSource;
use crate::process::ProcessRunner;
use crate::zpool::{PoolHealth, ZpoolTool};

const PROBE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::probe");

/// Whether a pool is attached to this node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// The pool is not imported here.
    Unattached,
    /// The pool is imported here.
    Attached,
}

/// Probes pool state, preferring the kernel statistics directory over the
/// pool tool's listing query.
#[derive(Debug, Clone)]
pub struct PoolStateProbe<R> {
    kstat: KstatSource,
    tool: ZpoolTool<R>,
}

impl<R> PoolStateProbe<R> {
    /// Creates a probe from its two evidence sources.
    pub const fn new(kstat: KstatSource, tool: ZpoolTool<R>) -> Self {
        Self { kstat, tool }
    }

    /// The pool tool used for fallback queries and transitions.
    pub const fn tool(&self) -> &ZpoolTool<R> {
        &self.tool
    }
}

impl<R: ProcessRunner> PoolStateProbe<R> {
    /// Determines whether `pool` is attached.
    ///
    /// Absence of evidence, including a tool that cannot run, is reported as
    /// [`PoolState::Unattached`].
    pub fn state(&self, pool: &str) -> PoolState {
        let attached = if self.kstat.is_available() {
            let present = self.kstat.has_pool(pool);
            debug!(target: PROBE_TARGET, pool, present, "probed kernel statistics");
            present
        } else {
            let listed = self.tool.is_listed(pool);
            debug!(target: PROBE_TARGET, pool, listed, "probed pool listing");
            listed
        };
        if attached {
            PoolState::Attached
        } else {
            PoolState::Unattached
        }
    }

    /// Reads the health of an attached `pool`.
    ///
    /// The kernel's state file wins when present; otherwise the listing
    /// query's health column is used. A report from neither source is
    /// [`PoolHealth::Unknown`].
    pub fn health(&self, pool: &str) -> PoolHealth {
        let report = self.kstat.health(pool).or_else(|| self.tool.health(pool));
        let health = report.map_or_else(
            || PoolHealth::Unknown(String::new()),
            |raw| PoolHealth::parse(&raw),
        );
        debug!(target: PROBE_TARGET, pool, health = health.as_str(), "probed pool health");
        health
    }
}
