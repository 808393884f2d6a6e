//! Lock-free pool state from the kernel statistics directory.
//!
//! The kernel module publishes one directory per imported pool under its
//! statistics root, and newer modules add a `state` file holding the pool
//! health. Reading these never takes the pool configuration lock, unlike the
//! pool tool's listing query.

use std::fs;
use std::path::{Path, PathBuf};

use camino::Utf8Path;

const STATE_FILE: &str = "state";

/// Read-only view of the kernel statistics root for pools.
#[derive(Debug, Clone)]
pub struct KstatSource {
    root: PathBuf,
}

impl KstatSource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a source from a configured UTF-8 path.
    #[must_use]
    pub fn from_config_path(root: &Utf8Path) -> Self {
        Self::new(root.as_std_path())
    }

    /// Whether the kernel exposes pool statistics at all.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.root.is_dir()
    }

    /// Whether the kernel lists `pool` as imported.
    #[must_use]
    pub fn has_pool(&self, pool: &str) -> bool {
        self.pool_dir(pool).is_some_and(|dir| dir.is_dir())
    }

    /// Health published by the kernel for `pool`, when the module provides it.
    #[must_use]
    pub fn health(&self, pool: &str) -> Option<String> {
        let path = self.pool_dir(pool)?.join(STATE_FILE);
        fs::read_to_string(path).ok()
    }

    /// Statistics directory for `pool`, refusing names that would escape the
    /// root.
    fn pool_dir(&self, pool: &str) -> Option<PathBuf> {
        let single_component = !pool.is_empty()
            && pool != "."
            && pool != ".."
            && Path::new(pool).components().count() == 1
            && !pool.contains('/');
        single_component.then(|| self.root.join(pool))
    }
}
