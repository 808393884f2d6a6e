//! Layered configuration for the ZFS pool resource agent.
//!
//! The orchestrator hands resource parameters to the agent through the
//! environment using the `OCF_RESKEY_` prefix. [`AgentConfig`] loads them with
//! `ortho_config`, so configuration files and leading command-line flags can
//! override the environment during manual runs. The agent derives a single
//! immutable [`PoolResource`] from the loaded configuration and passes it to
//! every action handler.

use camino::{Utf8Path, Utf8PathBuf};
pub use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod defaults;
mod logging;
mod toggle;

pub use defaults::{
    DEFAULT_KSTAT_ROOT, DEFAULT_LOG_FILTER, DEFAULT_ZPOOL_BINARY, default_import_force,
    default_kstat_root, default_log_filter, default_log_filter_string, default_log_format,
    default_zpool_binary,
};
pub use logging::LogFormat;
pub use toggle::{Toggle, ToggleParseError};

/// Resolved agent configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "OCF_RESKEY")]
pub struct AgentConfig {
    /// Name of the managed pool.
    #[serde(default)]
    #[ortho_config(default = String::new())]
    pub pool: String,
    /// Flags passed through to the import invocation.
    #[serde(default)]
    #[ortho_config(default = String::new())]
    pub importargs: String,
    /// Whether imports use the force flag.
    #[serde(default = "default_import_force")]
    #[ortho_config(default = default_import_force())]
    pub importforce: Toggle,
    /// Pool tool executable.
    #[serde(default = "default_zpool_binary")]
    #[ortho_config(default = default_zpool_binary())]
    pub zpool_binary: Utf8PathBuf,
    /// Kernel statistics directory for pools.
    #[serde(default = "default_kstat_root")]
    #[ortho_config(default = default_kstat_root())]
    pub kstat_root: Utf8PathBuf,
    /// Log filter expression understood by `tracing_subscriber::EnvFilter`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            pool: String::new(),
            importargs: String::new(),
            importforce: default_import_force(),
            zpool_binary: default_zpool_binary(),
            kstat_root: default_kstat_root(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl AgentConfig {
    /// Builds a configuration for `pool` with every other value defaulted.
    #[must_use]
    pub fn for_pool(pool: impl Into<String>) -> Self {
        Self {
            pool: pool.into(),
            ..Self::default()
        }
    }

    /// Pool tool executable.
    #[must_use]
    pub fn zpool_binary(&self) -> &Utf8Path {
        self.zpool_binary.as_path()
    }

    /// Kernel statistics directory for pools.
    #[must_use]
    pub fn kstat_root(&self) -> &Utf8Path {
        self.kstat_root.as_path()
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Derives the managed pool resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingPool`] when no pool name is configured.
    pub fn resource(&self) -> Result<PoolResource, ResourceError> {
        let name = self.pool.trim();
        if name.is_empty() {
            return Err(ResourceError::MissingPool);
        }
        Ok(PoolResource {
            name: name.to_owned(),
            import_args: self
                .importargs
                .split_whitespace()
                .map(str::to_owned)
                .collect(),
            force_import: self.importforce.is_enabled(),
        })
    }
}

/// The single pool managed by one agent invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolResource {
    name: String,
    import_args: Vec<String>,
    force_import: bool,
}

impl PoolResource {
    /// Builds a resource directly, mainly for tests and embedding callers.
    #[must_use]
    pub fn new(name: impl Into<String>, import_args: Vec<String>, force_import: bool) -> Self {
        Self {
            name: name.into(),
            import_args,
            force_import,
        }
    }

    /// Pool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Import flags, already split into words.
    #[must_use]
    pub fn import_args(&self) -> &[String] {
        &self.import_args
    }

    /// Whether the import is forced.
    #[must_use]
    pub const fn force_import(&self) -> bool {
        self.force_import
    }
}

/// Errors raised while deriving a [`PoolResource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// The required pool parameter was empty or absent.
    #[error("the 'pool' parameter is required")]
    MissingPool,
}
