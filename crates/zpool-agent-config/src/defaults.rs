//! Default values shared by the configuration loader and the agent.

use camino::Utf8PathBuf;

use crate::logging::LogFormat;
use crate::toggle::Toggle;

/// Pool tool invoked when no explicit binary is configured.
pub const DEFAULT_ZPOOL_BINARY: &str = "zpool";

/// Directory where the kernel module exposes per-pool statistics.
pub const DEFAULT_KSTAT_ROOT: &str = "/proc/spl/kstat/zfs";

/// Default log filter expression used by the agent.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the agent.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the agent.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Pools are force-imported unless the resource says otherwise.
#[must_use]
pub const fn default_import_force() -> Toggle {
    Toggle::ENABLED
}

/// Default pool tool path.
#[must_use]
pub fn default_zpool_binary() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_ZPOOL_BINARY)
}

/// Default kernel statistics root.
#[must_use]
pub fn default_kstat_root() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_KSTAT_ROOT)
}
