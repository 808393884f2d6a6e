//! Shared doubles and fixtures for the agent's unit tests.

use std::fs;
use std::path::{Path, PathBuf};

use mockall::mock;
use rstest::fixture;
use tempfile::TempDir;
use zpool_agent_config::PoolResource;

use crate::kstat::KstatSource;
use crate::probe::PoolStateProbe;
use crate::process::{CommandOutput, ProcessError, ProcessRunner};
use crate::zpool::ZpoolTool;

/// Tool path handed to the doubles; never executed.
pub(super) const ZPOOL: &str = "/sbin/zpool";

mock! {
    pub(super) Runner {}
    impl ProcessRunner for Runner {
        fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput, ProcessError>;
        fn locate(&self, program: &Path) -> Option<PathBuf>;
    }
}

/// Compares recorded arguments against an expected word list.
pub(super) fn argv_is(args: &[String], expected: &[&str]) -> bool {
    args.iter().map(String::as_str).eq(expected.iter().copied())
}

/// Builds a runner that reports the tool as installed and expects nothing
/// else.
pub(super) fn installed_runner() -> MockRunner {
    let mut runner = MockRunner::new();
    runner
        .expect_locate()
        .returning(|program| Some(program.to_path_buf()));
    runner
}

/// Temporary kernel statistics tree.
pub(super) struct KstatTree {
    dir: TempDir,
}

impl KstatTree {
    /// Root directory of the statistics tree.
    pub(super) fn root(&self) -> PathBuf {
        self.dir.path().join("zfs")
    }

    /// Directory the kernel creates for an imported pool.
    pub(super) fn pool_dir(&self, pool: &str) -> PathBuf {
        self.root().join(pool)
    }

    /// Marks `pool` as imported, optionally publishing its health.
    pub(super) fn attach(&self, pool: &str, state: Option<&str>) {
        let dir = self.pool_dir(pool);
        fs::create_dir_all(&dir).expect("create pool statistics");
        if let Some(health) = state {
            fs::write(dir.join("state"), format!("{health}\n")).expect("write pool state");
        }
    }

    /// Removes the statistics root so probes fall back to the pool tool.
    pub(super) fn remove_root(&self) {
        fs::remove_dir_all(self.root()).expect("remove statistics root");
    }
}

#[fixture]
pub(super) fn kstat() -> KstatTree {
    let dir = TempDir::new().expect("create temp dir");
    fs::create_dir(dir.path().join("zfs")).expect("create statistics root");
    KstatTree { dir }
}

#[fixture]
pub(super) fn tank() -> PoolResource {
    PoolResource::new("tank", Vec::new(), true)
}

/// Builds a probe over `kstat` running the pool tool through `runner`.
pub(super) fn probe_with(runner: MockRunner, kstat: &KstatTree) -> PoolStateProbe<MockRunner> {
    PoolStateProbe::new(
        KstatSource::new(kstat.root()),
        ZpoolTool::new(runner, ZPOOL),
    )
}
