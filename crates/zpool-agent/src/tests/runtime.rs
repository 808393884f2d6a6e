//! Argument handling and document output of the agent runtime.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;

use camino::Utf8PathBuf;
use rstest::rstest;
use tempfile::TempDir;
use zpool_agent_config::AgentConfig;

use super::support::{KstatTree, MockRunner, kstat};
use crate::action::ActionResult;
use crate::config::OrthoConfigLoader;
use crate::errors::AppError;
use crate::{ConfigLoader, IoStreams, run_with};

const USAGE: &str = "usage: zpool-agent {start|stop|status|monitor|validate-all|meta-data|usage}\n";

/// Loader returning a fixed configuration and recording the flags it saw.
struct StaticConfigLoader {
    config: AgentConfig,
    seen: RefCell<Option<Vec<OsString>>>,
}

impl StaticConfigLoader {
    fn new(config: AgentConfig) -> Self {
        Self {
            config,
            seen: RefCell::new(None),
        }
    }

    fn seen(&self) -> Option<Vec<OsString>> {
        self.seen.borrow().clone()
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<AgentConfig, AppError> {
        self.seen.replace(Some(args.to_vec()));
        Ok(self.config.clone())
    }
}

/// Captured result and streams of one agent invocation.
struct Invocation {
    result: ActionResult,
    stdout: String,
    stderr: String,
}

fn invoke<L: ConfigLoader>(args: &[&str], loader: &L, runner: &MockRunner) -> Invocation {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let result = run_with(
        args.iter().map(OsString::from),
        IoStreams::new(&mut stdout, &mut stderr),
        loader,
        runner,
    );
    Invocation {
        result,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}

fn config_for(kstat: &KstatTree) -> AgentConfig {
    AgentConfig {
        kstat_root: Utf8PathBuf::from_path_buf(kstat.root()).expect("utf8 temp path"),
        ..AgentConfig::for_pool("tank")
    }
}

#[rstest]
#[case::no_action(&["zpool-agent"])]
#[case::two_actions(&["zpool-agent", "start", "stop"])]
#[case::trailing_word(&["zpool-agent", "monitor", "now"])]
fn wrong_arity_prints_usage_to_stderr(#[case] args: &[&str]) {
    let loader = StaticConfigLoader::new(AgentConfig::for_pool("tank"));
    let outcome = invoke(args, &loader, &MockRunner::new());

    assert_eq!(outcome.result, ActionResult::BadArguments);
    assert_eq!(outcome.stderr, USAGE);
    assert!(outcome.stdout.is_empty());
    assert!(loader.seen().is_none(), "configuration should not be loaded");
}

#[rstest]
#[case("promote")]
#[case("START")]
fn unknown_action_is_unimplemented(#[case] word: &str) {
    let loader = StaticConfigLoader::new(AgentConfig::for_pool("tank"));
    let outcome = invoke(&["zpool-agent", word], &loader, &MockRunner::new());

    assert_eq!(outcome.result, ActionResult::Unimplemented);
    assert_eq!(outcome.stderr, USAGE);
    assert!(loader.seen().is_none());
}

#[test]
fn metadata_goes_to_stdout_without_configuration() {
    let loader = StaticConfigLoader::new(AgentConfig::default());
    let outcome = invoke(&["zpool-agent", "meta-data"], &loader, &MockRunner::new());

    assert_eq!(outcome.result, ActionResult::Success);
    assert!(outcome.stdout.contains("<resource-agent name=\"ZFS\" version=\"1.0\">"));
    assert!(outcome.stderr.is_empty());
    assert!(loader.seen().is_none());
}

#[test]
fn usage_names_the_invoked_program() {
    let loader = StaticConfigLoader::new(AgentConfig::default());
    let outcome = invoke(
        &["/usr/lib/ocf/resource.d/heartbeat/ZFS", "usage"],
        &loader,
        &MockRunner::new(),
    );

    assert_eq!(outcome.result, ActionResult::Success);
    assert_eq!(
        outcome.stdout,
        "usage: ZFS {start|stop|status|monitor|validate-all|meta-data|usage}\n"
    );
}

#[rstest]
fn leading_flags_reach_the_loader(kstat: KstatTree) {
    kstat.attach("tank", Some("ONLINE"));
    let loader = StaticConfigLoader::new(config_for(&kstat));
    let outcome = invoke(
        &["zpool-agent", "--pool", "tank", "--importforce=no", "monitor"],
        &loader,
        &MockRunner::new(),
    );

    assert_eq!(outcome.result, ActionResult::Success);
    let seen: Vec<OsString> = ["zpool-agent", "--pool", "tank", "--importforce=no"]
        .into_iter()
        .map(OsString::from)
        .collect();
    assert_eq!(loader.seen(), Some(seen));
}

#[rstest]
#[case("ONLINE", ActionResult::Success)]
#[case("FAULTED", ActionResult::NotRunning)]
fn monitor_runs_through_the_runtime(
    kstat: KstatTree,
    #[case] state: &str,
    #[case] expected: ActionResult,
) {
    kstat.attach("tank", Some(state));
    let loader = StaticConfigLoader::new(config_for(&kstat));
    let outcome = invoke(&["zpool-agent", "monitor"], &loader, &MockRunner::new());

    assert_eq!(outcome.result, expected);
    assert!(outcome.stdout.is_empty());
}

fn broken_config() -> (TempDir, String) {
    let dir = TempDir::new().expect("create temp dir");
    let file = dir.path().join("agent.toml");
    fs::write(&file, "pool = [").expect("write config");
    let path = file.to_str().expect("utf8 temp path").to_owned();
    (dir, path)
}

#[test]
fn unreadable_configuration_is_misconfigured() -> anyhow::Result<()> {
    let (_dir, path) = broken_config();
    let outcome = invoke(
        &["zpool-agent", "--config-path", &path, "monitor"],
        &OrthoConfigLoader,
        &MockRunner::new(),
    );

    assert_eq!(outcome.result, ActionResult::Misconfigured);
    anyhow::ensure!(
        outcome.stderr.contains("failed to load configuration"),
        "unexpected stderr: {}",
        outcome.stderr
    );
    Ok(())
}

#[rstest]
#[case(None, ActionResult::NotInstalled)]
#[case(Some("/sbin/zpool"), ActionResult::Misconfigured)]
fn validate_with_unreadable_configuration_checks_default_tool(
    #[case] located: Option<&'static str>,
    #[case] expected: ActionResult,
) {
    let (_dir, path) = broken_config();
    let mut runner = MockRunner::new();
    runner
        .expect_locate()
        .withf(|program| program == std::path::Path::new("zpool"))
        .times(1)
        .returning(move |_| located.map(std::path::PathBuf::from));
    let outcome = invoke(
        &["zpool-agent", "--config-path", &path, "validate-all"],
        &OrthoConfigLoader,
        &runner,
    );

    assert_eq!(outcome.result, expected);
}

#[rstest]
fn loaded_flags_reach_the_dispatcher(kstat: KstatTree) {
    kstat.attach("tank", Some("DEGRADED"));
    let root_path = kstat.root();
    let root = root_path.to_str().expect("utf8 temp path");
    let outcome = invoke(
        &["zpool-agent", "--pool", "tank", "--kstat-root", root, "monitor"],
        &OrthoConfigLoader,
        &MockRunner::new(),
    );

    assert_eq!(outcome.result, ActionResult::Success);
}

#[test]
fn loading_without_parameters_reports_missing_pool() {
    let outcome = invoke(
        &["zpool-agent", "--zpool-binary", "/nonexistent/zpool", "start"],
        &OrthoConfigLoader,
        &MockRunner::new(),
    );

    assert_eq!(outcome.result, ActionResult::Misconfigured);
    assert!(
        !outcome.stderr.contains("failed to load configuration"),
        "defaults should load: {}",
        outcome.stderr
    );
}
