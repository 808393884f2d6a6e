//! Configuration loading helpers for the agent binary.
//!
//! Configuration flags may precede the action word during manual runs
//! (`zpool-agent --pool tank monitor`). The logic here filters the leading
//! flags destined for `ortho_config` so the loader only receives supported
//! flags while the runtime checks the remaining words against the action
//! contract.

use std::ffi::{OsStr, OsString};

use zpool_agent_config::{AgentConfig, OrthoConfig};

use crate::errors::AppError;

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: This list must be kept in sync with the fields of
/// `AgentConfig`. When adding new configuration options, update this array
/// accordingly.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--pool",
    "--importargs",
    "--importforce",
    "--zpool-binary",
    "--kstat-root",
    "--log-filter",
    "--log-format",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration for the agent from the filtered flag list.
    fn load(&self, args: &[OsString]) -> Result<AgentConfig, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<AgentConfig, AppError> {
        AgentConfig::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

impl OrthoConfigLoader {
    fn process_config_flag(argument: &OsStr) -> FlagAction {
        let argument_text = argument.to_string_lossy();
        if !argument_text.starts_with("--") {
            return FlagAction::Skip;
        }

        let (flag, has_inline_value) = match argument_text.split_once('=') {
            Some((flag, _)) => (flag, true),
            None => (&*argument_text, false),
        };

        if CONFIG_CLI_FLAGS.contains(&flag) {
            return FlagAction::Include {
                needs_value: !has_inline_value,
            };
        }

        FlagAction::Skip
    }
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some(program) = args.first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut filtered: Vec<OsString> = vec![program.clone()];
    let mut command_start = 1usize;
    let mut pending_value = false;

    for (index, argument) in args.iter().enumerate().skip(1) {
        if pending_value {
            filtered.push(argument.clone());
            pending_value = false;
            command_start = index + 1;
            continue;
        }

        match OrthoConfigLoader::process_config_flag(argument.as_os_str()) {
            FlagAction::Include { needs_value } => {
                filtered.push(argument.clone());
                command_start = index + 1;
                pending_value = needs_value;
            }
            FlagAction::Skip => break,
        }
    }

    ConfigArgumentSplit {
        config_arguments: filtered,
        command_start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn inline_value_flags_do_not_need_follow_up_value() {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new("--pool=tank"));
        assert!(matches!(result, FlagAction::Include { needs_value: false }));
    }

    #[test]
    fn separate_value_flags_consume_following_argument() {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new("--importforce"));
        assert!(matches!(result, FlagAction::Include { needs_value: true }));
    }

    #[rstest]
    #[case("monitor")]
    #[case("--unknown")]
    #[case("-p")]
    fn other_arguments_signal_stop(#[case] argument: &str) {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new(argument));
        assert!(matches!(result, FlagAction::Skip), "should skip");
    }

    #[test]
    fn leading_flags_are_split_from_the_action() {
        let args = os_args(&["agent", "--pool", "tank", "--importforce=no", "start"]);
        let split = split_config_arguments(&args);
        assert_eq!(
            split.config_arguments,
            os_args(&["agent", "--pool", "tank", "--importforce=no"])
        );
        assert_eq!(split.command_start, 4);
    }

    #[test]
    fn flags_after_the_action_stay_with_the_action() {
        let args = os_args(&["agent", "start", "--pool", "tank"]);
        let split = split_config_arguments(&args);
        assert_eq!(split.config_arguments, os_args(&["agent"]));
        assert_eq!(split.command_start, 1);
    }

    #[test]
    fn empty_arguments_split_to_nothing() {
        let split = split_config_arguments(&[]);
        assert!(split.config_arguments.is_empty());
        assert_eq!(split.command_start, 0);
    }
}
