//! Self-description documents printed by `meta-data` and `usage`.

use std::io::{self, Write};

use zpool_agent_config::default_import_force;

use crate::action::Action;

/// Name the agent registers under with the orchestrator.
pub const AGENT_NAME: &str = "ZFS";

/// Version of the metadata document.
pub const AGENT_VERSION: &str = "1.0";

/// An advertised action and its default timing.
struct ActionTiming {
    action: Action,
    timeout_secs: u32,
    interval_secs: Option<u32>,
    depth: Option<u32>,
}

const ACTION_TIMINGS: &[ActionTiming] = &[
    ActionTiming {
        action: Action::Start,
        timeout_secs: 60,
        interval_secs: None,
        depth: None,
    },
    ActionTiming {
        action: Action::Stop,
        timeout_secs: 60,
        interval_secs: None,
        depth: None,
    },
    ActionTiming {
        action: Action::Monitor,
        timeout_secs: 30,
        interval_secs: Some(5),
        depth: Some(0),
    },
    ActionTiming {
        action: Action::ValidateAll,
        timeout_secs: 30,
        interval_secs: None,
        depth: None,
    },
    ActionTiming {
        action: Action::MetaData,
        timeout_secs: 5,
        interval_secs: None,
        depth: None,
    },
];

/// Renders the resource agent metadata document.
#[must_use]
pub fn render_metadata() -> String {
    let mut actions = String::new();
    for timing in ACTION_TIMINGS {
        actions.push_str(&format!(
            "    <action name=\"{}\" timeout=\"{}s\"",
            timing.action, timing.timeout_secs
        ));
        if let Some(interval) = timing.interval_secs {
            actions.push_str(&format!(" interval=\"{interval}s\""));
        }
        if let Some(depth) = timing.depth {
            actions.push_str(&format!(" depth=\"{depth}\""));
        }
        actions.push_str(" />\n");
    }

    format!(
        r#"<?xml version="1.0"?>
<!DOCTYPE resource-agent SYSTEM "ra-api-1.dtd">
<resource-agent name="{AGENT_NAME}" version="{AGENT_VERSION}">
  <version>1.0</version>
  <longdesc lang="en">
This script manages ZFS pools. It can import a ZFS pool or export it.
The import is temporary: the pool is not recorded in the cache file, so the
cluster manager alone decides which node imports it after a reboot.
  </longdesc>
  <shortdesc lang="en">Manages ZFS pools</shortdesc>

  <parameters>
    <parameter name="pool" unique="1" required="1">
      <longdesc lang="en">
Name of the ZFS pool to manage, as given to zpool import.
      </longdesc>
      <shortdesc lang="en">ZFS pool name</shortdesc>
      <content type="string" default="" />
    </parameter>
    <parameter name="importargs" unique="0" required="0">
      <longdesc lang="en">
Additional parameters to zpool import, such as "-d /dev/disk/by-id".
      </longdesc>
      <shortdesc lang="en">Import arguments</shortdesc>
      <content type="string" default="" />
    </parameter>
    <parameter name="importforce" unique="0" required="0">
      <longdesc lang="en">
Import the pool even if it appears to be in use by another system.
      </longdesc>
      <shortdesc lang="en">Force import</shortdesc>
      <content type="boolean" default="{force}" />
    </parameter>
  </parameters>

  <actions>
{actions}  </actions>
</resource-agent>
"#,
        force = default_import_force(),
    )
}

/// Renders the one-line usage text for `program`.
#[must_use]
pub fn render_usage(program: &str) -> String {
    let actions: Vec<&'static str> = Action::ALL
        .iter()
        .map(|action| <&'static str>::from(*action))
        .collect();
    format!("usage: {program} {{{}}}\n", actions.join("|"))
}

/// Writes the metadata document to `writer`.
///
/// # Errors
///
/// Returns [`io::Error`] if writing to the underlying stream fails.
pub fn write_metadata<W: Write>(writer: &mut W) -> io::Result<()> {
    writer.write_all(render_metadata().as_bytes())?;
    writer.flush()
}

/// Writes the usage text for `program` to `writer`.
///
/// # Errors
///
/// Returns [`io::Error`] if writing to the underlying stream fails.
pub fn write_usage<W: Write>(writer: &mut W, program: &str) -> io::Result<()> {
    writer.write_all(render_usage(program).as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_lists_every_action_in_order() {
        assert_eq!(
            render_usage("zpool-agent"),
            "usage: zpool-agent {start|stop|status|monitor|validate-all|meta-data|usage}\n"
        );
    }

    #[test]
    fn metadata_describes_parameters_and_defaults() {
        let document = render_metadata();
        assert!(document.starts_with("<?xml version=\"1.0\"?>"));
        assert!(document.contains("<resource-agent name=\"ZFS\" version=\"1.0\">"));
        assert!(document.contains("<parameter name=\"pool\" unique=\"1\" required=\"1\">"));
        assert!(document.contains("<parameter name=\"importargs\""));
        assert!(document.contains("<content type=\"boolean\" default=\"true\" />"));
    }

    #[test]
    fn metadata_advertises_action_timeouts() {
        let document = render_metadata();
        assert!(document.contains("<action name=\"start\" timeout=\"60s\" />"));
        assert!(document.contains("<action name=\"stop\" timeout=\"60s\" />"));
        assert!(
            document.contains("<action name=\"monitor\" timeout=\"30s\" interval=\"5s\" depth=\"0\" />")
        );
        assert!(document.contains("<action name=\"validate-all\" timeout=\"30s\" />"));
        assert!(document.contains("<action name=\"meta-data\" timeout=\"5s\" />"));
        assert!(document.trim_end().ends_with("</resource-agent>"));
    }

    #[test]
    fn writers_emit_rendered_documents() {
        let mut buffer = Vec::new();
        write_usage(&mut buffer, "agent").expect("write usage");
        write_metadata(&mut buffer).expect("write metadata");
        let text = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(text.starts_with("usage: agent {"));
        assert!(text.contains("</resource-agent>"));
    }
}
