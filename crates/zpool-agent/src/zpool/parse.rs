//! Parsers for the pool tool's scripted output.

use std::str::FromStr;

use strum::EnumString;

/// Health of an attached pool as reported by the kernel or the pool tool.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
pub enum PoolHealth {
    /// All devices are working.
    #[strum(serialize = "ONLINE")]
    Online,
    /// Redundancy is reduced but the pool still serves I/O.
    #[strum(serialize = "DEGRADED")]
    Degraded,
    /// The pool cannot serve I/O.
    #[strum(serialize = "FAULTED")]
    Faulted,
    /// Any other report, kept verbatim for diagnostics.
    #[strum(default)]
    Unknown(String),
}

impl PoolHealth {
    /// Parses a raw health report, trimming surrounding whitespace.
    ///
    /// Spelling is case-sensitive, matching what the tool prints; anything
    /// unrecognised, including an empty report, becomes [`Self::Unknown`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let report = raw.trim();
        Self::from_str(report).unwrap_or_else(|_| Self::Unknown(report.to_owned()))
    }

    /// Text form used in logs.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Online => "ONLINE",
            Self::Degraded => "DEGRADED",
            Self::Faulted => "FAULTED",
            Self::Unknown(raw) => raw,
        }
    }
}

/// One pool record from the import discovery listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportCandidate {
    /// Value of the `pool:` field.
    pub name: String,
    /// Value of the `id:` field, when present.
    pub id: Option<String>,
    /// Value of the `state:` field, when present.
    pub state: Option<String>,
}

/// Splits discovery output into pool records.
///
/// Each record starts at a `pool:` field; `id:` and `state:` fields attach to
/// the record above them. Other fields and the indented device tree are
/// ignored.
#[must_use]
pub fn parse_import_candidates(output: &str) -> Vec<ImportCandidate> {
    let mut candidates: Vec<ImportCandidate> = Vec::new();
    for line in output.lines() {
        let Some((key, value)) = line.trim_start().split_once(':') else {
            continue;
        };
        let field = value.trim();
        match key {
            "pool" => candidates.push(ImportCandidate {
                name: field.to_owned(),
                ..ImportCandidate::default()
            }),
            "id" => {
                if let Some(current) = candidates.last_mut() {
                    current.id = Some(field.to_owned());
                }
            }
            "state" => {
                if let Some(current) = candidates.last_mut() {
                    current.state = Some(field.to_owned());
                }
            }
            _ => {}
        }
    }
    candidates
}
