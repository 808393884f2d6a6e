//! Boolean resource parameters in the orchestrator's spelling.
//!
//! Cluster managers hand boolean parameters to agents as free text
//! (`yes`, `true`, `1`, `on`, ...). [`Toggle`] accepts those spellings from
//! the environment, configuration files, and the command line alike.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const TRUE_WORDS: &[&str] = &["yes", "true", "1", "on", "y"];
const FALSE_WORDS: &[&str] = &["no", "false", "0", "off", "n"];

/// Boolean parameter value accepting the orchestrator's spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Toggle(bool);

impl Toggle {
    /// Enabled toggle.
    pub const ENABLED: Self = Self(true);
    /// Disabled toggle.
    pub const DISABLED: Self = Self(false);

    /// Returns whether the toggle is switched on.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.0
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "true" } else { "false" })
    }
}

/// Error raised when text does not spell a boolean.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a boolean; expected one of yes/no, true/false, 1/0, on/off")]
pub struct ToggleParseError(pub String);

impl FromStr for Toggle {
    type Err = ToggleParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let word = text.trim().to_ascii_lowercase();
        if TRUE_WORDS.contains(&word.as_str()) {
            Ok(Self(true))
        } else if FALSE_WORDS.contains(&word.as_str()) {
            Ok(Self(false))
        } else {
            Err(ToggleParseError(text.to_owned()))
        }
    }
}

impl Serialize for Toggle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

impl<'de> Deserialize<'de> for Toggle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ToggleVisitor)
    }
}

struct ToggleVisitor;

impl Visitor<'_> for ToggleVisitor {
    type Value = Toggle;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a boolean, 0/1, or a yes/no style string")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Toggle(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        match value {
            0 => Ok(Toggle(false)),
            1 => Ok(Toggle(true)),
            other => Err(E::invalid_value(de::Unexpected::Signed(other), &self)),
        }
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        match value {
            0 => Ok(Toggle(false)),
            1 => Ok(Toggle(true)),
            other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value.parse().map_err(E::custom)
    }
}
