//! Setter modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Which keys a setter may touch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetterMode {
    /// Only add keys the target does not have.
    Add,
    /// Only change keys the target already has.
    Change,
    /// Add and change.
    #[default]
    Both,
}

impl SetterMode {
    /// Returns true if absent keys may be added.
    pub fn adds(self) -> bool {
        matches!(self, Self::Add | Self::Both)
    }

    /// Returns true if existing keys may be changed.
    pub fn changes(self) -> bool {
        matches!(self, Self::Change | Self::Both)
    }

    /// The mode name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Change => "change",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for SetterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SetterMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "change" => Ok(Self::Change),
            "both" => Ok(Self::Both),
            other => Err(Error::type_error(
                "mode",
                format!("invalid mode '{}'; possible values: 'add', 'change', 'both'", other),
            )),
        }
    }
}
