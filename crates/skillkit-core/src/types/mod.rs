//! Shared core types used across scope resolution and path selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Installation scope.
///
/// Determined once per invocation and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// User-wide install rooted at the home directory.
    #[default]
    Global,
    /// Project install rooted at the working directory.
    Local,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Global => "GLOBAL",
            Scope::Local => "LOCAL",
        }
    }

    /// Parse a `SKILL_SCOPE` style value, ignoring ASCII case.
    pub fn from_env_value(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("GLOBAL") {
            Some(Scope::Global)
        } else if value.eq_ignore_ascii_case("LOCAL") {
            Some(Scope::Local)
        } else {
            None
        }
    }

    pub fn is_global(self) -> bool {
        matches!(self, Scope::Global)
    }

    /// Human-readable label used in progress output.
    pub fn label(self) -> &'static str {
        match self {
            Scope::Global => "global (GLOBAL)",
            Scope::Local => "project-level (LOCAL)",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
