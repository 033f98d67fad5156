//! Non-fatal findings about a connector's dispatch target.

use serde::{Deserialize, Serialize};

/// Advisory raised while building a descriptor.
///
/// Advisories never fail construction: a binding may legitimately consume a
/// topic without dispatching requests anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchAdvisory {
    /// Both a local dispatch path and a remote endpoint are configured.
    AmbiguousTarget,
    /// Neither a local dispatch path nor a remote endpoint is configured.
    NoTarget,
}

impl DispatchAdvisory {
    /// Evaluate the advisory, if any, for a pair of dispatch settings.
    #[must_use]
    pub fn evaluate(has_local: bool, has_remote: bool) -> Option<Self> {
        match (has_local, has_remote) {
            (true, true) => Some(Self::AmbiguousTarget),
            (false, false) => Some(Self::NoTarget),
            _ => None,
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::AmbiguousTarget => "ambiguous_dispatch_target",
            Self::NoTarget => "no_dispatch_target",
        }
    }

    /// Operator-facing explanation.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::AmbiguousTarget => {
                "ambiguous dispatch target: both dispatch_path and remote_endpoint are set; local dispatch is used"
            }
            Self::NoTarget => {
                "no dispatch target configured: neither dispatch_path nor remote_endpoint is set"
            }
        }
    }
}

impl std::fmt::Display for DispatchAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
