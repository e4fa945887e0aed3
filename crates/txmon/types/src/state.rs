//! Monitor enablement state and gate decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scope-wide monitor state.
///
/// Starts `Enabled`, moves to `Disabled` at most once and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonitorState {
    Enabled,
    Disabled,
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorState::Enabled => write!(f, "enabled"),
            MonitorState::Disabled => write!(f, "disabled"),
        }
    }
}

/// Outcome of checking the host transaction manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateDecision {
    Proceed,
    Disable { reason: String },
}

impl GateDecision {
    pub fn disable(reason: impl Into<String>) -> Self {
        GateDecision::Disable {
            reason: reason.into(),
        }
    }

    pub fn is_proceed(&self) -> bool {
        matches!(self, GateDecision::Proceed)
    }
}
