//! Per-handle probe results.

use serde::{Deserialize, Serialize};

use crate::error::ProbeError;
use crate::ids::HandleId;

/// Introspection probes run against every bound handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbeKind {
    /// Session-context setting of the handle's factory.
    SessionContext,
    /// Auto-commit flag of the underlying connection.
    AutoCommit,
    /// Free-form transaction status label.
    StatusLabel,
    /// Rollback-only flag of the handle's transaction.
    RollbackOnly,
    /// Whether the handle's transaction is active.
    IsActive,
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeKind::SessionContext => write!(f, "session_context"),
            ProbeKind::AutoCommit => write!(f, "autoCommit"),
            ProbeKind::StatusLabel => write!(f, "transaction state"),
            ProbeKind::RollbackOnly => write!(f, "RollbackOnly"),
            ProbeKind::IsActive => write!(f, "isActive"),
        }
    }
}

/// Result of one probe against one handle. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult<T> {
    /// Handle that was probed.
    pub handle: HandleId,

    /// Probed value; `None` exactly when the probe failed.
    pub value: Option<T>,

    /// Whether the probe failed.
    pub failed: bool,

    /// Failure message, if the probe failed.
    pub failure_reason: Option<String>,
}

impl<T> ProbeResult<T> {
    /// Create a successful probe result.
    pub fn success(handle: HandleId, value: T) -> Self {
        Self {
            handle,
            value: Some(value),
            failed: false,
            failure_reason: None,
        }
    }

    /// Create a failed probe result.
    pub fn failure(handle: HandleId, reason: impl Into<String>) -> Self {
        Self {
            handle,
            value: None,
            failed: true,
            failure_reason: Some(reason.into()),
        }
    }

    pub fn from_outcome(handle: HandleId, outcome: Result<T, ProbeError>) -> Self {
        match outcome {
            Ok(value) => Self::success(handle, value),
            Err(e) => Self::failure(handle, e.to_string()),
        }
    }

    /// The probed value, if the probe succeeded.
    pub fn value(&self) -> Option<&T> {
        if self.failed {
            None
        } else {
            self.value.as_ref()
        }
    }
}
