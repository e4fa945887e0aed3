use serde::{Deserialize, Serialize};

/// Failure of a single read against a collaborator.
///
/// Always scoped to one attribute or one handle; never aborts a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ProbeError {
    #[error("not supported: {0}")]
    Unsupported(String),
    #[error("probe failed: {0}")]
    Failed(String),
    #[error("probe panicked: {0}")]
    Panicked(String),
}

impl ProbeError {
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported(reason.into())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}
