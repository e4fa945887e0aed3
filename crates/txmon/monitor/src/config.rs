//! Monitor configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, MonitorResult};

/// The transaction manager implementation this monitor understands.
pub const DEFAULT_SUPPORTED_IMPLEMENTATION: &str =
    "org.springframework.orm.jpa.JpaTransactionManager";

/// Configuration for a [`TransactionMonitor`](crate::TransactionMonitor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Registry name of the transaction manager to check.
    pub manager_bean: String,

    /// Implementation identifier the gate accepts.
    pub supported_implementation: String,

    /// Dump the resource table in the resources section.
    pub list_resources: bool,

    /// List registered synchronizations in the resources section.
    pub list_synchronizations: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            manager_bean: "transactionManager".to_string(),
            supported_implementation: DEFAULT_SUPPORTED_IMPLEMENTATION.to_string(),
            list_resources: true,
            list_synchronizations: true,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a TOML file; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> MonitorResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> MonitorResult<Self> {
        toml::from_str(contents).map_err(|e| MonitorError::Config(e.to_string()))
    }

    pub fn with_manager_bean(mut self, bean: impl Into<String>) -> Self {
        self.manager_bean = bean.into();
        self
    }

    pub fn with_supported_implementation(mut self, implementation: impl Into<String>) -> Self {
        self.supported_implementation = implementation.into();
        self
    }
}
