//! Checks that the host transaction manager is one this monitor understands.

use tracing::{debug, warn};
use txmon_types::GateDecision;

use crate::context::ManagerRegistry;
use crate::runner::contain;

/// What the gate learned about the configured transaction manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    /// Resolved implementation identifier, if the lookup worked.
    pub implementation: Option<String>,
    pub decision: GateDecision,
}

/// Compares the live transaction manager against the supported implementation.
pub struct ConfigGate {
    supported: String,
}

impl ConfigGate {
    pub fn new(supported: impl Into<String>) -> Self {
        Self {
            supported: supported.into(),
        }
    }

    pub fn supported(&self) -> &str {
        &self.supported
    }

    pub fn check(&self, implementation: &str) -> GateDecision {
        if implementation == self.supported {
            GateDecision::Proceed
        } else {
            GateDecision::disable(format!(
                "this monitor only works with transaction manager implementation={}, found {}",
                self.supported, implementation
            ))
        }
    }

    /// Resolve `bean_name` through the registry and check it. A failed
    /// lookup disables rather than erroring.
    pub fn evaluate(&self, registry: &dyn ManagerRegistry, bean_name: &str) -> GateOutcome {
        match contain(|| registry.resolve_implementation(bean_name)) {
            Ok(implementation) => {
                let decision = self.check(&implementation);
                debug!(%implementation, proceed = decision.is_proceed(), "Transaction manager checked");
                GateOutcome {
                    implementation: Some(implementation),
                    decision,
                }
            }
            Err(e) => {
                warn!(bean = bean_name, error = %e, "Transaction manager lookup failed");
                GateOutcome {
                    implementation: None,
                    decision: GateDecision::disable(format!(
                        "transaction manager `{}` could not be resolved: {}",
                        bean_name, e
                    )),
                }
            }
        }
    }
}
