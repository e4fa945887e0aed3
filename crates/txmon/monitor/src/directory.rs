//! Enumerates resource handles bound to the ambient transaction.

use tracing::debug;
use txmon_types::ProbeError;

use crate::context::{BoundValue, ResourceBinding, ResourceHandle, TransactionContext};
use crate::runner::contain;

/// Read-only view over the ambient context's resource table.
pub struct ResourceDirectory<'a> {
    context: &'a dyn TransactionContext,
}

impl<'a> ResourceDirectory<'a> {
    pub fn new(context: &'a dyn TransactionContext) -> Self {
        Self { context }
    }

    /// The full resource table, recognized handles or not.
    pub fn bindings(&self) -> Result<Option<Vec<ResourceBinding>>, ProbeError> {
        contain(|| self.context.resources())
    }

    /// Recognized handles in table order. Empty when the table is absent,
    /// empty or unreadable.
    pub fn list_bound_handles(&self) -> Vec<ResourceHandle> {
        match self.bindings() {
            Ok(Some(bindings)) => bindings
                .into_iter()
                .filter_map(|binding| match binding.value {
                    BoundValue::Handle(handle) => Some(handle),
                    BoundValue::Opaque(_) => None,
                })
                .collect(),
            Ok(None) => Vec::new(),
            Err(e) => {
                debug!(error = %e, "Resource table unreadable, treating as empty");
                Vec::new()
            }
        }
    }
}
