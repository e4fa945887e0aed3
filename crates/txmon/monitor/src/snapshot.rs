//! Captures transaction-level attributes from the ambient context.

use tracing::debug;
use txmon_types::{IsolationLevel, Observed, ProbeError, TransactionSnapshot};

use crate::context::{TransactionContext, TransactionStatusProvider};
use crate::runner::contain;

/// Reads the ambient transaction attributes into one snapshot.
///
/// Each attribute is read on its own; an unreadable one becomes
/// [`Observed::Undetermined`] without affecting the rest.
pub struct SnapshotAssembler<'a> {
    context: &'a dyn TransactionContext,
    status: Option<&'a dyn TransactionStatusProvider>,
}

impl<'a> SnapshotAssembler<'a> {
    pub fn new(
        context: &'a dyn TransactionContext,
        status: Option<&'a dyn TransactionStatusProvider>,
    ) -> Self {
        Self { context, status }
    }

    pub fn capture(&self) -> TransactionSnapshot {
        let ctx = self.context;
        TransactionSnapshot {
            name: observe("name", || ctx.current_transaction_name()),
            actual_active: observe("actual_active", || ctx.is_actual_transaction_active()),
            isolation: observe("isolation", || ctx.isolation_level()).map(IsolationLevel::from_code),
            read_only: observe("read_only", || ctx.is_read_only()),
            new_transaction: self.observe_status("new_transaction", |s| s.is_new_transaction()),
            has_savepoint: self.observe_status("has_savepoint", |s| s.has_savepoint()),
            completed: self.observe_status("completed", |s| s.is_completed()),
            rollback_only: self.observe_status("rollback_only", |s| s.is_rollback_only()),
        }
    }

    fn observe_status(
        &self,
        attribute: &'static str,
        read: impl FnOnce(&dyn TransactionStatusProvider) -> Result<bool, ProbeError>,
    ) -> Observed<bool> {
        match self.status {
            Some(status) => observe(attribute, || read(status)),
            None => Observed::Undetermined,
        }
    }
}

fn observe<T>(attribute: &'static str, read: impl FnOnce() -> Result<T, ProbeError>) -> Observed<T> {
    let outcome = contain(read);
    if let Err(e) = &outcome {
        debug!(attribute, error = %e, "Snapshot attribute undetermined");
    }
    outcome.into()
}
