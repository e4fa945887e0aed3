//! E2E: handles that disagree on their own transaction state.

use std::sync::Arc;

use txmon_monitor::testing::{FakeResource, InMemoryContext, StaticRegistry};
use txmon_monitor::{MonitorConfig, TransactionMonitor, DEFAULT_SUPPORTED_IMPLEMENTATION};

#[test]
fn doomed_handle_next_to_healthy_one() {
    let context = InMemoryContext::new()
        .with_actual_active(true)
        .with_binding(
            FakeResource::new("em-1")
                .with_status_label("MARKED_ROLLBACK")
                .with_rollback_only(true)
                .with_active(false)
                .into_binding("orders"),
        )
        .with_binding(FakeResource::new("em-2").into_binding("billing"));
    let registry =
        StaticRegistry::new().with_manager("transactionManager", DEFAULT_SUPPORTED_IMPLEMENTATION);
    let monitor = TransactionMonitor::new(MonitorConfig::default(), Arc::new(context), Arc::new(registry));

    let report = monitor.report("settle");

    assert!(report.mentions("Transactions are managed. jdbc.autoCommit=false"));
    assert!(report.mentions("have different transaction states:"));
    assert!(report.mentions("| em-1 transaction state=MARKED_ROLLBACK"));
    assert!(report.mentions("| em-2 transaction state=ACTIVE"));
    assert!(report.mentions("have different RollbackOnly values:"));
    assert!(report.mentions("| em-1 RollbackOnly=true"));
    assert!(report.mentions("| em-2 RollbackOnly=false"));
    assert!(report.mentions("have different isActive values:"));
    assert!(report.mentions("| em-1 isActive=false"));
    assert!(report.mentions("| em-2 isActive=true"));
}
