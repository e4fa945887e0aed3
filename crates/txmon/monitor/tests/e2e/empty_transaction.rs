//! E2E: no handles bound; every per-handle probe is "cannot be determined".

use std::sync::Arc;

use txmon_monitor::testing::{InMemoryContext, StaticRegistry};
use txmon_monitor::{MonitorConfig, MonitorState, TransactionMonitor, DEFAULT_SUPPORTED_IMPLEMENTATION};

#[test]
fn zero_handles_cannot_be_determined() {
    let registry =
        StaticRegistry::new().with_manager("transactionManager", DEFAULT_SUPPORTED_IMPLEMENTATION);
    let monitor = TransactionMonitor::new(
        MonitorConfig::default(),
        Arc::new(InMemoryContext::new()),
        Arc::new(registry),
    );

    let report = monitor.report("idle");

    assert_eq!(report.state, MonitorState::Enabled);
    assert!(report.mentions("session_context parameter cannot be determined"));
    assert!(report.mentions("The jdbc.autoCommit parameter cannot be determined"));
    assert!(report.mentions("transaction state cannot be determined"));
    assert!(report.mentions("RollbackOnly state of transaction cannot be determined"));
    assert!(report.mentions("isActive state of transaction cannot be determined"));
    assert!(report.mentions("the transaction has no resources"));
    assert!(!report.mentions("Transactions are managed"));
    assert!(!report.mentions("transaction active"));
}

#[test]
fn snapshot_without_status_provider_is_undetermined() {
    let registry =
        StaticRegistry::new().with_manager("transactionManager", DEFAULT_SUPPORTED_IMPLEMENTATION);
    let monitor = TransactionMonitor::new(
        MonitorConfig::default(),
        Arc::new(InMemoryContext::new()),
        Arc::new(registry),
    );

    let report = monitor.report("idle");

    assert!(report.mentions("started)=none"));
    assert!(report.mentions(
        "|not active; isolation level not defined; readWrite; new undetermined; savePoint undetermined; completed undetermined; RollbackOnly undetermined"
    ));
}
