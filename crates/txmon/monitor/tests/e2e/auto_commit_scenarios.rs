//! E2E: three handles bound to one transaction, uniform vs contradictory auto-commit.

use std::sync::Arc;

use txmon_monitor::testing::{FakeResource, InMemoryContext, StaticRegistry, StaticStatus};
use txmon_monitor::{MonitorConfig, Report, TransactionMonitor, DEFAULT_SUPPORTED_IMPLEMENTATION};

fn report_for(auto_commit: [bool; 3]) -> Report {
    let mut context = InMemoryContext::new()
        .with_actual_active(true)
        .with_name("InventoryService.reserve")
        .with_isolation(Some(2));
    for (i, value) in auto_commit.into_iter().enumerate() {
        context = context.with_binding(
            FakeResource::new(format!("em-{}", i + 1))
                .with_auto_commit(value)
                .into_binding(format!("factory-{}", i + 1)),
        );
    }

    let registry =
        StaticRegistry::new().with_manager("transactionManager", DEFAULT_SUPPORTED_IMPLEMENTATION);
    TransactionMonitor::new(MonitorConfig::default(), Arc::new(context), Arc::new(registry))
        .with_status_provider(Arc::new(StaticStatus::new().with_new_transaction(true)))
        .report("reserve stock")
}

#[test]
fn uniform_false_reports_managed_transactions() {
    let report = report_for([false, false, false]);

    assert!(report.mentions("Transactions are managed. jdbc.autoCommit=false"));
    assert!(!report.mentions("Contradiction"));
    assert!(!report.mentions("has parameter jdbc.autoCommit"));
    assert!(report.mentions("ISOLATION_READ_COMMITTED (2)"));
}

#[test]
fn mixed_values_report_contradiction_per_handle() {
    let report = report_for([true, false, true]);

    assert!(report.mentions("Contradiction in transaction management"));
    let listed: Vec<&String> = report
        .lines
        .iter()
        .filter(|l| l.contains("has parameter jdbc.autoCommit="))
        .collect();
    assert_eq!(
        listed,
        vec![
            "| em-1 has parameter jdbc.autoCommit=true",
            "| em-2 has parameter jdbc.autoCommit=false",
            "| em-3 has parameter jdbc.autoCommit=true",
        ]
    );
}

#[test]
fn uniform_true_reports_unmanaged_transactions() {
    let report = report_for([true, true, true]);
    assert!(report.mentions("Transactions are not managed"));
}
