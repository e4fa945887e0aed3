//! E2E: unchanged ambient state gives identical reports apart from timing.

use std::sync::Arc;

use txmon_monitor::testing::{FakeResource, InMemoryContext, StaticRegistry, StaticStatus};
use txmon_monitor::{MonitorConfig, TransactionMonitor, DEFAULT_SUPPORTED_IMPLEMENTATION};

#[test]
fn two_reports_differ_only_in_timing() {
    let context = InMemoryContext::new()
        .with_actual_active(true)
        .with_name("LedgerService.post")
        .with_binding(FakeResource::new("em-1").into_binding("a"))
        .with_binding(
            FakeResource::new("em-2")
                .with_status_label("MARKED_ROLLBACK")
                .with_rollback_only(true)
                .into_binding("b"),
        )
        .with_synchronizations(["CacheEvictionSync"]);
    let registry =
        StaticRegistry::new().with_manager("transactionManager", DEFAULT_SUPPORTED_IMPLEMENTATION);
    let monitor = TransactionMonitor::new(MonitorConfig::default(), Arc::new(context), Arc::new(registry))
        .with_status_provider(Arc::new(StaticStatus::new().with_rollback_only(true)));

    let first = monitor.report("post");
    let second = monitor.report("post");

    assert_eq!(first.lines.len(), second.lines.len());
    let body = first.lines.len() - 1;
    assert_eq!(first.lines[..body], second.lines[..body]);
    assert!(first.lines[body].contains("millisec"));
    assert!(second.started_at >= first.started_at);
}

#[test]
fn non_final_report_has_no_end_banner() {
    let registry =
        StaticRegistry::new().with_manager("transactionManager", DEFAULT_SUPPORTED_IMPLEMENTATION);
    let monitor = TransactionMonitor::new(
        MonitorConfig::default(),
        Arc::new(InMemoryContext::new()),
        Arc::new(registry),
    );

    let open = monitor.report_with("step 1", false);
    let closed = monitor.report_with("step 1", true);

    assert_eq!(open.lines.len() + 1, closed.lines.len());
    assert!(!open.mentions("millisec"));
}
