//! E2E: an unsupported transaction manager disables probing for the whole scope.

use std::sync::Arc;

use txmon_monitor::testing::{FakeResource, InMemoryContext, StaticRegistry};
use txmon_monitor::{
    MonitorConfig, MonitorState, SharedMonitorState, TransactionMonitor,
    DEFAULT_SUPPORTED_IMPLEMENTATION,
};

fn context() -> Arc<InMemoryContext> {
    Arc::new(
        InMemoryContext::new()
            .with_actual_active(true)
            .with_binding(FakeResource::new("em-1").into_binding("emf")),
    )
}

#[test]
fn disable_is_sticky_across_monitors_in_scope() {
    let scope = Arc::new(SharedMonitorState::new());

    let unsupported = StaticRegistry::new().with_manager(
        "transactionManager",
        "org.springframework.transaction.jta.JtaTransactionManager",
    );
    let first = TransactionMonitor::new(MonitorConfig::default(), context(), Arc::new(unsupported))
        .with_shared_state(Arc::clone(&scope));
    let report = first.report("first");
    assert_eq!(report.state, MonitorState::Disabled);
    assert!(report.mentions("JtaTransactionManager"));
    assert!(report.mentions("transaction parameters"));
    assert!(!report.mentions("transaction state ---"));

    let supported =
        StaticRegistry::new().with_manager("transactionManager", DEFAULT_SUPPORTED_IMPLEMENTATION);
    let second = TransactionMonitor::new(MonitorConfig::default(), context(), Arc::new(supported))
        .with_shared_state(scope);
    let report = second.report("second");

    assert_eq!(report.state, MonitorState::Disabled);
    assert!(report.mentions("monitoring was disabled earlier in this scope"));
    assert!(report.mentions("transaction parameters"));
    assert!(!report.mentions("transaction state ---"));
    assert!(!report.mentions("resources of the current transaction"));
    assert!(!report.mentions("session_context"));
}

#[test]
fn repeated_reports_stay_disabled() {
    let monitor = TransactionMonitor::new(
        MonitorConfig::default(),
        context(),
        Arc::new(StaticRegistry::new()),
    );

    let first = monitor.report("one");
    assert!(first.mentions("could not be resolved"));
    let second = monitor.report("two");
    assert_eq!(second.state, MonitorState::Disabled);
    assert!(!second.mentions("transaction state ---"));
}

#[test]
fn concurrent_reports_share_the_flag() {
    let monitor = Arc::new(TransactionMonitor::new(
        MonitorConfig::default(),
        context(),
        Arc::new(StaticRegistry::new().with_manager("transactionManager", "com.example.Other")),
    ));

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let monitor = Arc::clone(&monitor);
            std::thread::Builder::new()
                .name(format!("worker-{}", i))
                .spawn(move || monitor.report("concurrent"))
                .unwrap()
        })
        .collect();

    for worker in workers {
        let report = worker.join().unwrap();
        assert!(report.lines[1].contains("thread=worker-"));
        assert_eq!(report.state, MonitorState::Disabled);
    }
    assert_eq!(monitor.state(), MonitorState::Disabled);
}
