//! The transaction monitor facade.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};
use txmon_types::{GateDecision, MonitorState, ProbeKind, TransactionSnapshot};

use crate::config::MonitorConfig;
use crate::context::{ManagerRegistry, TransactionContext, TransactionStatusProvider};
use crate::directory::ResourceDirectory;
use crate::error::MonitorError;
use crate::gate::ConfigGate;
use crate::report::{
    render, ConfigSection, ProbeSummary, ReportEmitter, ReportInput, ResourceSection,
    ResourceTable, Section, StateSection, Synchronizations,
};
use crate::runner::{contain, panic_message, ProbeRunner};
use crate::state::SharedMonitorState;

/// One rendered report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// When the report started.
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    /// Monitor state once the report finished.
    pub state: MonitorState,
    pub lines: Vec<String>,
}

impl Report {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Whether any line contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

/// Read-only consistency probe for the calling thread's transaction.
///
/// Collaborators are injected; the only state shared between reports is the
/// sticky [`SharedMonitorState`], which may itself be shared between
/// monitors of one scope through [`TransactionMonitor::with_shared_state`].
pub struct TransactionMonitor {
    config: MonitorConfig,
    context: Arc<dyn TransactionContext>,
    status: Option<Arc<dyn TransactionStatusProvider>>,
    registry: Arc<dyn ManagerRegistry>,
    gate: ConfigGate,
    state: Arc<SharedMonitorState>,
}

impl TransactionMonitor {
    pub fn new(
        config: MonitorConfig,
        context: Arc<dyn TransactionContext>,
        registry: Arc<dyn ManagerRegistry>,
    ) -> Self {
        let gate = ConfigGate::new(config.supported_implementation.clone());
        Self {
            config,
            context,
            status: None,
            registry,
            gate,
            state: Arc::new(SharedMonitorState::new()),
        }
    }

    pub fn with_status_provider(mut self, status: Arc<dyn TransactionStatusProvider>) -> Self {
        self.status = Some(status);
        self
    }

    /// Share the disablement flag with other monitors of the same scope.
    pub fn with_shared_state(mut self, state: Arc<SharedMonitorState>) -> Self {
        self.state = state;
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn state(&self) -> MonitorState {
        self.state.current()
    }

    pub fn shared_state(&self) -> Arc<SharedMonitorState> {
        Arc::clone(&self.state)
    }

    /// Produce a full report, end banner included.
    pub fn report(&self, comment: &str) -> Report {
        self.report_with(comment, true)
    }

    /// Produce a report and write each line to the `txmon::report` log target.
    ///
    /// Never fails: every section degrades on its own.
    #[instrument(skip(self), fields(thread))]
    pub fn report_with(&self, comment: &str, is_final_line: bool) -> Report {
        let started_at = Utc::now();
        let start = Instant::now();
        let thread = current_thread_label();
        tracing::Span::current().record("thread", thread.as_str());

        let config = guarded("configuration", || self.configuration_section());
        let snapshot = guarded("transaction parameters", || self.snapshot_section());
        let (state, resources) = if self.state.is_disabled() {
            (Section::Skipped, Section::Skipped)
        } else {
            (
                guarded("transaction state", || self.state_section()),
                guarded("transaction resources", || self.resource_section()),
            )
        };

        let elapsed = start.elapsed();
        let lines = ReportEmitter::emit(&ReportInput {
            comment,
            thread: &thread,
            config: &config,
            snapshot: &snapshot,
            state: &state,
            resources: &resources,
            elapsed,
            is_final_line,
        });

        for line in &lines {
            info!(target: "txmon::report", "{}", line);
        }

        Report {
            started_at,
            elapsed,
            state: self.state.current(),
            lines,
        }
    }

    fn configuration_section(&self) -> ConfigSection {
        let gate = self
            .gate
            .evaluate(self.registry.as_ref(), &self.config.manager_bean);
        if let GateDecision::Disable { reason } = &gate.decision {
            if self.state.disable() {
                warn!(%reason, "Transaction monitor disabled for the rest of this scope");
            }
        }

        let state = self.state.current();
        let session_contexts = match state {
            MonitorState::Enabled => {
                let handles = ResourceDirectory::new(self.context.as_ref()).list_bound_handles();
                ProbeRunner::new(ProbeKind::SessionContext)
                    .run(|h| h.introspect().try_session_context(), &handles)
            }
            MonitorState::Disabled => Default::default(),
        };

        ConfigSection {
            manager_bean: self.config.manager_bean.clone(),
            gate,
            state,
            session_contexts,
        }
    }

    fn snapshot_section(&self) -> TransactionSnapshot {
        crate::snapshot::SnapshotAssembler::new(self.context.as_ref(), self.status.as_deref())
            .capture()
    }

    fn state_section(&self) -> StateSection {
        let handles = ResourceDirectory::new(self.context.as_ref()).list_bound_handles();

        StateSection {
            auto_commit: ProbeSummary::new(
                ProbeRunner::new(ProbeKind::AutoCommit)
                    .run(|h| h.introspect().try_auto_commit(), &handles),
            ),
            status: ProbeSummary::new(
                ProbeRunner::new(ProbeKind::StatusLabel)
                    .run(|h| h.introspect().try_status_label(), &handles),
            ),
            rollback_only: ProbeSummary::new(
                ProbeRunner::new(ProbeKind::RollbackOnly)
                    .run(|h| h.introspect().try_rollback_only(), &handles),
            ),
            active: ProbeSummary::new(
                ProbeRunner::new(ProbeKind::IsActive)
                    .run(|h| h.introspect().try_is_active(), &handles),
            ),
        }
    }

    fn resource_section(&self) -> ResourceSection {
        let context = self.context.as_ref();

        let table = if !self.config.list_resources {
            ResourceTable::NotListed
        } else {
            match ResourceDirectory::new(context).bindings() {
                Ok(Some(bindings)) if !bindings.is_empty() => ResourceTable::Entries(
                    bindings
                        .iter()
                        .map(|b| (b.key.clone(), render(&b.value)))
                        .collect(),
                ),
                Ok(_) => ResourceTable::Absent,
                Err(e) => ResourceTable::Unreadable(e.to_string()),
            }
        };

        let synchronizations = if !self.config.list_synchronizations {
            Synchronizations::NotListed
        } else {
            match contain(|| context.is_synchronization_active()) {
                Ok(false) => Synchronizations::Inactive,
                Ok(true) => match contain(|| context.synchronizations()) {
                    Ok(elements) => Synchronizations::Active(elements),
                    Err(e) => Synchronizations::Unreadable(e.to_string()),
                },
                Err(e) => Synchronizations::Unreadable(e.to_string()),
            }
        };

        ResourceSection {
            table,
            synchronizations,
        }
    }
}

/// Build one section, turning a panic into a one-line diagnostic.
fn guarded<T>(section: &'static str, build: impl FnOnce() -> T) -> Section<T> {
    match panic::catch_unwind(AssertUnwindSafe(build)) {
        Ok(value) => Section::Ready(value),
        Err(payload) => {
            let error = MonitorError::SectionFailed {
                section,
                reason: panic_message(payload.as_ref()),
            };
            warn!(section, error = %error, "Report section failed");
            Section::Failed(error.to_string())
        }
    }
}

fn current_thread_label() -> String {
    let thread = std::thread::current();
    match thread.name() {
        Some(name) => name.to_string(),
        None => format!("{:?}", thread.id()),
    }
}
