//! Renders collected facts into ordered report lines.
//!
//! Pure formatting: no collaborator is touched here, and a value whose
//! `Display` fails degrades to [`PLACEHOLDER`] instead of aborting.

use std::fmt::{self, Write as _};
use std::time::Duration;

use txmon_types::{
    Classification, GateDecision, HandleId, MonitorState, Observed, ProbeKind, TransactionSnapshot,
    Verdict,
};

use crate::gate::GateOutcome;
use crate::grouper::DivergenceGrouper;
use crate::runner::ProbeResults;

/// Rendered for any value that could not be determined.
pub const UNDETERMINED: &str = "undetermined";

/// Rendered for any value whose formatting failed.
pub const PLACEHOLDER: &str = "<unprintable>";

const RULE: &str =
    "|---------------------------------------------------------------------------------------------------------------";

pub(crate) fn render(value: &dyn fmt::Display) -> String {
    let mut out = String::new();
    match write!(out, "{}", value) {
        Ok(()) => out,
        Err(_) => PLACEHOLDER.to_string(),
    }
}

/// Outcome of assembling one report section.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Ready(T),
    /// Not run because the monitor is disabled.
    Skipped,
    /// Assembly failed; carries a one-line diagnostic.
    Failed(String),
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Probe results together with their classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSummary<T> {
    pub results: ProbeResults<T>,
    pub classification: Classification<T>,
}

impl<T: PartialEq + Clone> ProbeSummary<T> {
    pub fn new(results: ProbeResults<T>) -> Self {
        let classification = DivergenceGrouper::classify(&results);
        Self {
            results,
            classification,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSection {
    pub manager_bean: String,
    pub gate: GateOutcome,
    /// Monitor state after the gate was applied.
    pub state: MonitorState,
    /// Empty unless the monitor is enabled.
    pub session_contexts: ProbeResults<Option<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateSection {
    pub auto_commit: ProbeSummary<bool>,
    pub status: ProbeSummary<String>,
    pub rollback_only: ProbeSummary<bool>,
    pub active: ProbeSummary<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceTable {
    NotListed,
    Absent,
    Unreadable(String),
    /// `(key, value)` pairs in table order.
    Entries(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Synchronizations {
    NotListed,
    Inactive,
    Active(Vec<String>),
    Unreadable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSection {
    pub table: ResourceTable,
    pub synchronizations: Synchronizations,
}

/// Everything one report renders.
pub struct ReportInput<'a> {
    pub comment: &'a str,
    pub thread: &'a str,
    pub config: &'a Section<ConfigSection>,
    pub snapshot: &'a Section<TransactionSnapshot>,
    pub state: &'a Section<StateSection>,
    pub resources: &'a Section<ResourceSection>,
    pub elapsed: Duration,
    /// Emit the end banner.
    pub is_final_line: bool,
}

/// Produces the deterministic, ordered line sequence of a report.
pub struct ReportEmitter;

impl ReportEmitter {
    pub fn emit(input: &ReportInput<'_>) -> Vec<String> {
        let mut lines = Vec::new();

        lines.push(RULE.to_string());
        lines.push(format!(
            "|-- TRANSACTION MONITOR -- <<{}>> ------ thread={}-- begin -- ",
            input.comment, input.thread
        ));

        emit_section(&mut lines, input.config, emit_config);
        emit_section(&mut lines, input.snapshot, emit_snapshot);
        emit_section(&mut lines, input.state, emit_state);
        emit_section(&mut lines, input.resources, emit_resources);

        if input.is_final_line {
            lines.push(format!(
                "|-- TRANSACTION MONITOR -- <<{}>> ----------------------- end ----{} millisec-- ",
                input.comment,
                input.elapsed.as_millis()
            ));
        }

        lines
    }
}

fn emit_section<T>(lines: &mut Vec<String>, section: &Section<T>, emit: fn(&mut Vec<String>, &T)) {
    match section {
        Section::Ready(value) => emit(lines, value),
        Section::Skipped => {}
        Section::Failed(reason) => lines.push(format!("|{}", reason)),
    }
}

fn emit_config(lines: &mut Vec<String>, config: &ConfigSection) {
    lines.push("|-------------- elements of the configuration -----------".to_string());
    lines.push(format!(
        "|implementation of {}={}",
        config.manager_bean,
        config.gate.implementation.as_deref().unwrap_or(UNDETERMINED)
    ));

    match (&config.gate.decision, config.state) {
        (GateDecision::Disable { reason }, _) => {
            lines.push(format!("|{}; state and resource probing disabled", reason));
        }
        (GateDecision::Proceed, MonitorState::Disabled) => {
            lines.push(
                "|monitoring was disabled earlier in this scope; state and resource probing skipped"
                    .to_string(),
            );
        }
        (GateDecision::Proceed, MonitorState::Enabled) if config.session_contexts.is_empty() => {
            lines.push(
                "|The session_context parameter cannot be determined because the transaction is not bound to any resource handle"
                    .to_string(),
            );
        }
        (GateDecision::Proceed, MonitorState::Enabled) => {
            for result in config.session_contexts.iter() {
                let setting = match (result.value(), &result.failure_reason) {
                    (Some(Some(value)), _) => format!("={}", render(value)),
                    (Some(None), _) => " is not set".to_string(),
                    (None, reason) => format!(
                        " {} ({})",
                        UNDETERMINED,
                        reason.as_deref().unwrap_or("no reason given")
                    ),
                };
                lines.push(format!(
                    "|{} parameter {}{}",
                    render(&result.handle),
                    ProbeKind::SessionContext,
                    setting
                ));
            }
        }
    }
    lines.push("|".to_string());
}

fn flag(observed: &Observed<bool>, yes: &str, no: &str, attribute: &str) -> String {
    match observed {
        Observed::Known(true) => yes.to_string(),
        Observed::Known(false) => no.to_string(),
        Observed::Undetermined => format!("{} {}", attribute, UNDETERMINED),
    }
}

fn emit_snapshot(lines: &mut Vec<String>, snapshot: &TransactionSnapshot) {
    lines.push("|-------------- transaction parameters -----------".to_string());

    let name = match &snapshot.name {
        Observed::Known(Some(name)) => render(name),
        Observed::Known(None) => "none".to_string(),
        Observed::Undetermined => UNDETERMINED.to_string(),
    };
    lines.push(format!(
        "|transaction name (usually the name of the method where the transaction started)={}",
        name
    ));

    let isolation = match &snapshot.isolation {
        Observed::Known(level) => render(level),
        Observed::Undetermined => UNDETERMINED.to_string(),
    };
    lines.push(format!(
        "|{}; isolation level {}; {}; {}; {}; {}; {}",
        flag(&snapshot.actual_active, "active", "not active", "active"),
        isolation,
        flag(&snapshot.read_only, "readOnly", "readWrite", "readOnly"),
        flag(&snapshot.new_transaction, "new", "not new", "new"),
        flag(&snapshot.has_savepoint, "has savePoint", "doesn't have savePoint", "savePoint"),
        flag(&snapshot.completed, "completed", "not completed", "completed"),
        flag(&snapshot.rollback_only, "RollbackOnly", "not RollbackOnly", "RollbackOnly"),
    ));
    lines.push("|".to_string());
}

/// Wording for one per-handle probe in the state section.
struct Wording<'a, T> {
    kind: ProbeKind,
    undetermined: &'a str,
    uniform: fn(&T) -> String,
    divergent: &'a str,
    per_handle: fn(&HandleId, &str) -> String,
}

fn emit_summary<T: fmt::Display>(
    lines: &mut Vec<String>,
    summary: &ProbeSummary<T>,
    wording: Wording<'_, T>,
) {
    match summary.classification.verdict() {
        Verdict::Undetermined => lines.push(format!("|{}", wording.undetermined)),
        Verdict::Uniform(value) => {
            lines.push(format!("|{}", (wording.uniform)(value)));
            if !summary.classification.failed.is_empty() {
                let failed: Vec<String> = summary
                    .classification
                    .failed
                    .iter()
                    .map(|h| render(h))
                    .collect();
                lines.push(format!(
                    "|{} {} for: {}",
                    wording.kind,
                    UNDETERMINED,
                    failed.join(", ")
                ));
            }
        }
        Verdict::Divergent(_) => {
            lines.push(format!("|{}", wording.divergent));
            for result in summary.results.iter() {
                let value = result
                    .value()
                    .map(|v| render(v))
                    .unwrap_or_else(|| UNDETERMINED.to_string());
                lines.push((wording.per_handle)(&result.handle, &value));
            }
            lines.push("|".to_string());
        }
    }
}

fn emit_state(lines: &mut Vec<String>, state: &StateSection) {
    lines.push("|-------------- transaction state -----------".to_string());

    emit_summary(
        lines,
        &state.auto_commit,
        Wording {
            kind: ProbeKind::AutoCommit,
            undetermined: "The jdbc.autoCommit parameter cannot be determined",
            uniform: |auto_commit: &bool| {
                if *auto_commit {
                    "Transactions are not managed: commit/rollback occurs at the level of each sql statement. jdbc.autoCommit=true".to_string()
                } else {
                    "Transactions are managed. jdbc.autoCommit=false".to_string()
                }
            },
            divergent: "Contradiction in transaction management: auto-commit is enabled on part of the resource handles and disabled on the rest",
            per_handle: |handle: &HandleId, value: &str| format!("| {} has parameter jdbc.autoCommit={}", render(handle), value),
        },
    );

    emit_summary(
        lines,
        &state.status,
        Wording {
            kind: ProbeKind::StatusLabel,
            undetermined: "transaction state cannot be determined",
            uniform: |label: &String| format!("transaction state={}", render(label)),
            divergent: "Resource handles participating in the transaction have different transaction states:",
            per_handle: |handle: &HandleId, value: &str| format!("| {} transaction state={}", render(handle), value),
        },
    );

    emit_summary(
        lines,
        &state.rollback_only,
        Wording {
            kind: ProbeKind::RollbackOnly,
            undetermined: "RollbackOnly state of transaction cannot be determined",
            uniform: |rollback_only: &bool| {
                if *rollback_only {
                    "transaction RollbackOnly".to_string()
                } else {
                    "transaction not marked as RollbackOnly".to_string()
                }
            },
            divergent: "Resource handles participating in the transaction have different RollbackOnly values:",
            per_handle: |handle: &HandleId, value: &str| format!("| {} RollbackOnly={}", render(handle), value),
        },
    );

    emit_summary(
        lines,
        &state.active,
        Wording {
            kind: ProbeKind::IsActive,
            undetermined: "isActive state of transaction cannot be determined",
            uniform: |active: &bool| {
                if *active {
                    "transaction active".to_string()
                } else {
                    "transaction not active".to_string()
                }
            },
            divergent: "Resource handles participating in the transaction have different isActive values:",
            per_handle: |handle: &HandleId, value: &str| format!("| {} isActive={}", render(handle), value),
        },
    );

    lines.push("|".to_string());
}

fn emit_resources(lines: &mut Vec<String>, resources: &ResourceSection) {
    match &resources.table {
        ResourceTable::NotListed => {}
        ResourceTable::Absent => {
            lines.push("|-------------- resources of the current transaction (key=value) ---------------:".to_string());
            lines.push("| the transaction has no resources".to_string());
        }
        ResourceTable::Unreadable(reason) => {
            lines.push("|-------------- resources of the current transaction (key=value) ---------------:".to_string());
            lines.push(format!("| the resource table cannot be read: {}", reason));
        }
        ResourceTable::Entries(entries) => {
            lines.push("|-------------- resources of the current transaction (key=value) ---------------:".to_string());
            for (key, value) in entries {
                lines.push(format!("|     * {}={}", key, value));
            }
        }
    }

    if resources.synchronizations == Synchronizations::NotListed {
        return;
    }
    lines.push("|            --- synchronization elements of transaction --- ".to_string());
    match &resources.synchronizations {
        Synchronizations::NotListed => {}
        Synchronizations::Inactive => lines.push(
            "|Transaction synchronization is not activated (there are no synchronization elements)"
                .to_string(),
        ),
        Synchronizations::Active(elements) => {
            lines.push("|Transaction synchronization is activated:".to_string());
            if elements.is_empty() {
                lines.push("|    The transaction currently has no synchronization elements".to_string());
            }
            for element in elements {
                lines.push(format!("|    {}", element));
            }
        }
        Synchronizations::Unreadable(reason) => {
            lines.push(format!("|synchronization elements cannot be determined: {}", reason));
        }
    }
}
