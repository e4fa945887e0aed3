#![deny(unsafe_code)]
//! # txmon-monitor
//!
//! Consistency probe for transactions that bind several pooled resource
//! handles (database sessions, entity managers) to one unit of work.
//!
//! Called mid-transaction, [`TransactionMonitor::report`] produces a
//! human-readable report of the transaction's configuration, its ambient
//! attributes and the state of every bound handle, flagging handles that
//! disagree with each other. It is strictly read-only: it never starts,
//! commits or rolls back anything.
//!
//! ## Key Components
//!
//! - [`ResourceDirectory`]: recognized handles in the ambient resource table
//! - [`ProbeRunner`]: one probe against every handle, failures isolated per handle
//! - [`DivergenceGrouper`]: uniform / divergent classification of probe values
//! - [`ConfigGate`]: checks the host transaction manager, disabling the monitor on mismatch
//! - [`SnapshotAssembler`]: transaction-level attributes, each read best-effort
//! - [`ReportEmitter`]: pure rendering of everything above into report lines
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use txmon_monitor::testing::{FakeResource, InMemoryContext, StaticRegistry};
//! use txmon_monitor::{MonitorConfig, TransactionMonitor, DEFAULT_SUPPORTED_IMPLEMENTATION};
//!
//! let context = InMemoryContext::new()
//!     .with_actual_active(true)
//!     .with_binding(FakeResource::new("em-1").into_binding("orders"))
//!     .with_binding(FakeResource::new("em-2").with_auto_commit(true).into_binding("billing"));
//! let registry = StaticRegistry::new()
//!     .with_manager("transactionManager", DEFAULT_SUPPORTED_IMPLEMENTATION);
//!
//! let monitor = TransactionMonitor::new(
//!     MonitorConfig::default(),
//!     Arc::new(context),
//!     Arc::new(registry),
//! );
//! let report = monitor.report("after billing update");
//! assert!(report.mentions("Contradiction in transaction management"));
//! ```
//!
//! ## Failure model
//!
//! A probe failure is recorded against its own handle and renders as
//! "undetermined". A section that panics becomes a one-line diagnostic.
//! `report` always returns.

pub mod config;
pub mod context;
pub mod directory;
pub mod error;
pub mod gate;
pub mod grouper;
pub mod monitor;
pub mod report;
pub mod runner;
pub mod snapshot;
pub mod state;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use config::{MonitorConfig, DEFAULT_SUPPORTED_IMPLEMENTATION};
pub use context::{
    BoundValue, ManagerRegistry, ResourceBinding, ResourceHandle, ResourceIntrospect,
    TransactionContext, TransactionStatusProvider,
};
pub use directory::ResourceDirectory;
pub use error::{MonitorError, MonitorResult};
pub use gate::{ConfigGate, GateOutcome};
pub use grouper::DivergenceGrouper;
pub use monitor::{Report, TransactionMonitor};
pub use report::{
    ConfigSection, ProbeSummary, ReportEmitter, ReportInput, ResourceSection, ResourceTable,
    Section, StateSection, Synchronizations, PLACEHOLDER, UNDETERMINED,
};
pub use runner::{ProbeResults, ProbeRunner};
pub use snapshot::SnapshotAssembler;
pub use state::SharedMonitorState;

pub use txmon_types::{
    Classification, DivergenceGroup, GateDecision, HandleId, IsolationLevel, MonitorState,
    Observed, ProbeError, ProbeKind, ProbeResult, TransactionSnapshot, Verdict,
};
