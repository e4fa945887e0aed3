#![deny(unsafe_code)]
//! # txmon-types
//!
//! Shared data model for the txmon transaction consistency monitor.
//!
//! - [`HandleId`]: identity of one pooled resource handle bound to a transaction
//! - [`ProbeResult`]: outcome of one introspection probe against one handle
//! - [`Classification`]: uniform / divergent partition of probe results
//! - [`TransactionSnapshot`]: ambient transaction attributes captured once per report
//! - [`MonitorState`] and [`GateDecision`]: the sticky disablement machine

pub mod divergence;
pub mod error;
pub mod ids;
pub mod probe;
pub mod snapshot;
pub mod state;

pub use divergence::{Classification, DivergenceGroup, Verdict};
pub use error::ProbeError;
pub use ids::HandleId;
pub use probe::{ProbeKind, ProbeResult};
pub use snapshot::{IsolationLevel, Observed, TransactionSnapshot};
pub use state::{GateDecision, MonitorState};
