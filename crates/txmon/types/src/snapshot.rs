//! Ambient transaction attributes, captured once per report.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ProbeError;

/// An attribute read that may not have been possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Observed<T> {
    Known(T),
    Undetermined,
}

impl<T> Observed<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Observed::Known(value) => Some(value),
            Observed::Undetermined => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Observed::Known(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Observed<U> {
        match self {
            Observed::Known(value) => Observed::Known(f(value)),
            Observed::Undetermined => Observed::Undetermined,
        }
    }
}

impl<T> From<Result<T, ProbeError>> for Observed<T> {
    fn from(outcome: Result<T, ProbeError>) -> Self {
        match outcome {
            Ok(value) => Observed::Known(value),
            Err(_) => Observed::Undetermined,
        }
    }
}

/// Transaction isolation level, by its JDBC-style integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IsolationLevel {
    /// No isolation level exposed for the current transaction.
    NotDefined,
    /// -1
    Default,
    /// 1
    ReadUncommitted,
    /// 2
    ReadCommitted,
    /// 4
    RepeatableRead,
    /// 8
    Serializable,
    /// Any code outside the fixed table.
    Other(i32),
}

impl IsolationLevel {
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            None => IsolationLevel::NotDefined,
            Some(-1) => IsolationLevel::Default,
            Some(1) => IsolationLevel::ReadUncommitted,
            Some(2) => IsolationLevel::ReadCommitted,
            Some(4) => IsolationLevel::RepeatableRead,
            Some(8) => IsolationLevel::Serializable,
            Some(other) => IsolationLevel::Other(other),
        }
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            IsolationLevel::NotDefined => None,
            IsolationLevel::Default => Some(-1),
            IsolationLevel::ReadUncommitted => Some(1),
            IsolationLevel::ReadCommitted => Some(2),
            IsolationLevel::RepeatableRead => Some(4),
            IsolationLevel::Serializable => Some(8),
            IsolationLevel::Other(code) => Some(*code),
        }
    }
}

impl fmt::Display for IsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsolationLevel::NotDefined => write!(f, "not defined"),
            IsolationLevel::Default => write!(f, "ISOLATION_DEFAULT (-1)"),
            IsolationLevel::ReadUncommitted => write!(f, "ISOLATION_READ_UNCOMMITTED (1)"),
            IsolationLevel::ReadCommitted => write!(f, "ISOLATION_READ_COMMITTED (2)"),
            IsolationLevel::RepeatableRead => write!(f, "ISOLATION_REPEATABLE_READ (4)"),
            IsolationLevel::Serializable => write!(f, "ISOLATION_SERIALIZABLE (8)"),
            IsolationLevel::Other(code) => write!(f, "new ({})", code),
        }
    }
}

/// Transaction-level attributes, independent of any resource handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSnapshot {
    /// Current transaction name; `Known(None)` when no name is set.
    pub name: Observed<Option<String>>,

    /// Whether a real transaction is active on this thread.
    pub actual_active: Observed<bool>,

    pub isolation: Observed<IsolationLevel>,

    pub read_only: Observed<bool>,

    /// Whether the transaction was newly created (not joined).
    pub new_transaction: Observed<bool>,

    pub has_savepoint: Observed<bool>,

    pub completed: Observed<bool>,

    pub rollback_only: Observed<bool>,
}

impl TransactionSnapshot {
    /// A snapshot where nothing could be read.
    pub fn undetermined() -> Self {
        Self {
            name: Observed::Undetermined,
            actual_active: Observed::Undetermined,
            isolation: Observed::Undetermined,
            read_only: Observed::Undetermined,
            new_transaction: Observed::Undetermined,
            has_savepoint: Observed::Undetermined,
            completed: Observed::Undetermined,
            rollback_only: Observed::Undetermined,
        }
    }
}
