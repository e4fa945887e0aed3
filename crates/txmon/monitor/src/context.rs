//! Collaborator interfaces consumed by the monitor.
//!
//! The host transaction manager, its status, the resource handles bound to
//! the current transaction and the manager registry are all external. The
//! monitor only reads them through these traits; every read may fail
//! independently.

use std::fmt;
use std::sync::Arc;

use txmon_types::{HandleId, ProbeError};

/// Read-only view of the calling thread's ambient transaction context.
pub trait TransactionContext: Send + Sync {
    /// Whether a real transaction is active (not just synchronization).
    fn is_actual_transaction_active(&self) -> Result<bool, ProbeError>;

    /// Name of the current transaction, if one is set.
    fn current_transaction_name(&self) -> Result<Option<String>, ProbeError>;

    /// Isolation level code of the current transaction, if one is exposed.
    fn isolation_level(&self) -> Result<Option<i32>, ProbeError>;

    fn is_read_only(&self) -> Result<bool, ProbeError>;

    /// Resource table bound to the transaction; `None` when there is none.
    fn resources(&self) -> Result<Option<Vec<ResourceBinding>>, ProbeError>;

    fn is_synchronization_active(&self) -> Result<bool, ProbeError>;

    /// Description of every registered synchronization callback.
    fn synchronizations(&self) -> Result<Vec<String>, ProbeError>;
}

/// Status of the current transaction as seen by the transaction manager.
pub trait TransactionStatusProvider: Send + Sync {
    fn is_new_transaction(&self) -> Result<bool, ProbeError>;

    fn has_savepoint(&self) -> Result<bool, ProbeError>;

    fn is_completed(&self) -> Result<bool, ProbeError>;

    fn is_rollback_only(&self) -> Result<bool, ProbeError>;
}

/// Introspection capability implemented by resource handle adapters.
///
/// Report a probe that cannot be answered as `Err`, using
/// [`ProbeError::unsupported`] when the handle has no such attribute. Do not
/// panic. A panic is still contained to its handle, but the process panic
/// hook runs first: the message reaches stderr and any host panic reporter
/// outside the `txmon::report` log target, once per probe.
pub trait ResourceIntrospect: Send + Sync {
    /// Auto-commit flag of the handle's connection.
    fn try_auto_commit(&self) -> Result<bool, ProbeError>;

    /// Status label of the handle's own transaction.
    fn try_status_label(&self) -> Result<String, ProbeError>;

    fn try_rollback_only(&self) -> Result<bool, ProbeError>;

    fn try_is_active(&self) -> Result<bool, ProbeError>;

    /// Session-context setting of the handle's factory; `None` when not set.
    fn try_session_context(&self) -> Result<Option<String>, ProbeError> {
        Err(ProbeError::unsupported("session context not exposed"))
    }
}

/// Resolves the concrete implementation of a named transaction manager.
pub trait ManagerRegistry: Send + Sync {
    fn resolve_implementation(&self, bean_name: &str) -> Result<String, ProbeError>;
}

/// One pooled resource bound to the current transaction.
///
/// Borrowed from the host for the duration of one report.
#[derive(Clone)]
pub struct ResourceHandle {
    id: HandleId,
    introspect: Arc<dyn ResourceIntrospect>,
}

impl ResourceHandle {
    pub fn new(id: impl Into<HandleId>, introspect: Arc<dyn ResourceIntrospect>) -> Self {
        Self {
            id: id.into(),
            introspect,
        }
    }

    pub fn id(&self) -> &HandleId {
        &self.id
    }

    pub fn introspect(&self) -> &dyn ResourceIntrospect {
        self.introspect.as_ref()
    }
}

impl fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceHandle").field("id", &self.id).finish()
    }
}

/// Value stored under one key of the resource table.
#[derive(Debug, Clone)]
pub enum BoundValue {
    /// A recognized resource handle.
    Handle(ResourceHandle),
    /// Anything else, by its description.
    Opaque(String),
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Handle(handle) => write!(f, "{}", handle.id()),
            BoundValue::Opaque(description) => f.write_str(description),
        }
    }
}

/// One entry of the resource table.
#[derive(Debug, Clone)]
pub struct ResourceBinding {
    pub key: String,
    pub value: BoundValue,
}

impl ResourceBinding {
    pub fn handle(key: impl Into<String>, handle: ResourceHandle) -> Self {
        Self {
            key: key.into(),
            value: BoundValue::Handle(handle),
        }
    }

    pub fn opaque(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: BoundValue::Opaque(description.into()),
        }
    }

    pub fn as_handle(&self) -> Option<&ResourceHandle> {
        match &self.value {
            BoundValue::Handle(handle) => Some(handle),
            BoundValue::Opaque(_) => None,
        }
    }
}
