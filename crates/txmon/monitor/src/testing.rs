//! In-memory collaborators.
//!
//! Fixed-answer implementations of the collaborator traits, for tests and
//! for hosts that want to exercise the monitor without a live transaction
//! manager. Enabled with the `test-utils` feature.

use std::collections::HashMap;
use std::sync::Arc;

use txmon_types::{HandleId, ProbeError};

use crate::context::{
    ManagerRegistry, ResourceBinding, ResourceHandle, ResourceIntrospect, TransactionContext,
    TransactionStatusProvider,
};

/// A resource handle adapter with canned probe answers.
#[derive(Debug, Clone)]
pub struct FakeResource {
    id: HandleId,
    auto_commit: Result<bool, ProbeError>,
    status_label: Result<String, ProbeError>,
    rollback_only: Result<bool, ProbeError>,
    is_active: Result<bool, ProbeError>,
    session_context: Result<Option<String>, ProbeError>,
    panics: bool,
}

impl FakeResource {
    /// A healthy handle inside a managed, active transaction.
    pub fn new(id: impl Into<HandleId>) -> Self {
        Self {
            id: id.into(),
            auto_commit: Ok(false),
            status_label: Ok("ACTIVE".to_string()),
            rollback_only: Ok(false),
            is_active: Ok(true),
            session_context: Ok(None),
            panics: false,
        }
    }

    pub fn with_auto_commit(mut self, auto_commit: bool) -> Self {
        self.auto_commit = Ok(auto_commit);
        self
    }

    pub fn with_auto_commit_error(mut self, error: ProbeError) -> Self {
        self.auto_commit = Err(error);
        self
    }

    pub fn with_status_label(mut self, label: impl Into<String>) -> Self {
        self.status_label = Ok(label.into());
        self
    }

    pub fn with_status_error(mut self, error: ProbeError) -> Self {
        self.status_label = Err(error);
        self
    }

    pub fn with_rollback_only(mut self, rollback_only: bool) -> Self {
        self.rollback_only = Ok(rollback_only);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = Ok(active);
        self
    }

    pub fn with_session_context(mut self, setting: Option<&str>) -> Self {
        self.session_context = Ok(setting.map(str::to_string));
        self
    }

    /// Every probe panics, as a buggy adapter would.
    pub fn panicking(mut self) -> Self {
        self.panics = true;
        self
    }

    pub fn into_handle(self) -> ResourceHandle {
        let id = self.id.clone();
        ResourceHandle::new(id, Arc::new(self))
    }

    pub fn into_binding(self, key: impl Into<String>) -> ResourceBinding {
        ResourceBinding::handle(key, self.into_handle())
    }

    fn answer<T: Clone>(&self, answer: &Result<T, ProbeError>) -> Result<T, ProbeError> {
        if self.panics {
            panic!("adapter for {} panicked", self.id);
        }
        answer.clone()
    }
}

impl ResourceIntrospect for FakeResource {
    fn try_auto_commit(&self) -> Result<bool, ProbeError> {
        self.answer(&self.auto_commit)
    }

    fn try_status_label(&self) -> Result<String, ProbeError> {
        self.answer(&self.status_label)
    }

    fn try_rollback_only(&self) -> Result<bool, ProbeError> {
        self.answer(&self.rollback_only)
    }

    fn try_is_active(&self) -> Result<bool, ProbeError> {
        self.answer(&self.is_active)
    }

    fn try_session_context(&self) -> Result<Option<String>, ProbeError> {
        self.answer(&self.session_context)
    }
}

/// A fixed ambient transaction context.
#[derive(Debug, Clone)]
pub struct InMemoryContext {
    actual_active: Result<bool, ProbeError>,
    name: Result<Option<String>, ProbeError>,
    isolation: Result<Option<i32>, ProbeError>,
    read_only: Result<bool, ProbeError>,
    resources: Result<Option<Vec<ResourceBinding>>, ProbeError>,
    synchronization_active: Result<bool, ProbeError>,
    synchronizations: Result<Vec<String>, ProbeError>,
}

impl InMemoryContext {
    /// No transaction, no resources, no synchronization.
    pub fn new() -> Self {
        Self {
            actual_active: Ok(false),
            name: Ok(None),
            isolation: Ok(None),
            read_only: Ok(false),
            resources: Ok(None),
            synchronization_active: Ok(false),
            synchronizations: Ok(Vec::new()),
        }
    }

    pub fn with_actual_active(mut self, active: bool) -> Self {
        self.actual_active = Ok(active);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Ok(Some(name.into()));
        self
    }

    pub fn with_isolation(mut self, code: Option<i32>) -> Self {
        self.isolation = Ok(code);
        self
    }

    pub fn with_isolation_error(mut self, error: ProbeError) -> Self {
        self.isolation = Err(error);
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = Ok(read_only);
        self
    }

    /// Append one entry to the resource table.
    pub fn with_binding(mut self, binding: ResourceBinding) -> Self {
        match &mut self.resources {
            Ok(Some(bindings)) => bindings.push(binding),
            _ => self.resources = Ok(Some(vec![binding])),
        }
        self
    }

    pub fn with_resources_error(mut self, error: ProbeError) -> Self {
        self.resources = Err(error);
        self
    }

    /// Activate synchronization with the given registered elements.
    pub fn with_synchronizations<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synchronization_active = Ok(true);
        self.synchronizations = Ok(elements.into_iter().map(Into::into).collect());
        self
    }
}

impl Default for InMemoryContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionContext for InMemoryContext {
    fn is_actual_transaction_active(&self) -> Result<bool, ProbeError> {
        self.actual_active.clone()
    }

    fn current_transaction_name(&self) -> Result<Option<String>, ProbeError> {
        self.name.clone()
    }

    fn isolation_level(&self) -> Result<Option<i32>, ProbeError> {
        self.isolation.clone()
    }

    fn is_read_only(&self) -> Result<bool, ProbeError> {
        self.read_only.clone()
    }

    fn resources(&self) -> Result<Option<Vec<ResourceBinding>>, ProbeError> {
        self.resources.clone()
    }

    fn is_synchronization_active(&self) -> Result<bool, ProbeError> {
        self.synchronization_active.clone()
    }

    fn synchronizations(&self) -> Result<Vec<String>, ProbeError> {
        self.synchronizations.clone()
    }
}

/// Fixed transaction status answers.
#[derive(Debug, Clone)]
pub struct StaticStatus {
    new_transaction: Result<bool, ProbeError>,
    has_savepoint: Result<bool, ProbeError>,
    completed: Result<bool, ProbeError>,
    rollback_only: Result<bool, ProbeError>,
}

impl StaticStatus {
    pub fn new() -> Self {
        Self {
            new_transaction: Ok(false),
            has_savepoint: Ok(false),
            completed: Ok(false),
            rollback_only: Ok(false),
        }
    }

    /// Every read fails with `error`.
    pub fn unavailable(error: ProbeError) -> Self {
        Self {
            new_transaction: Err(error.clone()),
            has_savepoint: Err(error.clone()),
            completed: Err(error.clone()),
            rollback_only: Err(error),
        }
    }

    pub fn with_new_transaction(mut self, new_transaction: bool) -> Self {
        self.new_transaction = Ok(new_transaction);
        self
    }

    pub fn with_savepoint(mut self, has_savepoint: bool) -> Self {
        self.has_savepoint = Ok(has_savepoint);
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Ok(completed);
        self
    }

    pub fn with_rollback_only(mut self, rollback_only: bool) -> Self {
        self.rollback_only = Ok(rollback_only);
        self
    }
}

impl Default for StaticStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStatusProvider for StaticStatus {
    fn is_new_transaction(&self) -> Result<bool, ProbeError> {
        self.new_transaction.clone()
    }

    fn has_savepoint(&self) -> Result<bool, ProbeError> {
        self.has_savepoint.clone()
    }

    fn is_completed(&self) -> Result<bool, ProbeError> {
        self.completed.clone()
    }

    fn is_rollback_only(&self) -> Result<bool, ProbeError> {
        self.rollback_only.clone()
    }
}

/// Registry backed by a name → implementation map.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    managers: HashMap<String, String>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manager(mut self, bean: impl Into<String>, implementation: impl Into<String>) -> Self {
        self.managers.insert(bean.into(), implementation.into());
        self
    }
}

impl ManagerRegistry for StaticRegistry {
    fn resolve_implementation(&self, bean_name: &str) -> Result<String, ProbeError> {
        self.managers
            .get(bean_name)
            .cloned()
            .ok_or_else(|| ProbeError::failed(format!("no bean named '{}' is defined", bean_name)))
    }
}
