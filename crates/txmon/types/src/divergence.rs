//! Uniform / divergent classification of probe values.

use serde::{Deserialize, Serialize};

use crate::ids::HandleId;

/// All handles that reported one distinct value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergenceGroup<T> {
    pub value: T,
    /// Handles in discovery order.
    pub handles: Vec<HandleId>,
}

/// Partition of probed handles into value groups plus failed handles.
///
/// Every probed handle appears in exactly one group or in `failed`.
/// Groups are ordered by the discovery position of their first handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification<T> {
    pub groups: Vec<DivergenceGroup<T>>,
    pub failed: Vec<HandleId>,
}

/// Reading of a [`Classification`] for reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict<'a, T> {
    /// No handle produced a value.
    Undetermined,
    /// Every determinable handle agrees.
    Uniform(&'a T),
    /// Two or more distinct values.
    Divergent(&'a [DivergenceGroup<T>]),
}

impl<T> Classification<T> {
    pub fn empty() -> Self {
        Self {
            groups: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of handles covered, determinable or not.
    pub fn handle_count(&self) -> usize {
        self.groups.iter().map(|g| g.handles.len()).sum::<usize>() + self.failed.len()
    }

    pub fn is_uniform(&self) -> bool {
        self.groups.len() == 1
    }

    pub fn is_divergent(&self) -> bool {
        self.groups.len() > 1
    }

    pub fn verdict(&self) -> Verdict<'_, T> {
        match self.groups.as_slice() {
            [] => Verdict::Undetermined,
            [only] => Verdict::Uniform(&only.value),
            groups => Verdict::Divergent(groups),
        }
    }

    /// Shared value when uniform.
    pub fn uniform_value(&self) -> Option<&T> {
        match self.verdict() {
            Verdict::Uniform(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for Classification<T> {
    fn default() -> Self {
        Self::empty()
    }
}
