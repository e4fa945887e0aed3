//! Runs one probe against every handle, isolating failures per handle.

use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;
use txmon_types::{HandleId, ProbeError, ProbeKind, ProbeResult};

use crate::context::ResourceHandle;

/// Run `f`, turning a panic into [`ProbeError::Panicked`].
///
/// The process panic hook still fires before the unwind is caught.
pub(crate) fn contain<T>(f: impl FnOnce() -> Result<T, ProbeError>) -> Result<T, ProbeError> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(outcome) => outcome,
        Err(payload) => Err(ProbeError::Panicked(panic_message(payload.as_ref()))),
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Probe results for one probe, in handle discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResults<T> {
    results: Vec<ProbeResult<T>>,
}

impl<T> ProbeResults<T> {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProbeResult<T>> {
        self.results.iter()
    }

    pub fn get(&self, handle: &HandleId) -> Option<&ProbeResult<T>> {
        self.results.iter().find(|r| &r.handle == handle)
    }

    pub fn successes(&self) -> impl Iterator<Item = &ProbeResult<T>> {
        self.results.iter().filter(|r| !r.failed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProbeResult<T>> {
        self.results.iter().filter(|r| r.failed)
    }

    pub fn into_vec(self) -> Vec<ProbeResult<T>> {
        self.results
    }
}

impl<T> Default for ProbeResults<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
        }
    }
}

/// Keeps the first result per handle; later duplicates are dropped.
impl<T> FromIterator<ProbeResult<T>> for ProbeResults<T> {
    fn from_iter<I: IntoIterator<Item = ProbeResult<T>>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        Self {
            results: iter
                .into_iter()
                .filter(|result| seen.insert(result.handle.clone()))
                .collect(),
        }
    }
}

/// Executes a probe once per distinct handle.
pub struct ProbeRunner {
    kind: ProbeKind,
}

impl ProbeRunner {
    pub fn new(kind: ProbeKind) -> Self {
        Self { kind }
    }

    /// Probe every distinct handle. A failing or panicking probe is recorded
    /// against its own handle and never stops the others.
    pub fn run<T, F>(&self, probe: F, handles: &[ResourceHandle]) -> ProbeResults<T>
    where
        F: Fn(&ResourceHandle) -> Result<T, ProbeError>,
    {
        let mut seen = HashSet::with_capacity(handles.len());
        handles
            .iter()
            .filter(|handle| seen.insert(handle.id().clone()))
            .map(|handle| {
                let outcome = contain(|| probe(handle));
                if let Err(e) = &outcome {
                    debug!(probe = %self.kind, handle = %handle.id(), error = %e, "Probe failed");
                }
                ProbeResult::from_outcome(handle.id().clone(), outcome)
            })
            .collect()
    }
}
