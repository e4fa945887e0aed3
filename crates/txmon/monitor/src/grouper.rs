//! Groups probe values to detect agreement or divergence across handles.

use txmon_types::{Classification, DivergenceGroup};

use crate::runner::ProbeResults;

/// Partitions probe results by value equality.
pub struct DivergenceGrouper;

impl DivergenceGrouper {
    /// Classify results into value groups plus failed handles.
    ///
    /// Groups come out in the discovery order of their first handle, and
    /// handles inside a group keep discovery order.
    pub fn classify<T>(results: &ProbeResults<T>) -> Classification<T>
    where
        T: PartialEq + Clone,
    {
        let mut classification = Classification::empty();

        for result in results.iter() {
            let Some(value) = result.value() else {
                classification.failed.push(result.handle.clone());
                continue;
            };

            match classification
                .groups
                .iter_mut()
                .find(|group| &group.value == value)
            {
                Some(group) => group.handles.push(result.handle.clone()),
                None => classification.groups.push(DivergenceGroup {
                    value: value.clone(),
                    handles: vec![result.handle.clone()],
                }),
            }
        }

        classification
    }
}
