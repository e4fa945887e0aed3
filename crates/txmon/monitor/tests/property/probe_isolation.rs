//! Property tests: one failing handle never hides the others.

use proptest::prelude::*;
use txmon_monitor::testing::FakeResource;
use txmon_monitor::{ProbeError, ProbeKind, ProbeRunner, ResourceHandle};

fn handles(count: usize, broken: usize, panics: bool) -> Vec<ResourceHandle> {
    (0..count)
        .map(|i| {
            let resource = FakeResource::new(format!("em-{}", i)).with_auto_commit(i % 2 == 0);
            let resource = if i != broken {
                resource
            } else if panics {
                resource.panicking()
            } else {
                resource.with_auto_commit_error(ProbeError::failed("connection closed"))
            };
            resource.into_handle()
        })
        .collect()
}

proptest! {
    #[test]
    fn one_failure_leaves_the_rest(count in 1usize..12, broken_seed in any::<usize>(), panics in any::<bool>()) {
        let broken = broken_seed % count;
        let handles = handles(count, broken, panics);

        let results = ProbeRunner::new(ProbeKind::AutoCommit)
            .run(|h| h.introspect().try_auto_commit(), &handles);

        prop_assert_eq!(results.len(), count);
        prop_assert_eq!(results.successes().count(), count - 1);
        prop_assert_eq!(results.failures().count(), 1);
        for (i, result) in results.iter().enumerate() {
            prop_assert_eq!(result.handle.as_str(), format!("em-{}", i));
            if i == broken {
                prop_assert!(result.failed);
                prop_assert!(result.failure_reason.is_some());
            } else {
                prop_assert_eq!(result.value(), Some(&(i % 2 == 0)));
            }
        }
    }

    #[test]
    fn duplicates_are_probed_once(count in 1usize..8, repeats in 1usize..4) {
        let base = handles(count, usize::MAX, false);
        let mut doubled = Vec::new();
        for _ in 0..repeats {
            doubled.extend(base.iter().cloned());
        }

        let results = ProbeRunner::new(ProbeKind::IsActive)
            .run(|h| h.introspect().try_is_active(), &doubled);

        prop_assert_eq!(results.len(), count);
    }
}
