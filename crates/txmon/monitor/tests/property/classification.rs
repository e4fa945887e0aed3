//! Property tests for divergence grouping.

use std::collections::HashSet;

use proptest::prelude::*;
use txmon_monitor::{DivergenceGrouper, HandleId, ProbeResult, ProbeResults};

fn arb_outcomes() -> impl Strategy<Value = Vec<Option<u8>>> {
    prop::collection::vec(
        prop_oneof![
            4 => (0u8..4).prop_map(Some),
            1 => Just(None),
        ],
        0..24,
    )
}

fn results(outcomes: &[Option<u8>]) -> ProbeResults<u8> {
    outcomes
        .iter()
        .enumerate()
        .map(|(i, outcome)| {
            let handle = HandleId::new(format!("h-{}", i));
            match outcome {
                Some(value) => ProbeResult::success(handle, *value),
                None => ProbeResult::failure(handle, "probe failed"),
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn uniform_values_form_one_group(value in 0u8..4, count in 1usize..16) {
        let classification = DivergenceGrouper::classify(&results(&vec![Some(value); count]));

        prop_assert_eq!(classification.group_count(), 1);
        prop_assert!(classification.is_uniform());
        prop_assert_eq!(classification.uniform_value(), Some(&value));
    }

    #[test]
    fn group_count_equals_distinct_values(outcomes in arb_outcomes()) {
        let classification = DivergenceGrouper::classify(&results(&outcomes));
        let distinct: HashSet<u8> = outcomes.iter().flatten().copied().collect();

        prop_assert_eq!(classification.group_count(), distinct.len());
        prop_assert_eq!(classification.is_divergent(), distinct.len() > 1);
    }

    #[test]
    fn partition_is_total_and_disjoint(outcomes in arb_outcomes()) {
        let classification = DivergenceGrouper::classify(&results(&outcomes));

        let mut seen = HashSet::new();
        for group in &classification.groups {
            prop_assert!(!group.handles.is_empty());
            for handle in &group.handles {
                prop_assert!(seen.insert(handle.clone()));
            }
        }
        for handle in &classification.failed {
            prop_assert!(seen.insert(handle.clone()));
        }
        prop_assert_eq!(seen.len(), outcomes.len());
        prop_assert_eq!(
            classification.failed.len(),
            outcomes.iter().filter(|o| o.is_none()).count()
        );
    }

    #[test]
    fn groups_follow_first_appearance(outcomes in arb_outcomes()) {
        let classification = DivergenceGrouper::classify(&results(&outcomes));

        let mut order: Vec<u8> = Vec::new();
        for value in outcomes.iter().flatten() {
            if !order.contains(value) {
                order.push(*value);
            }
        }
        let grouped: Vec<u8> = classification.groups.iter().map(|g| g.value).collect();
        prop_assert_eq!(grouped, order);
    }
}
