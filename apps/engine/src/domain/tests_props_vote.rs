use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::domain::player::PlayerId;
use crate::domain::vote::decide_elimination;

fn arb_counts() -> impl Strategy<Value = BTreeMap<PlayerId, u32>> {
    proptest::collection::btree_map(
        (1u64..=10).prop_map(PlayerId::Human),
        1u32..=5,
        0..=6,
    )
}

proptest! {
    /// The eliminated player, when there is one, holds a strictly larger
    /// count than every other target.
    #[test]
    fn eliminated_player_has_unique_maximum(counts in arb_counts()) {
        if let Some(target) = decide_elimination(&counts) {
            let max = counts[&target];
            for (other, count) in &counts {
                if *other != target {
                    prop_assert!(*count < max);
                }
            }
        }
    }

    /// If any two targets share the maximum, nobody is eliminated.
    #[test]
    fn shared_maximum_never_eliminates(counts in arb_counts()) {
        let max = counts.values().copied().max().unwrap_or(0);
        let leaders = counts.values().filter(|c| **c == max).count();
        if leaders > 1 {
            prop_assert_eq!(decide_elimination(&counts), None);
        }
    }

    /// Resolution is a pure function of the tally.
    #[test]
    fn resolution_is_deterministic(counts in arb_counts()) {
        prop_assert_eq!(decide_elimination(&counts), decide_elimination(&counts));
    }
}
