//! Vote tallying and elimination resolution.

use std::collections::BTreeMap;

use crate::domain::player::PlayerId;
use crate::domain::state::GameState;

/// Count votes per target among alive players.
///
/// Bots have already self-voted by the time this runs; dead players' stale
/// votes never count. The map is ordered so iteration is deterministic.
pub fn tally_votes(state: &GameState) -> BTreeMap<PlayerId, u32> {
    let mut counts = BTreeMap::new();
    for voter in state.alive() {
        if let Some(target) = voter.vote_target {
            *counts.entry(target).or_insert(0) += 1;
        }
    }
    counts
}

/// Resolve a tally into an elimination.
///
/// Returns `Some(target)` only when a single target holds the maximum count;
/// a shared maximum (or an empty tally) eliminates nobody.
pub fn decide_elimination(counts: &BTreeMap<PlayerId, u32>) -> Option<PlayerId> {
    let max = *counts.values().max()?;
    let mut leaders = counts.iter().filter(|(_, c)| **c == max);
    let (leader, _) = leaders.next()?;
    if leaders.next().is_some() {
        None
    } else {
        Some(*leader)
    }
}
