//! Per-round turn order computation.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::player::PlayerId;
use crate::domain::state::GameState;

/// A fresh random permutation of the currently-alive members.
///
/// Recomputed at the start of every Turns phase so eliminated players drop
/// out of the rotation.
pub fn compute_turn_order<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Vec<PlayerId> {
    let mut order: Vec<PlayerId> = state.alive().map(|p| p.id).collect();
    order.shuffle(rng);
    order
}
