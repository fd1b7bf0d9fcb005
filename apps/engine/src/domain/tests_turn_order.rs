use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::player::{Player, PlayerId};
use crate::domain::state::GameState;
use crate::domain::turn_order::compute_turn_order;

fn state_with(humans: u64, bots: u32) -> GameState {
    let mut state = GameState::new("order", Player::human(1, "host"), true);
    for id in 2..=humans {
        state.add_player(Player::human(id, format!("p{id}")));
    }
    for _ in 0..bots {
        state.add_bot();
    }
    state
}

#[test]
fn order_is_a_permutation_of_alive_members() {
    let mut state = state_with(4, 1);
    state.player_mut(PlayerId::Human(3)).unwrap().alive = false;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let order = compute_turn_order(&state, &mut rng);

    let expected: BTreeSet<PlayerId> = state.alive().map(|p| p.id).collect();
    let got: BTreeSet<PlayerId> = order.iter().copied().collect();
    assert_eq!(order.len(), 4);
    assert_eq!(got, expected);
    assert!(!order.contains(&PlayerId::Human(3)));
}

#[test]
fn order_is_seed_deterministic() {
    let state = state_with(5, 0);
    let a = compute_turn_order(&state, &mut ChaCha8Rng::seed_from_u64(42));
    let b = compute_turn_order(&state, &mut ChaCha8Rng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn different_seeds_eventually_differ() {
    let state = state_with(5, 0);
    let base = compute_turn_order(&state, &mut ChaCha8Rng::seed_from_u64(0));
    let moved = (1..64u64)
        .any(|s| compute_turn_order(&state, &mut ChaCha8Rng::seed_from_u64(s)) != base);
    assert!(moved, "64 seeds all produced the same permutation");
}
