use crate::domain::player::{Player, PlayerId, Role};
use crate::domain::state::GameState;
use crate::domain::win::{evaluate_round_start, EndReason, Winner};

/// A mid-game state: `alive` humans alive, impostor is Human(1).
fn game_state(alive: u64, total: u64, round: u32) -> GameState {
    let mut state = GameState::new("win", Player::human(1, "p1"), true);
    for id in 2..=total {
        state.add_player(Player::human(id, format!("p{id}")));
    }
    for id in 1..=total {
        let role = if id == 1 { Role::Impostor } else { Role::Social };
        state.player_mut(PlayerId::Human(id)).unwrap().reset_for_game(role);
    }
    for id in (alive + 1)..=total {
        state.player_mut(PlayerId::Human(id)).unwrap().alive = false;
    }
    state.impostor = Some(PlayerId::Human(1));
    state.round = round;
    state
}

#[test]
fn sole_surviving_impostor_wins() {
    let state = game_state(1, 5, 3);
    let end = evaluate_round_start(&state, 4).unwrap();
    assert_eq!(end.winner, Winner::Impostor);
    assert_eq!(end.reason, EndReason::SoleSurvivor);
}

#[test]
fn two_alive_with_impostor_is_an_impostor_win() {
    let state = game_state(2, 5, 2);
    let end = evaluate_round_start(&state, 4).unwrap();
    assert_eq!(end.winner, Winner::Impostor);
    assert_eq!(end.reason, EndReason::TwoLeft);
}

#[test]
fn round_limit_with_impostor_alive_is_an_impostor_win() {
    let state = game_state(4, 5, 5);
    let end = evaluate_round_start(&state, 4).unwrap();
    assert_eq!(end.winner, Winner::Impostor);
    assert_eq!(end.reason, EndReason::RoundLimit);
}

#[test]
fn round_limit_with_impostor_down_is_a_social_win() {
    let mut state = game_state(4, 5, 5);
    state.player_mut(PlayerId::Human(1)).unwrap().alive = false;
    let end = evaluate_round_start(&state, 4).unwrap();
    assert_eq!(end.winner, Winner::Socials);
    assert_eq!(end.reason, EndReason::RoundLimitImpostorDown);
}

#[test]
fn final_round_is_still_played() {
    // round == max_rounds plays out; the limit only bites once exceeded.
    let state = game_state(4, 5, 4);
    assert!(evaluate_round_start(&state, 4).is_none());
}

#[test]
fn mid_game_with_three_alive_continues() {
    let state = game_state(3, 5, 2);
    assert!(evaluate_round_start(&state, 4).is_none());
}

#[test]
fn two_alive_without_impostor_continues() {
    // Impostor dead and two socials left: the limit rule decides later.
    let mut state = game_state(3, 5, 2);
    state.player_mut(PlayerId::Human(1)).unwrap().alive = false;
    assert!(evaluate_round_start(&state, 4).is_none());
}
