use crate::domain::player::{Player, PlayerId, Role};
use crate::domain::state::{GameState, Phase};

fn lobby_with(humans: u64, bots: u32) -> GameState {
    let mut state = GameState::new("camping", Player::human(1, "host"), true);
    for id in 2..=humans {
        state.add_player(Player::human(id, format!("player-{id}")));
    }
    for _ in 0..bots {
        state.add_bot();
    }
    state
}

#[test]
fn new_session_starts_idle_with_host_joined() {
    let state = lobby_with(1, 0);
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.member_count(), 1);
    assert_eq!(state.host, PlayerId::Human(1));
}

#[test]
fn bots_get_sequential_ids_and_are_ready() {
    let mut state = lobby_with(1, 0);
    assert_eq!(state.add_bot(), PlayerId::Bot(1));
    assert_eq!(state.add_bot(), PlayerId::Bot(2));
    assert!(state
        .players()
        .iter()
        .filter(|p| p.is_bot())
        .all(|p| p.ready_in_lobby && p.role_acked));
}

#[test]
fn all_humans_ready_is_false_without_humans() {
    let mut state = lobby_with(1, 2);
    state.remove_player(PlayerId::Human(1));
    assert!(!state.all_humans_ready());
}

#[test]
fn all_humans_ready_ignores_bots() {
    let mut state = lobby_with(2, 3);
    state.player_mut(PlayerId::Human(1)).unwrap().ready_in_lobby = true;
    assert!(!state.all_humans_ready());
    state.player_mut(PlayerId::Human(2)).unwrap().ready_in_lobby = true;
    assert!(state.all_humans_ready());
}

#[test]
fn earliest_human_respects_join_order() {
    let state = lobby_with(3, 1);
    assert_eq!(
        state.earliest_human(PlayerId::Human(1)),
        Some(PlayerId::Human(2))
    );
}

#[test]
fn reset_for_game_clears_round_fields_and_sets_role() {
    let mut state = lobby_with(2, 1);
    let p = state.player_mut(PlayerId::Human(2)).unwrap();
    p.clue = Some("old".into());
    p.vote_target = Some(PlayerId::Human(1));
    p.alive = false;
    p.reset_for_game(Role::Social);

    let p = state.player(PlayerId::Human(2)).unwrap();
    assert!(p.alive);
    assert_eq!(p.role, Some(Role::Social));
    assert!(p.clue.is_none());
    assert!(p.vote_target.is_none());
    assert!(!p.role_acked);
}

#[test]
fn reset_turn_state_clears_clues_and_turn_bookkeeping() {
    let mut state = lobby_with(2, 0);
    state.player_mut(PlayerId::Human(1)).unwrap().clue = Some("x".into());
    state.turn_order = vec![PlayerId::Human(1), PlayerId::Human(2)];
    state.turn_holder = Some(PlayerId::Human(1));

    state.reset_turn_state();
    assert!(state.players().iter().all(|p| p.clue.is_none()));
    assert!(state.turn_order.is_empty());
    assert!(state.turn_holder.is_none());
}

#[test]
fn impostor_alive_tracks_player_state() {
    let mut state = lobby_with(3, 0);
    state.impostor = Some(PlayerId::Human(2));
    assert!(state.impostor_alive());
    state.player_mut(PlayerId::Human(2)).unwrap().alive = false;
    assert!(!state.impostor_alive());
}

#[test]
fn last_bot_returns_latest_joined() {
    let mut state = lobby_with(1, 2);
    assert_eq!(state.last_bot(), Some(PlayerId::Bot(2)));
    state.remove_player(PlayerId::Bot(2));
    assert_eq!(state.last_bot(), Some(PlayerId::Bot(1)));
    state.remove_player(PlayerId::Bot(1));
    assert_eq!(state.last_bot(), None);
}
