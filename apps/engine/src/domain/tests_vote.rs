use crate::domain::player::{Player, PlayerId};
use crate::domain::state::GameState;
use crate::domain::vote::{decide_elimination, tally_votes};

fn h(n: u64) -> PlayerId {
    PlayerId::Human(n)
}

/// Five alive players (4 humans + 1 bot), bot already self-voted.
fn voting_state() -> GameState {
    let mut state = GameState::new("tally", Player::human(1, "p1"), true);
    for id in 2..=4 {
        state.add_player(Player::human(id, format!("p{id}")));
    }
    let bot = state.add_bot();
    state.player_mut(bot).unwrap().vote_target = Some(bot);
    state
}

fn cast(state: &mut GameState, voter: u64, target: PlayerId) {
    state.player_mut(h(voter)).unwrap().vote_target = Some(target);
}

#[test]
fn shared_maximum_eliminates_nobody() {
    // {A:2, B:2, bot:1} among 5 alive players
    let mut state = voting_state();
    cast(&mut state, 1, h(2));
    cast(&mut state, 2, h(1));
    cast(&mut state, 3, h(2));
    cast(&mut state, 4, h(1));

    let counts = tally_votes(&state);
    assert_eq!(counts[&h(1)], 2);
    assert_eq!(counts[&h(2)], 2);
    assert_eq!(counts[&PlayerId::Bot(1)], 1);
    assert_eq!(decide_elimination(&counts), None);
}

#[test]
fn unique_maximum_is_eliminated() {
    // {A:3, B:2}
    let mut state = voting_state();
    state.player_mut(PlayerId::Bot(1)).unwrap().vote_target = Some(h(2));
    cast(&mut state, 1, h(2));
    cast(&mut state, 2, h(2));
    cast(&mut state, 3, h(1));
    cast(&mut state, 4, h(1));

    let counts = tally_votes(&state);
    assert_eq!(counts[&h(2)], 3);
    assert_eq!(counts[&h(1)], 2);
    assert_eq!(decide_elimination(&counts), Some(h(2)));
}

#[test]
fn empty_tally_eliminates_nobody() {
    let mut state = voting_state();
    // Even the bot never voted.
    state.player_mut(PlayerId::Bot(1)).unwrap().vote_target = None;
    let counts = tally_votes(&state);
    assert!(counts.is_empty());
    assert_eq!(decide_elimination(&counts), None);
}

#[test]
fn dead_players_votes_do_not_count() {
    let mut state = voting_state();
    cast(&mut state, 1, h(2));
    cast(&mut state, 2, h(2));
    state.player_mut(h(1)).unwrap().alive = false;

    let counts = tally_votes(&state);
    assert_eq!(counts[&h(2)], 1);
}

#[test]
fn self_votes_count() {
    let mut state = voting_state();
    cast(&mut state, 1, h(1));
    cast(&mut state, 2, h(1));
    cast(&mut state, 3, h(1));

    let counts = tally_votes(&state);
    assert_eq!(decide_elimination(&counts), Some(h(1)));
}
