//! Serializable views handed to the adapter.

use serde::Serialize;

use crate::domain::player::PlayerId;
use crate::domain::state::{GameState, Phase};

/// One row of the lobby/game panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelPlayer {
    pub id: PlayerId,
    pub display: String,
    pub is_bot: bool,
    pub ready: bool,
    pub alive: bool,
}

/// Snapshot of a session for the platform to render as its dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionPanel {
    pub name: String,
    pub host: PlayerId,
    pub open: bool,
    pub phase: Phase,
    pub round: u32,
    pub slots: String,
    pub players: Vec<PanelPlayer>,
}

impl SessionPanel {
    pub fn from_state(state: &GameState, max_players: usize) -> Self {
        Self {
            name: state.name.clone(),
            host: state.host,
            open: state.open,
            phase: state.phase,
            round: state.round,
            slots: format!("{}/{max_players}", state.member_count()),
            players: state
                .players()
                .iter()
                .map(|p| PanelPlayer {
                    id: p.id,
                    display: p.display.clone(),
                    is_bot: p.is_bot(),
                    ready: p.ready_in_lobby,
                    alive: p.alive,
                })
                .collect(),
        }
    }
}

/// One line of the vote sheet: a living player and the clue they gave this
/// round (the AFK sentinel when they never answered).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteCandidate {
    pub player: PlayerId,
    pub display: String,
    pub clue: String,
}

impl VoteCandidate {
    pub fn sheet(state: &GameState) -> Vec<VoteCandidate> {
        state
            .alive()
            .map(|p| VoteCandidate {
                player: p.id,
                display: p.display.clone(),
                clue: p.clue.clone().unwrap_or_else(|| super::AFK_CLUE.to_string()),
            })
            .collect()
    }
}
