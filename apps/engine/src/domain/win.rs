//! Win-condition evaluation and end-of-game payloads.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

use crate::domain::player::{PlayerId, Role};
use crate::domain::secret::Secret;
use crate::domain::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Impostor,
    Socials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    /// The impostor is the only player left alive.
    SoleSurvivor,
    /// Two players remain alive and one of them is the impostor.
    TwoLeft,
    /// The round limit passed with the impostor still alive.
    RoundLimit,
    /// The round limit passed after the impostor had already fallen.
    RoundLimitImpostorDown,
    /// The vote eliminated the impostor.
    ImpostorEliminated,
    /// The impostor left the session mid-game.
    ImpostorLeft,
}

impl Display for EndReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            EndReason::SoleSurvivor => "the impostor is the sole survivor",
            EndReason::TwoLeft => "only two players remain",
            EndReason::RoundLimit => "the round limit was reached",
            EndReason::RoundLimitImpostorDown => {
                "the round limit was reached with the impostor eliminated"
            }
            EndReason::ImpostorEliminated => "the impostor was voted out",
            EndReason::ImpostorLeft => "the impostor left the game",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameEnd {
    pub winner: Winner,
    pub reason: EndReason,
}

/// Everything revealed publicly when a game ends.
#[derive(Debug, Clone, Serialize)]
pub struct EndReveal {
    pub impostor: Option<PlayerId>,
    pub secret: Option<Secret>,
    pub roles: Vec<(PlayerId, Role)>,
}

impl EndReveal {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            impostor: state.impostor,
            secret: state.secret.clone(),
            roles: state
                .players()
                .iter()
                .filter_map(|p| p.role.map(|r| (p.id, r)))
                .collect(),
        }
    }
}

/// Evaluate the between-rounds win conditions, in order.
///
/// Called before opening each Turns phase, with `state.round` already set to
/// the round about to begin. Returns `None` when the round should be played.
pub fn evaluate_round_start(state: &GameState, max_rounds: u32) -> Option<GameEnd> {
    let impostor_alive = state.impostor_alive();
    let alive = state.alive_count();

    if impostor_alive && alive == 1 {
        return Some(GameEnd {
            winner: Winner::Impostor,
            reason: EndReason::SoleSurvivor,
        });
    }
    if impostor_alive && alive <= 2 {
        return Some(GameEnd {
            winner: Winner::Impostor,
            reason: EndReason::TwoLeft,
        });
    }
    if state.round > max_rounds {
        // The impostor's elimination normally ends the game inside the vote
        // phase; the dead-impostor branch still decides for the socials.
        return Some(if impostor_alive {
            GameEnd {
                winner: Winner::Impostor,
                reason: EndReason::RoundLimit,
            }
        } else {
            GameEnd {
                winner: Winner::Socials,
                reason: EndReason::RoundLimitImpostorDown,
            }
        });
    }
    None
}
