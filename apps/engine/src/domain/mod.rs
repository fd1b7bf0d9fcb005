//! Domain layer: pure game logic types and helpers.
//!
//! Nothing in this module touches the async runtime, the registry, or the
//! adapter; it is all synchronous state manipulation that the services drive
//! under the session lock.

pub mod clue;
pub mod player;
pub mod secret;
pub mod snapshot;
pub mod state;
pub mod turn_order;
pub mod vote;
pub mod win;

#[cfg(test)]
mod tests_clue;
#[cfg(test)]
mod tests_props_vote;
#[cfg(test)]
mod tests_secret;
#[cfg(test)]
mod tests_state;
#[cfg(test)]
mod tests_turn_order;
#[cfg(test)]
mod tests_vote;
#[cfg(test)]
mod tests_win;

// Re-exports for ergonomics
pub use clue::{normalize_clue, AFK_CLUE, BOT_CLUE};
pub use player::{Player, PlayerId, Role};
pub use secret::{draw_secret, Secret};
pub use snapshot::{PanelPlayer, SessionPanel, VoteCandidate};
pub use state::{GameState, Phase};
pub use turn_order::compute_turn_order;
pub use vote::{decide_elimination, tally_votes};
pub use win::{evaluate_round_start, EndReason, EndReveal, GameEnd, Winner};
