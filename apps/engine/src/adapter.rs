//! The notification/input boundary between the engine and the hosting chat
//! platform.
//!
//! The engine never talks to the platform directly: it calls these methods to
//! render state and announce events, and the platform calls back into
//! [`GameFlowService`](crate::services::game_flow::GameFlowService) with
//! player actions. Adapter failures come back as typed results; the engine
//! handles them explicitly instead of swallowing them.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::player::{PlayerId, Role};
use crate::domain::secret::Secret;
use crate::domain::snapshot::{SessionPanel, VoteCandidate};
use crate::domain::win::{EndReveal, GameEnd};
use crate::session::SessionId;

#[derive(Error, Debug)]
pub enum AdapterError {
    /// The session's channel or backing resource no longer exists.
    ///
    /// Fatal for that session only: the engine cancels its timers and tears
    /// it down. Never propagates to the process.
    #[error("session channel or backing resource is gone")]
    ChannelMissing,
    /// Any other delivery failure; logged and survivable.
    #[error("adapter failure: {0}")]
    Other(String),
}

/// Outbound calls the engine issues to the platform.
#[async_trait]
pub trait GameAdapter: Send + Sync {
    /// Redraw the session dashboard.
    async fn render_panel(&self, session: &SessionId, panel: &SessionPanel)
        -> Result<(), AdapterError>;

    /// Free-form public announcement in the session channel.
    async fn announce(&self, session: &SessionId, text: &str) -> Result<(), AdapterError>;

    /// Private, pull-based role delivery to one player. `secret` is present
    /// for socials only.
    async fn reveal_role(
        &self,
        session: &SessionId,
        player: PlayerId,
        role: Role,
        secret: Option<&Secret>,
    ) -> Result<(), AdapterError>;

    /// A player's turn opened; they have `seconds` to submit a clue.
    async fn announce_turn(
        &self,
        session: &SessionId,
        player: PlayerId,
        seconds: u64,
    ) -> Result<(), AdapterError>;

    /// Voting opened over the given clue sheet, closing after `seconds`.
    async fn announce_vote_open(
        &self,
        session: &SessionId,
        candidates: &[VoteCandidate],
        seconds: u64,
    ) -> Result<(), AdapterError>;

    /// A player was voted out and their role is now public.
    async fn announce_elimination(
        &self,
        session: &SessionId,
        player: PlayerId,
        role: Role,
    ) -> Result<(), AdapterError>;

    /// The game ended; reveal everything.
    async fn announce_end(
        &self,
        session: &SessionId,
        end: &GameEnd,
        reveal: &EndReveal,
    ) -> Result<(), AdapterError>;
}

/// Adapter that discards everything; useful for embedding and benchmarks.
#[derive(Debug, Default)]
pub struct NullAdapter;

#[async_trait]
impl GameAdapter for NullAdapter {
    async fn render_panel(
        &self,
        _session: &SessionId,
        _panel: &SessionPanel,
    ) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn announce(&self, _session: &SessionId, _text: &str) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn reveal_role(
        &self,
        _session: &SessionId,
        _player: PlayerId,
        _role: Role,
        _secret: Option<&Secret>,
    ) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn announce_turn(
        &self,
        _session: &SessionId,
        _player: PlayerId,
        _seconds: u64,
    ) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn announce_vote_open(
        &self,
        _session: &SessionId,
        _candidates: &[VoteCandidate],
        _seconds: u64,
    ) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn announce_elimination(
        &self,
        _session: &SessionId,
        _player: PlayerId,
        _role: Role,
    ) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn announce_end(
        &self,
        _session: &SessionId,
        _end: &GameEnd,
        _reveal: &EndReveal,
    ) -> Result<(), AdapterError> {
        Ok(())
    }
}
