//! The voting window: opening the sheet, collecting votes, closing early,
//! and applying the elimination.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::adapter::AdapterError;
use crate::domain::player::{PlayerId, Role};
use crate::domain::snapshot::VoteCandidate;
use crate::domain::state::Phase;
use crate::domain::vote::{decide_elimination, tally_votes};
use crate::domain::win::{EndReason, GameEnd, Winner};
use crate::error::EngineError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::session::{PhaseTask, Session, SessionId};

use super::GameFlowService;

impl GameFlowService {
    /// Opens the vote over this round's clue sheet. Bots vote for themselves
    /// immediately; the window closes as soon as every living human has
    /// voted, or at the deadline.
    pub(crate) async fn start_vote_phase(
        &self,
        session: &Arc<Session>,
    ) -> Result<(), EngineError> {
        let id = session.id().clone();
        let (candidates, rx) = {
            let mut inner = session.lock().await;
            if inner.game.phase != Phase::Turns {
                return Ok(());
            }
            inner.game.phase = Phase::Vote;
            inner.game.reset_vote_state();
            let bots: Vec<PlayerId> = inner
                .game
                .alive()
                .filter(|p| p.is_bot())
                .map(|p| p.id)
                .collect();
            for bot in bots {
                if let Some(p) = inner.game.player_mut(bot) {
                    p.vote_target = Some(bot);
                }
            }
            let (tx, rx) = oneshot::channel();
            inner.gates.vote = Some(tx);
            (VoteCandidate::sheet(&inner.game), rx)
        };

        match self
            .adapter
            .announce_vote_open(&id, &candidates, self.config.vote_timeout.as_secs())
            .await
        {
            Ok(()) => {}
            Err(AdapterError::ChannelMissing) => {
                self.force_teardown(&id).await;
                return Err(AdapterError::ChannelMissing.into());
            }
            Err(err) => warn!(session_id = %id, %err, "vote announcement failed"),
        }

        let service = self.clone();
        let task_session = Arc::clone(session);
        self.start_phase_task(
            session,
            PhaseTask::Vote,
            Box::pin(async move { service.run_vote_phase(task_session, rx).await }),
        )
        .await;
        Ok(())
    }

    /// Vote phase task: wait out the window, then apply the result.
    async fn run_vote_phase(
        self,
        session: Arc<Session>,
        rx: oneshot::Receiver<()>,
    ) -> Result<(), EngineError> {
        let id = session.id().clone();
        let _ = tokio::time::timeout(self.config.vote_timeout, rx).await;

        let outcome = {
            let mut inner = session.lock().await;
            if inner.game.phase != Phase::Vote {
                return Ok(());
            }
            inner.gates.vote = None;
            let counts = tally_votes(&inner.game);
            match decide_elimination(&counts) {
                Some(victim) => {
                    let role = inner
                        .game
                        .player(victim)
                        .and_then(|p| p.role)
                        .unwrap_or(Role::Social);
                    if let Some(p) = inner.game.player_mut(victim) {
                        p.alive = false;
                    }
                    info!(session_id = %id, %victim, "player eliminated");
                    let impostor_out = inner.game.impostor == Some(victim);
                    if !impostor_out {
                        inner.game.round += 1;
                    }
                    Some((victim, role, impostor_out))
                }
                None => {
                    inner.game.round += 1;
                    None
                }
            }
        };

        match outcome {
            Some((victim, role, impostor_out)) => {
                match self.adapter.announce_elimination(&id, victim, role).await {
                    Ok(()) => {}
                    Err(AdapterError::ChannelMissing) => {
                        self.force_teardown(&id).await;
                        return Err(AdapterError::ChannelMissing.into());
                    }
                    Err(err) => warn!(session_id = %id, %err, "elimination announcement failed"),
                }
                if impostor_out {
                    self.trigger_end_game(
                        &session,
                        GameEnd {
                            winner: Winner::Socials,
                            reason: EndReason::ImpostorEliminated,
                        },
                    )
                    .await;
                    return Ok(());
                }
            }
            None => {
                self.notify(&id, "The vote is tied. No one is eliminated.")
                    .await?;
            }
        }

        self.start_round(&session).await
    }

    /// A living player casts or changes their vote while the window is open.
    pub async fn submit_vote(
        &self,
        id: &SessionId,
        voter: PlayerId,
        target: PlayerId,
    ) -> Result<(), EngineError> {
        let Some(session) = self.registry.find_by_id(id) else {
            debug!(session_id = %id, %voter, "vote for a gone session");
            return Ok(());
        };
        let mut inner = session.lock().await;
        match inner.game.phase {
            Phase::Vote => {}
            // During Turns the last window already resolved; the late vote is
            // dropped without complaint.
            Phase::Turns | Phase::End => {
                debug!(session_id = %id, %voter, "vote outside an open window");
                return Ok(());
            }
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::VotingClosed,
                    "voting is not open right now",
                )
                .into());
            }
        }
        match inner.game.player(voter) {
            Some(p) if p.alive => {}
            Some(_) => {
                return Err(DomainError::validation(
                    ValidationKind::NotAlive,
                    "eliminated players cannot vote",
                )
                .into());
            }
            None => {
                return Err(DomainError::validation(
                    ValidationKind::NotAMember,
                    "you are not in this game",
                )
                .into());
            }
        }
        match inner.game.player(target) {
            Some(p) if p.alive => {}
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::InvalidVoteTarget,
                    "that player cannot be voted for",
                )
                .into());
            }
        }
        if let Some(p) = inner.game.player_mut(voter) {
            p.vote_target = Some(target);
        }
        if inner.game.all_alive_humans_voted() {
            if let Some(gate) = inner.gates.vote.take() {
                let _ = gate.send(());
            }
        }
        Ok(())
    }

    /// Withdraws a pending vote while the window is still open.
    pub async fn clear_vote(&self, id: &SessionId, voter: PlayerId) -> Result<(), EngineError> {
        let Some(session) = self.registry.find_by_id(id) else {
            debug!(session_id = %id, %voter, "vote retraction for a gone session");
            return Ok(());
        };
        let mut inner = session.lock().await;
        match inner.game.phase {
            Phase::Vote => {}
            Phase::Turns | Phase::End => return Ok(()),
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::VotingClosed,
                    "voting is not open right now",
                )
                .into());
            }
        }
        let Some(p) = inner.game.player_mut(voter) else {
            return Err(DomainError::validation(
                ValidationKind::NotAMember,
                "you are not in this game",
            )
            .into());
        };
        p.vote_target = None;
        Ok(())
    }
}
