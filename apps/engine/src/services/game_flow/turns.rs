//! The clue round: sequential turns with per-turn timers, bot play and the
//! AFK fallback.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::adapter::AdapterError;

use crate::domain::clue::{normalize_clue, AFK_CLUE, BOT_CLUE};
use crate::domain::player::PlayerId;
use crate::domain::state::Phase;
use crate::error::EngineError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::session::{Session, SessionId};

use super::GameFlowService;

enum Turn {
    /// Player already gone or dead; move on silently.
    Skip,
    /// Bot turn: play the canned clue after a short pause.
    Bot,
    /// Human turn: wait on the gate up to the turn timeout.
    Human(oneshot::Receiver<()>),
}

impl GameFlowService {
    /// Turn phase task: walk the shuffled order, collect one clue per living
    /// player, then open the vote.
    pub(crate) async fn run_turn_phase(self, session: Arc<Session>) -> Result<(), EngineError> {
        let id = session.id().clone();
        let order = {
            let inner = session.lock().await;
            if inner.game.phase != Phase::Turns {
                return Ok(());
            }
            inner.game.turn_order.clone()
        };

        for pid in order {
            tokio::time::sleep(self.config.turn_lead_in).await;

            let turn = {
                let mut inner = session.lock().await;
                if inner.game.phase != Phase::Turns {
                    return Ok(());
                }
                match inner.game.player(pid).map(|p| (p.alive, p.is_bot())) {
                    Some((true, is_bot)) => {
                        inner.game.turn_holder = Some(pid);
                        if is_bot {
                            Turn::Bot
                        } else {
                            let (tx, rx) = oneshot::channel();
                            inner.gates.turn = Some(tx);
                            Turn::Human(rx)
                        }
                    }
                    _ => Turn::Skip,
                }
            };

            match turn {
                Turn::Skip => continue,
                Turn::Bot => {
                    self.adapter_announce_turn(&id, pid, 0).await?;
                    tokio::time::sleep(self.config.bot_clue_delay).await;
                    let mut inner = session.lock().await;
                    if inner.game.phase != Phase::Turns {
                        return Ok(());
                    }
                    if let Some(p) = inner.game.player_mut(pid) {
                        p.clue = Some(BOT_CLUE.to_string());
                    }
                    inner.game.turn_holder = None;
                }
                Turn::Human(rx) => {
                    self.adapter_announce_turn(&id, pid, self.config.turn_timeout.as_secs())
                        .await?;
                    // Submission, leave and deadline all land here.
                    let _ = tokio::time::timeout(self.config.turn_timeout, rx).await;
                    let mut inner = session.lock().await;
                    if inner.game.phase != Phase::Turns {
                        return Ok(());
                    }
                    inner.gates.turn = None;
                    if let Some(p) = inner.game.player_mut(pid) {
                        if p.alive && p.clue.is_none() {
                            p.clue = Some(AFK_CLUE.to_string());
                            p.afk = true;
                            debug!(session_id = %id, player = %pid, "turn timed out");
                        }
                    }
                    inner.game.turn_holder = None;
                }
            }

            let echo = {
                let inner = session.lock().await;
                inner.game.player(pid).and_then(|p| {
                    p.clue
                        .as_ref()
                        .map(|clue| format!("{}: {clue}", p.display))
                })
            };
            if let Some(text) = echo {
                self.notify(&id, &text).await?;
            }
        }

        self.start_vote_phase(&session).await
    }

    /// The active player submits their clue for the round.
    pub async fn submit_clue(
        &self,
        id: &SessionId,
        player: PlayerId,
        text: &str,
    ) -> Result<(), EngineError> {
        let Some(session) = self.registry.find_by_id(id) else {
            debug!(session_id = %id, %player, "clue for a gone session");
            return Ok(());
        };
        let mut inner = session.lock().await;
        match inner.game.phase {
            Phase::Turns => {}
            // The clue round already moved on; a late submission is not an
            // offence.
            Phase::Vote | Phase::End => {
                debug!(session_id = %id, %player, "clue after the turn phase closed");
                return Ok(());
            }
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::WrongPhase,
                    "clues are not being taken right now",
                )
                .into());
            }
        }
        let Some(p) = inner.game.player(player) else {
            return Err(DomainError::validation(
                ValidationKind::NotAMember,
                "you are not in this game",
            )
            .into());
        };
        // Checked before turn ownership so a double submission reads as such
        // even after the turn gate already advanced the holder.
        if p.clue.is_some() {
            return Err(DomainError::validation(
                ValidationKind::AlreadySubmitted,
                "you already gave a clue this round",
            )
            .into());
        }
        if inner.game.turn_holder != Some(player) {
            return Err(
                DomainError::validation(ValidationKind::NotYourTurn, "it is not your turn").into(),
            );
        }
        let clue = normalize_clue(text)?;
        if let Some(p) = inner.game.player_mut(player) {
            p.clue = Some(clue);
            p.afk = false;
        }
        inner.game.turn_holder = None;
        if let Some(gate) = inner.gates.turn.take() {
            let _ = gate.send(());
        }
        Ok(())
    }

    /// `announce_turn` with the standard adapter failure policy.
    async fn adapter_announce_turn(
        &self,
        id: &SessionId,
        player: PlayerId,
        seconds: u64,
    ) -> Result<(), EngineError> {
        match self.adapter.announce_turn(id, player, seconds).await {
            Ok(()) => Ok(()),
            Err(AdapterError::ChannelMissing) => {
                self.force_teardown(id).await;
                Err(AdapterError::ChannelMissing.into())
            }
            Err(err) => {
                warn!(session_id = %id, %err, "turn announcement failed");
                Ok(())
            }
        }
    }
}
