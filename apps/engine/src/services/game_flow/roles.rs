//! Game start: role dealing, acknowledgement collection and the pre-game
//! countdown.

use std::sync::Arc;

use rand::Rng;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::domain::player::{PlayerId, Role};
use crate::domain::secret::draw_secret;
use crate::domain::snapshot::SessionPanel;
use crate::domain::state::Phase;
use crate::error::EngineError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::session::{PhaseTask, Session, SessionId};

use super::GameFlowService;

impl GameFlowService {
    /// Host starts the game. Requires a full lobby with every human ready.
    ///
    /// Deals one impostor, draws the secret, and opens the role review
    /// window: play begins once every human has acknowledged their role, or
    /// when the acknowledgement timeout lapses, whichever comes first.
    pub async fn force_start(&self, id: &SessionId, caller: PlayerId) -> Result<(), EngineError> {
        let session = self.session(id)?;

        let (panel, rx) = {
            let mut inner = session.lock().await;
            if inner.game.phase != Phase::Idle {
                return Err(DomainError::validation(
                    ValidationKind::WrongPhase,
                    "a game is already in progress",
                )
                .into());
            }
            if inner.game.host != caller {
                return Err(DomainError::validation(
                    ValidationKind::NotHost,
                    "only the host can start the game",
                )
                .into());
            }
            if inner.game.member_count() != self.config.max_players {
                return Err(DomainError::validation(
                    ValidationKind::WrongPlayerCount,
                    format!("the game needs exactly {} players", self.config.max_players),
                )
                .into());
            }
            if inner.game.humans().next().is_none() {
                return Err(DomainError::validation(
                    ValidationKind::NoHumans,
                    "at least one human player is required",
                )
                .into());
            }
            if !inner.game.all_humans_ready() {
                return Err(DomainError::validation(
                    ValidationKind::NotReady,
                    "not everyone is ready yet",
                )
                .into());
            }

            let mut rng = rand::rng();
            // Bots are never the impostor; the pick is uniform over humans.
            let impostor = {
                let humans: Vec<PlayerId> = inner.game.humans().map(|p| p.id).collect();
                humans[rng.random_range(0..humans.len())]
            };
            let secret = draw_secret(&mut rng, &self.config.char_base_url);
            info!(session_id = %id, %impostor, secret = %secret.name, "game starting");

            inner.game.impostor = Some(impostor);
            inner.game.secret = Some(secret);
            inner.game.phase = Phase::Roles;
            inner.game.round = 0;
            let ids: Vec<PlayerId> = inner.game.players().iter().map(|p| p.id).collect();
            for pid in ids {
                let role = if pid == impostor {
                    Role::Impostor
                } else {
                    Role::Social
                };
                if let Some(p) = inner.game.player_mut(pid) {
                    p.reset_for_game(role);
                }
            }

            let (tx, rx) = oneshot::channel();
            inner.gates.roles = Some(tx);
            (
                SessionPanel::from_state(&inner.game, self.config.max_players),
                rx,
            )
        };

        self.refresh_panel(id, &panel).await?;
        self.notify(id, "Roles are dealt. Check your role, then confirm you have read it.")
            .await?;

        let service = self.clone();
        let task_session = Arc::clone(&session);
        self.start_phase_task(
            &session,
            PhaseTask::Roles,
            Box::pin(async move { service.run_roles_phase(task_session, rx).await }),
        )
        .await;
        Ok(())
    }

    /// Roles phase task: wait for all acks (bounded), count down, open round 1.
    async fn run_roles_phase(
        self,
        session: Arc<Session>,
        rx: oneshot::Receiver<()>,
    ) -> Result<(), EngineError> {
        let id = session.id().clone();
        // Fired gate, dropped gate and deadline all proceed the same way.
        let _ = tokio::time::timeout(self.config.role_ack_timeout, rx).await;

        {
            let inner = session.lock().await;
            if inner.game.phase != Phase::Roles {
                return Ok(());
            }
        }
        let secs = self.config.role_review.as_secs();
        self.notify(&id, &format!("Everyone is set. Round 1 starts in {secs}s."))
            .await?;
        tokio::time::sleep(self.config.role_review).await;

        {
            let mut inner = session.lock().await;
            if inner.game.phase != Phase::Roles {
                return Ok(());
            }
            inner.game.round = 1;
        }
        self.start_round(&session).await
    }

    /// A player confirms they have read their role. When the last human
    /// confirms, the countdown starts immediately.
    pub async fn ack_role(&self, id: &SessionId, player: PlayerId) -> Result<(), EngineError> {
        let Some(session) = self.registry.find_by_id(id) else {
            debug!(session_id = %id, %player, "role ack for a gone session");
            return Ok(());
        };
        let mut inner = session.lock().await;
        match inner.game.phase {
            Phase::Roles => {}
            Phase::End => {
                debug!(session_id = %id, %player, "role ack after game end");
                return Ok(());
            }
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::WrongPhase,
                    "roles are not being reviewed right now",
                )
                .into());
            }
        }
        let Some(p) = inner.game.player_mut(player) else {
            return Err(DomainError::validation(
                ValidationKind::NotAMember,
                "you are not in this game",
            )
            .into());
        };
        p.role_acked = true;
        if inner.game.all_humans_acked() {
            if let Some(gate) = inner.gates.roles.take() {
                let _ = gate.send(());
            }
        }
        Ok(())
    }

    /// Privately (re-)delivers a player's role on demand. Socials also get
    /// the secret; the impostor does not.
    pub async fn reveal_role(&self, id: &SessionId, player: PlayerId) -> Result<(), EngineError> {
        let session = self.session(id)?;
        let (role, secret) = {
            let inner = session.lock().await;
            match inner.game.phase {
                Phase::Roles | Phase::Turns | Phase::Vote => {}
                _ => {
                    return Err(DomainError::validation(
                        ValidationKind::WrongPhase,
                        "there is no game in progress",
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
            let Some(role) = p.role else {
                return Err(DomainError::validation(
                    ValidationKind::WrongPhase,
                    "roles have not been dealt",
                )
                .into());
            };
            let secret = match role {
                Role::Social => inner.game.secret.clone(),
                Role::Impostor => None,
            };
            (role, secret)
        };
        self.adapter
            .reveal_role(id, player, role, secret.as_ref())
            .await
            .map_err(EngineError::from)
    }
}
