//! Lobby membership: create, join, leave, kick, bots, readiness, open flag.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::player::{Player, PlayerId};
use crate::domain::snapshot::SessionPanel;
use crate::domain::state::{GameState, Phase};
use crate::domain::win::{EndReason, GameEnd, Winner};
use crate::error::EngineError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::session::{Session, SessionId, SessionInner};

use super::GameFlowService;

/// What a mid-flow `leave` decided while the lock was held; acted on after
/// the lock is released.
enum LeaveOutcome {
    Panel(SessionPanel),
    Destroy,
    ImpostorLeft,
    Stale,
}

impl GameFlowService {
    /// Creates a session in a channel with the caller as host.
    pub async fn create_session(
        &self,
        id: SessionId,
        host_id: u64,
        host_display: &str,
        open: bool,
    ) -> Result<(), EngineError> {
        let host = Player::human(host_id, host_display);
        let host_player_id = host.id;
        let game = GameState::new(id.as_str().to_owned(), host, open);
        let session = Session::new(id.clone(), game);
        self.registry.create(Arc::clone(&session), host_player_id)?;
        info!(session_id = %id, host = %host_player_id, "session created");

        let panel = {
            let inner = session.lock().await;
            SessionPanel::from_state(&inner.game, self.config.max_players)
        };
        self.refresh_panel(&id, &panel).await
    }

    /// Joins an existing lobby. Rejected once a game is underway.
    pub async fn join(
        &self,
        id: &SessionId,
        player_id: u64,
        display: &str,
    ) -> Result<(), EngineError> {
        let session = self.session(id)?;
        let panel = {
            let mut inner = session.lock().await;
            if inner.game.phase != Phase::Idle {
                return Err(DomainError::validation(
                    ValidationKind::WrongPhase,
                    "the game has already started",
                )
                .into());
            }
            if !inner.game.open {
                return Err(DomainError::validation(
                    ValidationKind::LobbyClosed,
                    "the lobby is closed to new players",
                )
                .into());
            }
            if inner.game.member_count() >= self.config.max_players {
                return Err(
                    DomainError::validation(ValidationKind::LobbyFull, "the lobby is full").into(),
                );
            }
            let player = Player::human(player_id, display);
            // Claim the membership index before mutating the roster so a
            // player can never end up in two sessions.
            self.registry.join_index(player.id, id)?;
            info!(session_id = %id, player = %player.id, "player joined");
            inner.game.add_player(player);
            SessionPanel::from_state(&inner.game, self.config.max_players)
        };
        self.refresh_panel(id, &panel).await
    }

    /// Leaves whatever session the player is in.
    ///
    /// In the lobby this frees the slot; mid-game the player is marked dead
    /// and the game continues around them. The host role moves to the
    /// earliest-joined remaining human; a session with no humans left is
    /// destroyed. An impostor who walks out hands the socials the win.
    pub async fn leave(&self, player: PlayerId) -> Result<(), EngineError> {
        let Some(session) = self.registry.find_by_member(player) else {
            debug!(%player, "leave from a player not in any session");
            return Ok(());
        };
        let id = session.id().clone();

        let outcome = {
            let mut inner = session.lock().await;
            match inner.game.phase {
                Phase::Idle => self.leave_lobby(&mut inner.game, player),
                Phase::End => LeaveOutcome::Stale,
                Phase::Roles | Phase::Turns | Phase::Vote => {
                    self.leave_mid_game(&mut inner, player)
                }
            }
        };

        match outcome {
            LeaveOutcome::Panel(panel) => self.refresh_panel(&id, &panel).await,
            LeaveOutcome::Destroy => {
                info!(session_id = %id, "last human left, destroying session");
                self.force_teardown(&id).await;
                Ok(())
            }
            LeaveOutcome::ImpostorLeft => {
                self.trigger_end_game(
                    &session,
                    GameEnd {
                        winner: Winner::Socials,
                        reason: EndReason::ImpostorLeft,
                    },
                )
                .await;
                Ok(())
            }
            LeaveOutcome::Stale => Ok(()),
        }
    }

    fn leave_lobby(&self, game: &mut GameState, player: PlayerId) -> LeaveOutcome {
        if game.remove_player(player).is_none() {
            return LeaveOutcome::Stale;
        }
        self.registry.leave_index(player);
        info!(session = %game.name, %player, "player left the lobby");
        if game.host == player {
            match game.earliest_human(player) {
                Some(next) => game.host = next,
                None => return LeaveOutcome::Destroy,
            }
        }
        LeaveOutcome::Panel(SessionPanel::from_state(game, self.config.max_players))
    }

    fn leave_mid_game(
        &self,
        inner: &mut SessionInner,
        player: PlayerId,
    ) -> LeaveOutcome {
        let Some(p) = inner.game.player_mut(player) else {
            return LeaveOutcome::Stale;
        };
        p.alive = false;
        self.registry.leave_index(player);
        info!(session = %inner.game.name, %player, "player left mid-game, marked dead");

        if inner.game.host == player {
            if let Some(next) = inner.game.earliest_human(player) {
                inner.game.host = next;
            }
        }
        if inner.game.alive_humans().next().is_none() {
            return LeaveOutcome::Destroy;
        }
        if inner.game.impostor == Some(player) {
            return LeaveOutcome::ImpostorLeft;
        }

        // Wake whichever timer was waiting on this player.
        if inner.game.turn_holder == Some(player) {
            if let Some(gate) = inner.gates.turn.take() {
                let _ = gate.send(());
            }
        }
        if inner.game.phase == Phase::Vote && inner.game.all_alive_humans_voted() {
            if let Some(gate) = inner.gates.vote.take() {
                let _ = gate.send(());
            }
        }
        if inner.game.phase == Phase::Roles && inner.game.all_humans_acked() {
            if let Some(gate) = inner.gates.roles.take() {
                let _ = gate.send(());
            }
        }

        LeaveOutcome::Panel(SessionPanel::from_state(
            &inner.game,
            self.config.max_players,
        ))
    }

    /// Host removes another player from the lobby.
    pub async fn kick(
        &self,
        id: &SessionId,
        caller: PlayerId,
        target: PlayerId,
    ) -> Result<(), EngineError> {
        let session = self.session(id)?;
        let panel = {
            let mut inner = session.lock().await;
            if inner.game.phase != Phase::Idle {
                return Err(DomainError::validation(
                    ValidationKind::WrongPhase,
                    "players can only be kicked from the lobby",
                )
                .into());
            }
            if inner.game.host != caller {
                return Err(DomainError::validation(
                    ValidationKind::NotHost,
                    "only the host can kick",
                )
                .into());
            }
            if target == caller {
                return Err(DomainError::validation(
                    ValidationKind::Other("self-kick".into()),
                    "the host cannot kick themselves",
                )
                .into());
            }
            if inner.game.remove_player(target).is_none() {
                return Err(DomainError::not_found(
                    NotFoundKind::Player,
                    "that player is not in this session",
                )
                .into());
            }
            self.registry.leave_index(target);
            info!(session_id = %id, %caller, %target, "player kicked");
            SessionPanel::from_state(&inner.game, self.config.max_players)
        };
        self.refresh_panel(id, &panel).await
    }

    /// Host adds a bot to fill a lobby slot.
    pub async fn add_bot(&self, id: &SessionId, caller: PlayerId) -> Result<(), EngineError> {
        let session = self.session(id)?;
        let panel = {
            let mut inner = session.lock().await;
            self.require_idle_host(&inner.game, caller)?;
            if inner.game.member_count() >= self.config.max_players {
                return Err(
                    DomainError::validation(ValidationKind::LobbyFull, "the lobby is full").into(),
                );
            }
            let bot = inner.game.add_bot();
            info!(session_id = %id, %bot, "bot added");
            SessionPanel::from_state(&inner.game, self.config.max_players)
        };
        self.refresh_panel(id, &panel).await
    }

    /// Host removes the most recently added bot.
    pub async fn remove_bot(&self, id: &SessionId, caller: PlayerId) -> Result<(), EngineError> {
        let session = self.session(id)?;
        let panel = {
            let mut inner = session.lock().await;
            self.require_idle_host(&inner.game, caller)?;
            let Some(bot) = inner.game.last_bot() else {
                return Err(DomainError::not_found(
                    NotFoundKind::Bot,
                    "there are no bots in this session",
                )
                .into());
            };
            inner.game.remove_player(bot);
            info!(session_id = %id, %bot, "bot removed");
            SessionPanel::from_state(&inner.game, self.config.max_players)
        };
        self.refresh_panel(id, &panel).await
    }

    /// Toggles a player's lobby readiness.
    pub async fn set_ready(
        &self,
        id: &SessionId,
        player: PlayerId,
        ready: bool,
    ) -> Result<(), EngineError> {
        let session = self.session(id)?;
        let panel = {
            let mut inner = session.lock().await;
            if inner.game.phase != Phase::Idle {
                return Err(DomainError::validation(
                    ValidationKind::WrongPhase,
                    "readiness only applies in the lobby",
                )
                .into());
            }
            let Some(p) = inner.game.player_mut(player) else {
                return Err(DomainError::validation(
                    ValidationKind::NotAMember,
                    "you are not in this session",
                )
                .into());
            };
            p.ready_in_lobby = ready;
            SessionPanel::from_state(&inner.game, self.config.max_players)
        };
        self.refresh_panel(id, &panel).await
    }

    /// Host opens or closes the lobby to new joins.
    pub async fn set_open(
        &self,
        id: &SessionId,
        caller: PlayerId,
        open: bool,
    ) -> Result<(), EngineError> {
        let session = self.session(id)?;
        let panel = {
            let mut inner = session.lock().await;
            self.require_idle_host(&inner.game, caller)?;
            inner.game.open = open;
            SessionPanel::from_state(&inner.game, self.config.max_players)
        };
        self.refresh_panel(id, &panel).await
    }

    fn require_idle_host(&self, game: &GameState, caller: PlayerId) -> Result<(), DomainError> {
        if game.phase != Phase::Idle {
            return Err(DomainError::validation(
                ValidationKind::WrongPhase,
                "only allowed in the lobby",
            ));
        }
        if game.host != caller {
            return Err(DomainError::validation(
                ValidationKind::NotHost,
                "only the host can do that",
            ));
        }
        Ok(())
    }
}
