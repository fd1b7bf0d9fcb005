use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

use crate::domain::player::{Player, PlayerId};
use crate::domain::secret::Secret;

/// Overall session progression phases.
///
/// Transitions only ever follow Idle→Roles→Turns→(Vote→Turns)*→End.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum Phase {
    /// In the lobby, before a game starts.
    Idle,
    /// Roles dealt, waiting for acknowledgments.
    Roles,
    /// Sequential clue collection.
    Turns,
    /// Simultaneous voting.
    Vote,
    /// Game over; grace window running.
    End,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            Phase::Idle => "idle",
            Phase::Roles => "roles",
            Phase::Turns => "turns",
            Phase::Vote => "vote",
            Phase::End => "end",
        };
        f.write_str(s)
    }
}

/// Complete per-session game state: lobby membership plus the state of the
/// game in progress, if any. Owned by the `Session` behind its lock.
#[derive(Debug)]
pub struct GameState {
    pub name: String,
    pub host: PlayerId,
    pub open: bool,
    pub phase: Phase,
    /// 1-based once the game starts; 0 while in Roles.
    pub round: u32,
    pub impostor: Option<PlayerId>,
    pub secret: Option<Secret>,
    /// The random per-round permutation of alive members, empty outside Turns.
    pub turn_order: Vec<PlayerId>,
    /// Whose clue the engine is currently waiting for.
    pub turn_holder: Option<PlayerId>,
    players: Vec<Player>,
    next_bot_seq: u32,
}

impl GameState {
    pub fn new(name: impl Into<String>, host: Player, open: bool) -> Self {
        let host_id = host.id;
        Self {
            name: name.into(),
            host: host_id,
            open,
            phase: Phase::Idle,
            round: 0,
            impostor: None,
            secret: None,
            turn_order: Vec::new(),
            turn_holder: None,
            players: vec![host],
            next_bot_seq: 0,
        }
    }

    // --- membership ---

    /// Players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn member_count(&self) -> usize {
        self.players.len()
    }

    pub fn add_player(&mut self, player: Player) {
        debug_assert!(self.player(player.id).is_none());
        self.players.push(player);
    }

    /// Add a bot with the next sequence number in this session's namespace.
    pub fn add_bot(&mut self) -> PlayerId {
        self.next_bot_seq += 1;
        let bot = Player::bot(self.next_bot_seq);
        let id = bot.id;
        self.players.push(bot);
        id
    }

    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        Some(self.players.remove(idx))
    }

    /// The latest-joined bot, if any.
    pub fn last_bot(&self) -> Option<PlayerId> {
        self.players.iter().rev().find(|p| p.is_bot()).map(|p| p.id)
    }

    pub fn humans(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_bot())
    }

    pub fn alive(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.alive)
    }

    pub fn alive_humans(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.alive && !p.is_bot())
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// Earliest-joined human other than `excluding`, used for host transfer.
    pub fn earliest_human(&self, excluding: PlayerId) -> Option<PlayerId> {
        self.humans()
            .map(|p| p.id)
            .find(|id| *id != excluding)
    }

    // --- readiness ---

    /// All humans pressed ready in the lobby. False when no humans exist:
    /// a session must never start without one.
    pub fn all_humans_ready(&self) -> bool {
        let mut humans = self.humans().peekable();
        humans.peek().is_some() && self.humans().all(|p| p.ready_in_lobby)
    }

    /// All humans acknowledged their role. Vacuously true without humans;
    /// the no-humans case is rejected before roles are ever dealt.
    pub fn all_humans_acked(&self) -> bool {
        self.humans().all(|p| p.role_acked)
    }

    /// Every alive human has a vote on record.
    pub fn all_alive_humans_voted(&self) -> bool {
        self.alive_humans().all(|p| p.vote_target.is_some())
    }

    // --- round-scoped resets ---

    /// Clear clues and the turn bookkeeping at the start of a Turns phase.
    pub fn reset_turn_state(&mut self) {
        for p in &mut self.players {
            p.clue = None;
        }
        self.turn_order.clear();
        self.turn_holder = None;
    }

    /// Clear votes at the start of a Vote phase.
    pub fn reset_vote_state(&mut self) {
        for p in &mut self.players {
            p.vote_target = None;
        }
    }

    pub fn impostor_alive(&self) -> bool {
        self.impostor
            .and_then(|id| self.player(id))
            .is_some_and(|p| p.alive)
    }
}
