use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

/// Tagged player identity.
///
/// Humans carry the platform-assigned numeric id; bots carry a per-session
/// sequence number in their own namespace. Bot-ness is never inferred from a
/// numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PlayerId {
    Human(u64),
    Bot(u32),
}

impl PlayerId {
    pub fn is_bot(&self) -> bool {
        matches!(self, PlayerId::Bot(_))
    }

    pub fn is_human(&self) -> bool {
        matches!(self, PlayerId::Human(_))
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PlayerId::Human(id) => write!(f, "human:{id}"),
            PlayerId::Bot(seq) => write!(f, "bot:{seq}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Impostor,
    Social,
}

/// A session member and their round-scoped fields.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub display: String,
    /// Ready to start, toggled in the lobby. Bots are always ready.
    pub ready_in_lobby: bool,
    /// Saw their role and pressed ready. Bots auto-ack.
    pub role_acked: bool,
    pub role: Option<Role>,
    pub alive: bool,
    /// Clue for the current round, `None` until submitted.
    pub clue: Option<String>,
    /// Vote for the current round, `None` until cast (or after clearing).
    pub vote_target: Option<PlayerId>,
    /// Set when a turn of theirs timed out; informational, not an elimination.
    pub afk: bool,
}

impl Player {
    pub fn human(id: u64, display: impl Into<String>) -> Self {
        Self {
            id: PlayerId::Human(id),
            display: display.into(),
            ready_in_lobby: false,
            role_acked: false,
            role: None,
            alive: true,
            clue: None,
            vote_target: None,
            afk: false,
        }
    }

    pub fn bot(seq: u32) -> Self {
        Self {
            id: PlayerId::Bot(seq),
            display: format!("AAT-Bot #{seq}"),
            ready_in_lobby: true,
            role_acked: true,
            role: None,
            alive: true,
            clue: None,
            vote_target: None,
            afk: false,
        }
    }

    pub fn is_bot(&self) -> bool {
        self.id.is_bot()
    }

    /// Reset everything game-scoped when a fresh game starts.
    pub fn reset_for_game(&mut self, role: Role) {
        self.role = Some(role);
        self.alive = true;
        self.clue = None;
        self.vote_target = None;
        self.afk = false;
        // Bots never have to confirm anything.
        self.role_acked = self.is_bot();
    }
}
