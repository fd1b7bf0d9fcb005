//! Process-wide session registry.
//!
//! Two maps are kept consistent under one sync lock: session id to session,
//! and player id to the session they are in (a player can be in at most one
//! session at a time). The lock is never held across an await.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::player::PlayerId;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::session::{Session, SessionId};

#[derive(Default)]
struct RegistryInner {
    sessions: HashMap<SessionId, Arc<Session>>,
    members: HashMap<PlayerId, SessionId>,
}

#[derive(Default)]
pub struct SessionRegistry {
    inner: Mutex<RegistryInner>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new session and indexes its host atomically. Fails if the
    /// channel already hosts a session or the host is in one elsewhere.
    pub fn create(&self, session: Arc<Session>, host: PlayerId) -> Result<(), DomainError> {
        let mut inner = self.inner.lock();
        if inner.sessions.contains_key(session.id()) {
            return Err(DomainError::conflict(
                ConflictKind::SessionExists,
                "a session already exists in this channel",
            ));
        }
        if inner.members.contains_key(&host) {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyInSession,
                "player is already in a session",
            ));
        }
        inner.members.insert(host, session.id().clone());
        inner.sessions.insert(session.id().clone(), session);
        Ok(())
    }

    /// Claims membership for a joining player. The caller adds them to the
    /// game state only after this succeeds.
    pub fn join_index(&self, player: PlayerId, session: &SessionId) -> Result<(), DomainError> {
        let mut inner = self.inner.lock();
        if inner.members.contains_key(&player) {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyInSession,
                "player is already in a session",
            ));
        }
        inner.members.insert(player, session.clone());
        Ok(())
    }

    /// Drops one player's membership claim, if present.
    pub fn leave_index(&self, player: PlayerId) {
        self.inner.lock().members.remove(&player);
    }

    /// Drops the membership claims of every listed player. Used at game end
    /// so players can join a new session during the grace window.
    pub fn release_members(&self, players: &[PlayerId]) {
        let mut inner = self.inner.lock();
        for player in players {
            inner.members.remove(player);
        }
    }

    /// Removes a session and any membership entries still pointing at it.
    /// Idempotent.
    pub fn remove(&self, id: &SessionId) -> Option<Arc<Session>> {
        let mut inner = self.inner.lock();
        let session = inner.sessions.remove(id)?;
        inner.members.retain(|_, s| s != id);
        Some(session)
    }

    pub fn find_by_id(&self, id: &SessionId) -> Option<Arc<Session>> {
        self.inner.lock().sessions.get(id).cloned()
    }

    /// The session a player currently belongs to, if any.
    pub fn find_by_member(&self, player: PlayerId) -> Option<Arc<Session>> {
        let inner = self.inner.lock();
        let id = inner.members.get(&player)?;
        inner.sessions.get(id).cloned()
    }

    pub fn session_count(&self) -> usize {
        self.inner.lock().sessions.len()
    }
}
