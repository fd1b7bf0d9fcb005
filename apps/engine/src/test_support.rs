//! In-process adapter for driving the engine in tests.
//!
//! Records every outbound call and mirrors it onto a channel so tests can
//! await the engine's next move instead of sleeping.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::adapter::{AdapterError, GameAdapter};
use crate::domain::player::{PlayerId, Role};
use crate::domain::secret::Secret;
use crate::domain::snapshot::{SessionPanel, VoteCandidate};
use crate::domain::win::{EndReveal, GameEnd};
use crate::session::SessionId;

/// One recorded outbound call.
#[derive(Debug, Clone)]
pub enum AdapterEvent {
    Panel(SessionPanel),
    Announce(String),
    RoleRevealed {
        player: PlayerId,
        role: Role,
        secret: Option<Secret>,
    },
    TurnOpened {
        player: PlayerId,
        seconds: u64,
    },
    VoteOpened {
        candidates: Vec<VoteCandidate>,
        seconds: u64,
    },
    Eliminated {
        player: PlayerId,
        role: Role,
    },
    Ended {
        end: GameEnd,
        reveal: EndReveal,
    },
}

pub struct RecordingAdapter {
    log: parking_lot::Mutex<Vec<AdapterEvent>>,
    tx: UnboundedSender<AdapterEvent>,
    missing_channels: parking_lot::Mutex<HashSet<SessionId>>,
}

impl RecordingAdapter {
    pub fn new() -> (Arc<Self>, UnboundedReceiver<AdapterEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let adapter = Arc::new(Self {
            log: parking_lot::Mutex::new(Vec::new()),
            tx,
            missing_channels: parking_lot::Mutex::new(HashSet::new()),
        });
        (adapter, rx)
    }

    /// Every call recorded so far, in order.
    pub fn events(&self) -> Vec<AdapterEvent> {
        self.log.lock().clone()
    }

    /// Makes every subsequent call for `session` fail as if its channel
    /// disappeared. Other sessions keep working.
    pub fn set_channel_missing(&self, session: &SessionId, missing: bool) {
        let mut gone = self.missing_channels.lock();
        if missing {
            gone.insert(session.clone());
        } else {
            gone.remove(session);
        }
    }

    fn record(&self, session: &SessionId, event: AdapterEvent) -> Result<(), AdapterError> {
        if self.missing_channels.lock().contains(session) {
            return Err(AdapterError::ChannelMissing);
        }
        self.log.lock().push(event.clone());
        // A dropped receiver just means the test stopped listening.
        let _ = self.tx.send(event);
        Ok(())
    }
}

#[async_trait]
impl GameAdapter for RecordingAdapter {
    async fn render_panel(
        &self,
        session: &SessionId,
        panel: &SessionPanel,
    ) -> Result<(), AdapterError> {
        self.record(session, AdapterEvent::Panel(panel.clone()))
    }

    async fn announce(&self, session: &SessionId, text: &str) -> Result<(), AdapterError> {
        self.record(session, AdapterEvent::Announce(text.to_string()))
    }

    async fn reveal_role(
        &self,
        session: &SessionId,
        player: PlayerId,
        role: Role,
        secret: Option<&Secret>,
    ) -> Result<(), AdapterError> {
        self.record(session, AdapterEvent::RoleRevealed {
            player,
            role,
            secret: secret.cloned(),
        })
    }

    async fn announce_turn(
        &self,
        session: &SessionId,
        player: PlayerId,
        seconds: u64,
    ) -> Result<(), AdapterError> {
        self.record(session, AdapterEvent::TurnOpened { player, seconds })
    }

    async fn announce_vote_open(
        &self,
        session: &SessionId,
        candidates: &[VoteCandidate],
        seconds: u64,
    ) -> Result<(), AdapterError> {
        self.record(session, AdapterEvent::VoteOpened {
            candidates: candidates.to_vec(),
            seconds,
        })
    }

    async fn announce_elimination(
        &self,
        session: &SessionId,
        player: PlayerId,
        role: Role,
    ) -> Result<(), AdapterError> {
        self.record(session, AdapterEvent::Eliminated { player, role })
    }

    async fn announce_end(
        &self,
        session: &SessionId,
        end: &GameEnd,
        reveal: &EndReveal,
    ) -> Result<(), AdapterError> {
        self.record(session, AdapterEvent::Ended {
            end: *end,
            reveal: reveal.clone(),
        })
    }
}
