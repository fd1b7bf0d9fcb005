//! Game flow orchestration, split by concern:
//! - `membership`: lobby membership and readiness
//! - `roles`: game start, role dealing and acknowledgement
//! - `turns`: the clue round and turn timers
//! - `votes`: the voting window and elimination
//! - `round_lifecycle`: round start and win evaluation
//! - `endgame`: game end, reveal and grace-window teardown
//!
//! All driving happens through [`GameFlowService`]; phase tasks are spawned
//! here and re-enter through the same service.

mod endgame;
mod membership;
mod roles;
mod round_lifecycle;
mod turns;
mod votes;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::adapter::{AdapterError, GameAdapter};
use crate::config::GameConfig;
use crate::domain::snapshot::SessionPanel;
use crate::error::EngineError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::registry::SessionRegistry;
use crate::session::{PhaseTask, Session, SessionId};

/// Boxed body of a background phase task.
pub(crate) type PhaseFuture = Pin<Box<dyn Future<Output = Result<(), EngineError>> + Send>>;

/// Entry point for every inbound action and owner of the phase tasks.
///
/// Cheaply cloneable; clones share the registry, adapter and config.
#[derive(Clone)]
pub struct GameFlowService {
    registry: Arc<SessionRegistry>,
    adapter: Arc<dyn GameAdapter>,
    config: Arc<GameConfig>,
}

impl GameFlowService {
    pub fn new(adapter: Arc<dyn GameAdapter>, config: GameConfig) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new()),
            adapter,
            config: Arc::new(config),
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Looks up a session; absence is a domain error for inbound actions
    /// that require one.
    pub(crate) fn session(&self, id: &SessionId) -> Result<Arc<Session>, DomainError> {
        self.registry.find_by_id(id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Session, "no session in this channel")
        })
    }

    /// Spawns a phase task, replacing any previous task of the same kind.
    /// The task races against the session's cancellation token, and an error
    /// from the task body tears the session down.
    ///
    /// The body is boxed: phase tasks call back into phase starters, and
    /// without the indirection their future types would be mutually
    /// recursive.
    pub(crate) async fn start_phase_task(
        &self,
        session: &Arc<Session>,
        kind: PhaseTask,
        fut: PhaseFuture,
    ) {
        session.cancel_task(kind).await;
        let service = self.clone();
        let session = Arc::clone(session);
        let cancel = session.cancel_token();
        let handle = tokio::spawn({
            let session = Arc::clone(&session);
            async move {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    res = fut => {
                        if let Err(err) = res {
                            error!(session_id = %session.id(), %err, "phase task failed, tearing session down");
                            service.force_teardown(session.id()).await;
                        }
                    }
                }
            }
        });
        session.install_task(kind, handle);
    }

    /// Removes the session from the registry and cancels everything it owns.
    /// Idempotent; safe to call from inside a phase task.
    pub(crate) async fn force_teardown(&self, id: &SessionId) {
        if let Some(session) = self.registry.remove(id) {
            debug!(session_id = %id, "session torn down");
            session.shutdown();
        }
    }

    /// Sends a public announcement, handling adapter failure in place. A
    /// missing channel is fatal for the session; anything else is logged and
    /// survived.
    pub(crate) async fn notify(&self, id: &SessionId, text: &str) -> Result<(), EngineError> {
        match self.adapter.announce(id, text).await {
            Ok(()) => Ok(()),
            Err(AdapterError::ChannelMissing) => {
                self.force_teardown(id).await;
                Err(EngineError::Adapter(AdapterError::ChannelMissing))
            }
            Err(err) => {
                warn!(session_id = %id, %err, "announcement failed");
                Ok(())
            }
        }
    }

    /// Redraws the session dashboard with the same failure policy as
    /// [`notify`](Self::notify).
    pub(crate) async fn refresh_panel(
        &self,
        id: &SessionId,
        panel: &SessionPanel,
    ) -> Result<(), EngineError> {
        match self.adapter.render_panel(id, panel).await {
            Ok(()) => Ok(()),
            Err(AdapterError::ChannelMissing) => {
                self.force_teardown(id).await;
                Err(EngineError::Adapter(AdapterError::ChannelMissing))
            }
            Err(err) => {
                warn!(session_id = %id, %err, "panel render failed");
                Ok(())
            }
        }
    }
}
