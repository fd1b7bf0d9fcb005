//! Game end: the reveal, the grace window and final teardown.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::AdapterError;
use crate::domain::player::PlayerId;
use crate::domain::state::Phase;
use crate::domain::win::{EndReveal, GameEnd};
use crate::error::EngineError;
use crate::session::{PhaseTask, Session};

use super::GameFlowService;

impl GameFlowService {
    /// Ends the game with the given result. Idempotent: only the first call
    /// per session has any effect. Callers must not hold the session lock.
    ///
    /// The phase flips to End and the gates drop under the lock, so every
    /// in-flight timer sees a stale phase and stands down. The reveal and
    /// teardown run on their own task, because this may be called from
    /// inside the very task the teardown aborts.
    pub(crate) async fn trigger_end_game(&self, session: &Arc<Session>, end: GameEnd) {
        let (reveal, members) = {
            let mut inner = session.lock().await;
            if inner.game.phase == Phase::End {
                return;
            }
            inner.game.phase = Phase::End;
            inner.gates.take_all();
            let members: Vec<PlayerId> =
                inner.game.players().iter().map(|p| p.id).collect();
            (EndReveal::from_state(&inner.game), members)
        };
        info!(session_id = %session.id(), winner = ?end.winner, reason = %end.reason, "game over");
        // Freed immediately so players can join elsewhere during the grace
        // window while the channel keeps the reveal up.
        self.registry.release_members(&members);

        let service = self.clone();
        let task_session = Arc::clone(session);
        self.start_phase_task(
            session,
            PhaseTask::End,
            Box::pin(async move { service.run_end_task(task_session, end, reveal).await }),
        )
        .await;
    }

    async fn run_end_task(
        self,
        session: Arc<Session>,
        end: GameEnd,
        reveal: EndReveal,
    ) -> Result<(), EngineError> {
        session.abort_gameplay_tasks();
        let id = session.id().clone();
        match self.adapter.announce_end(&id, &end, &reveal).await {
            Ok(()) => {}
            Err(AdapterError::ChannelMissing) => {
                self.force_teardown(&id).await;
                return Ok(());
            }
            Err(err) => warn!(session_id = %id, %err, "end announcement failed"),
        }
        tokio::time::sleep(self.config.grace_window).await;
        // Teardown is the task's last act; the abort it performs on this
        // same task only lands at an await point that never comes.
        self.force_teardown(&id).await;
        Ok(())
    }
}
