//! Between-rounds pivot: evaluate win conditions, then open the next Turns
//! phase or end the game.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::info;

use crate::domain::snapshot::SessionPanel;
use crate::domain::state::Phase;
use crate::domain::turn_order::compute_turn_order;
use crate::domain::win::evaluate_round_start;
use crate::error::EngineError;
use crate::session::{PhaseTask, Session};

use super::GameFlowService;

impl GameFlowService {
    /// Opens the round `state.round` already points at, unless a win
    /// condition ends the game first.
    // Boxed (not `async fn`) to break the recursive opaque-future cycle
    // through the phase tasks, which otherwise defeats `Send` inference.
    pub(crate) fn start_round<'a>(
        &'a self,
        session: &'a Arc<Session>,
    ) -> Pin<Box<dyn Future<Output = Result<(), EngineError>> + Send + 'a>> {
        Box::pin(async move {
        let id = session.id().clone();

        let (round, panel) = {
            let mut inner = session.lock().await;
            if inner.game.phase == Phase::End {
                return Ok(());
            }
            if let Some(end) = evaluate_round_start(&inner.game, self.config.max_rounds) {
                drop(inner);
                self.trigger_end_game(session, end).await;
                return Ok(());
            }
            inner.game.phase = Phase::Turns;
            inner.game.reset_turn_state();
            let mut rng = rand::rng();
            inner.game.turn_order = compute_turn_order(&inner.game, &mut rng);
            (
                inner.game.round,
                SessionPanel::from_state(&inner.game, self.config.max_players),
            )
        };
        info!(session_id = %id, round, "round opened");
        self.refresh_panel(&id, &panel).await?;
        self.notify(&id, &format!("Round {round} begins.")).await?;

        let service = self.clone();
        let task_session = Arc::clone(session);
        self.start_phase_task(
            session,
            PhaseTask::Turn,
            Box::pin(async move { service.run_turn_phase(task_session).await }),
        )
        .await;
        Ok(())
        })
    }
}
