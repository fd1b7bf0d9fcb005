//! Session handle: per-session state lock, phase gates, and phase task slots.
//!
//! Lock ordering: the async state lock is always taken first; the sync task
//! lock is only ever taken briefly and never while awaiting.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{oneshot, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::domain::state::GameState;

/// Channel-scoped session identifier (one session per channel).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(Arc<str>);

impl SessionId {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One-shot wake channels held by the waiting phase task. Firing a gate (or
/// dropping it) wakes the task immediately; the task otherwise runs to its
/// deadline.
#[derive(Debug, Default)]
pub struct PhaseGates {
    pub roles: Option<oneshot::Sender<()>>,
    pub turn: Option<oneshot::Sender<()>>,
    pub vote: Option<oneshot::Sender<()>>,
}

impl PhaseGates {
    /// Drops all pending gates, waking any waiting task.
    pub fn take_all(&mut self) {
        self.roles.take();
        self.turn.take();
        self.vote.take();
    }
}

/// Everything guarded by the session's async lock.
#[derive(Debug)]
pub struct SessionInner {
    pub game: GameState,
    pub gates: PhaseGates,
}

/// Which phase task a handle belongs to. At most one task per kind is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTask {
    Roles,
    Turn,
    Vote,
    End,
}

#[derive(Debug, Default)]
struct PhaseTasks {
    roles: Option<JoinHandle<()>>,
    turn: Option<JoinHandle<()>>,
    vote: Option<JoinHandle<()>>,
    end: Option<JoinHandle<()>>,
}

impl PhaseTasks {
    fn slot(&mut self, kind: PhaseTask) -> &mut Option<JoinHandle<()>> {
        match kind {
            PhaseTask::Roles => &mut self.roles,
            PhaseTask::Turn => &mut self.turn,
            PhaseTask::Vote => &mut self.vote,
            PhaseTask::End => &mut self.end,
        }
    }
}

/// A live game session. Shared as `Arc<Session>` between the registry and
/// the phase tasks it spawns.
pub struct Session {
    id: SessionId,
    inner: Mutex<SessionInner>,
    tasks: parking_lot::Mutex<PhaseTasks>,
    cancel: CancellationToken,
}

impl Session {
    pub fn new(id: SessionId, game: GameState) -> Arc<Self> {
        Arc::new(Self {
            id,
            inner: Mutex::new(SessionInner {
                game,
                gates: PhaseGates::default(),
            }),
            tasks: parking_lot::Mutex::new(PhaseTasks::default()),
            cancel: CancellationToken::new(),
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub async fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().await
    }

    /// Cancelled exactly once, at teardown. Phase tasks select on this so a
    /// destroyed session never leaves a timer running.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Aborts the previous task of this kind, if any, and waits for it to
    /// finish unwinding so two tasks of one kind never overlap.
    pub async fn cancel_task(&self, kind: PhaseTask) {
        let old = self.tasks.lock().slot(kind).take();
        if let Some(handle) = old {
            handle.abort();
            let _ = handle.await;
        }
    }

    /// Records the handle of a freshly spawned phase task.
    pub fn install_task(&self, kind: PhaseTask, handle: JoinHandle<()>) {
        let replaced = self.tasks.lock().slot(kind).replace(handle);
        if let Some(old) = replaced {
            old.abort();
        }
    }

    /// Aborts roles, turn and vote tasks without waiting. Called from the
    /// end task, which must not await its own siblings.
    pub fn abort_gameplay_tasks(&self) {
        let mut tasks = self.tasks.lock();
        for kind in [PhaseTask::Roles, PhaseTask::Turn, PhaseTask::Vote] {
            if let Some(handle) = tasks.slot(kind).take() {
                handle.abort();
            }
        }
    }

    /// Final teardown: cancels the token and aborts every task, including a
    /// live end task. Safe to call from within the end task itself since
    /// abort takes effect at the next await point and teardown is the task's
    /// last statement.
    pub fn shutdown(&self) {
        self.cancel.cancel();
        let mut tasks = self.tasks.lock();
        for kind in [
            PhaseTask::Roles,
            PhaseTask::Turn,
            PhaseTask::Vote,
            PhaseTask::End,
        ] {
            if let Some(handle) = tasks.slot(kind).take() {
                handle.abort();
            }
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("id", &self.id).finish()
    }
}
