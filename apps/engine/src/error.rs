use thiserror::Error;

use crate::adapter::AdapterError;
use crate::errors::domain::DomainError;

/// Top-level engine error.
///
/// Background phase tasks catch this at the task boundary and convert it into
/// forced session teardown; it never escapes to the host process. Timeouts are
/// not errors anywhere in the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    #[error("internal error: {detail}")]
    Internal { detail: String },
}

impl EngineError {
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}
