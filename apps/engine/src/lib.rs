#![deny(clippy::wildcard_imports)]

//! Session orchestration engine for an impostor-style social deduction game.
//!
//! The engine owns lobbies, roles, rounds, votes and timers; the hosting
//! platform plugs in through [`adapter::GameAdapter`] and drives play through
//! [`services::GameFlowService`].

pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod registry;
pub mod services;
pub mod session;
pub mod test_support;

pub use adapter::{AdapterError, GameAdapter, NullAdapter};
pub use config::GameConfig;
pub use error::EngineError;
pub use services::GameFlowService;
pub use session::SessionId;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
