//! Shared harness for the flow tests: a recording adapter, millisecond
//! timeouts, and helpers for driving a lobby into a running game.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

use impostor_engine::config::GameConfig;
use impostor_engine::domain::player::{PlayerId, Role};
use impostor_engine::error::EngineError;
use impostor_engine::errors::domain::{DomainError, ValidationKind};
use impostor_engine::services::GameFlowService;
use impostor_engine::session::SessionId;
use impostor_engine::test_support::{AdapterEvent, RecordingAdapter};

#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

pub const HOST: PlayerId = PlayerId::Human(1);

pub fn fast_config() -> GameConfig {
    GameConfig {
        max_players: 5,
        max_rounds: 4,
        turn_timeout: Duration::from_millis(200),
        vote_timeout: Duration::from_millis(400),
        role_ack_timeout: Duration::from_millis(400),
        role_review: Duration::from_millis(20),
        grace_window: Duration::from_millis(50),
        bot_clue_delay: Duration::from_millis(5),
        turn_lead_in: Duration::from_millis(1),
        char_base_url: "https://chars.example/".to_string(),
    }
}

pub fn engine(
    config: GameConfig,
) -> (
    GameFlowService,
    Arc<RecordingAdapter>,
    UnboundedReceiver<AdapterEvent>,
) {
    let (adapter, rx) = RecordingAdapter::new();
    let service = GameFlowService::new(adapter.clone(), config);
    (service, adapter, rx)
}

/// Creates a full 5-slot lobby: humans 1..=4 (all ready) plus one bot.
pub async fn full_lobby(service: &GameFlowService, name: &str) -> SessionId {
    let id = SessionId::from(name);
    service
        .create_session(id.clone(), 1, "ada", true)
        .await
        .expect("create");
    service.join(&id, 2, "brim").await.expect("join 2");
    service.join(&id, 3, "cass").await.expect("join 3");
    service.join(&id, 4, "dova").await.expect("join 4");
    service.add_bot(&id, HOST).await.expect("add bot");
    for n in 1..=4 {
        service
            .set_ready(&id, PlayerId::Human(n), true)
            .await
            .expect("ready");
    }
    id
}

pub async fn next_event(rx: &mut UnboundedReceiver<AdapterEvent>) -> AdapterEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for an adapter event")
        .expect("adapter channel closed")
}

/// Discards events until one matches.
pub async fn wait_for(
    rx: &mut UnboundedReceiver<AdapterEvent>,
    pred: impl Fn(&AdapterEvent) -> bool,
) -> AdapterEvent {
    loop {
        let event = next_event(rx).await;
        if pred(&event) {
            return event;
        }
    }
}

/// Starts the game and acks every human, returning the impostor's id.
pub async fn start_and_ack(
    service: &GameFlowService,
    id: &SessionId,
    rx: &mut UnboundedReceiver<AdapterEvent>,
) -> PlayerId {
    service.force_start(id, HOST).await.expect("force_start");

    let mut impostor = None;
    for n in 1..=4 {
        let player = PlayerId::Human(n);
        service.reveal_role(id, player).await.expect("reveal_role");
        let event = wait_for(rx, |e| {
            matches!(e, AdapterEvent::RoleRevealed { player: p, .. } if *p == player)
        })
        .await;
        if let AdapterEvent::RoleRevealed { role, secret, .. } = event {
            if role == Role::Impostor {
                assert!(secret.is_none(), "the impostor must not see the secret");
                impostor = Some(player);
            } else {
                let secret = secret.expect("socials must see the secret");
                assert!(
                    secret.url.starts_with("https://chars.example/"),
                    "secret link must use the configured base, got {}",
                    secret.url
                );
            }
        }
        service.ack_role(id, player).await.expect("ack_role");
    }
    impostor.expect("exactly one human impostor")
}

/// Drives one Turns phase. `clue_for` returns the clue a human should play,
/// or `None` to let that turn run out. Returns the vote sheet.
pub async fn play_round(
    service: &GameFlowService,
    id: &SessionId,
    rx: &mut UnboundedReceiver<AdapterEvent>,
    clue_for: impl Fn(PlayerId) -> Option<String>,
) -> Vec<impostor_engine::domain::snapshot::VoteCandidate> {
    loop {
        match next_event(rx).await {
            AdapterEvent::TurnOpened { player, .. } if player.is_human() => {
                if let Some(clue) = clue_for(player) {
                    service
                        .submit_clue(id, player, &clue)
                        .await
                        .expect("submit_clue");
                }
            }
            AdapterEvent::VoteOpened { candidates, .. } => return candidates,
            _ => {}
        }
    }
}

/// The validation kind inside an engine error, if that is what it is.
pub fn validation_kind(err: &EngineError) -> Option<&ValidationKind> {
    match err {
        EngineError::Domain(DomainError::Validation(kind, _)) => Some(kind),
        _ => None,
    }
}
