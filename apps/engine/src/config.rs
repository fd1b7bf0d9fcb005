//! Engine configuration, read from `IMPOSTOR_*` environment variables with
//! sensible defaults for every knob.

use std::env;
use std::time::Duration;

/// All timing and sizing knobs for a game session.
///
/// Tests construct this directly with millisecond-scale timeouts; deployments
/// typically use [`GameConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Slots per session; a game only starts at exactly this many members.
    pub max_players: usize,
    /// Rounds the impostor has to survive to win.
    pub max_rounds: u32,
    /// How long a human has to submit a clue on their turn.
    pub turn_timeout: Duration,
    /// How long the vote stays open before force-closing.
    pub vote_timeout: Duration,
    /// Upper bound on waiting for all humans to acknowledge their role.
    pub role_ack_timeout: Duration,
    /// Fixed countdown between the last ack and round 1.
    pub role_review: Duration,
    /// Post-game window during which members may leave voluntarily.
    pub grace_window: Duration,
    /// Pause before a bot plays its placeholder clue.
    pub bot_clue_delay: Duration,
    /// Short beat before each turn is announced.
    pub turn_lead_in: Duration,
    /// Prefix for the secret character's reference URL.
    pub char_base_url: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_players: 5,
            max_rounds: 4,
            turn_timeout: Duration::from_secs(50),
            vote_timeout: Duration::from_secs(180),
            role_ack_timeout: Duration::from_secs(120),
            role_review: Duration::from_secs(20),
            grace_window: Duration::from_secs(60),
            bot_clue_delay: Duration::from_millis(800),
            turn_lead_in: Duration::from_millis(1500),
            char_base_url: String::new(),
        }
    }
}

impl GameConfig {
    /// Build a config from `IMPOSTOR_*` environment variables.
    ///
    /// Unset or unparseable variables fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_players: var_usize("IMPOSTOR_MAX_PLAYERS").unwrap_or(defaults.max_players),
            max_rounds: var_u32("IMPOSTOR_MAX_ROUNDS").unwrap_or(defaults.max_rounds),
            turn_timeout: var_secs("IMPOSTOR_TURN_SECONDS").unwrap_or(defaults.turn_timeout),
            vote_timeout: var_secs("IMPOSTOR_VOTE_SECONDS").unwrap_or(defaults.vote_timeout),
            role_ack_timeout: var_secs("IMPOSTOR_ROLE_ACK_SECONDS")
                .unwrap_or(defaults.role_ack_timeout),
            role_review: var_secs("IMPOSTOR_ROLE_REVIEW_SECONDS").unwrap_or(defaults.role_review),
            grace_window: var_secs("IMPOSTOR_GRACE_SECONDS").unwrap_or(defaults.grace_window),
            bot_clue_delay: defaults.bot_clue_delay,
            turn_lead_in: defaults.turn_lead_in,
            char_base_url: env::var("IMPOSTOR_CHAR_BASE").unwrap_or(defaults.char_base_url),
        }
    }
}

fn var_secs(name: &str) -> Option<Duration> {
    var_u32(name).map(|s| Duration::from_secs(u64::from(s)))
}

fn var_u32(name: &str) -> Option<u32> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn var_usize(name: &str) -> Option<usize> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_knobs() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.max_players, 5);
        assert_eq!(cfg.max_rounds, 4);
        assert_eq!(cfg.turn_timeout, Duration::from_secs(50));
        assert_eq!(cfg.vote_timeout, Duration::from_secs(180));
    }
}
