//! Clue validation.

use lazy_regex::{regex, Lazy, Regex};

use crate::errors::domain::{DomainError, ValidationKind};

/// Sentinel recorded when a player's turn times out.
pub const AFK_CLUE: &str = "—";

/// The placeholder clue bots always play.
pub const BOT_CLUE: &str = "kunai";

/// 1 to 5 whitespace-separated tokens, each up to 20 characters from the
/// allowed set (ASCII alphanumerics, hyphen, Spanish accented vowels and enye).
static CLUE_RE: &Lazy<Regex> =
    regex!(r"^[A-Za-z0-9áéíóúÁÉÍÓÚñÑ-]{1,20}(\s+[A-Za-z0-9áéíóúÁÉÍÓÚñÑ-]{1,20}){0,4}$");

/// Validate and normalize a submitted clue.
///
/// Returns the trimmed clue text, or `InvalidClueFormat` without mutating
/// anything. The caller decides what to do with the result; rejection never
/// consumes the turn.
pub fn normalize_clue(text: &str) -> Result<String, DomainError> {
    let trimmed = text.trim();
    if CLUE_RE.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidClueFormat,
            "clue must be 1-5 words of up to 20 allowed characters each",
        ))
    }
}
