//! Validated player names.

use std::fmt;

use trivia_core::error::DomainError;
use trivia_core::player::MAX_PLAYER_NAME_CHARS;

/// A player name that is non-empty and at most
/// [`MAX_PLAYER_NAME_CHARS`] characters once surrounding whitespace is
/// trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    /// Validates `raw`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` for an empty or over-long name.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidInput(
                "player name must not be empty".to_owned(),
            ));
        }
        let length = trimmed.chars().count();
        if length > MAX_PLAYER_NAME_CHARS {
            return Err(DomainError::InvalidInput(format!(
                "player name is {length} characters; the limit is {MAX_PLAYER_NAME_CHARS}"
            )));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The validated name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
