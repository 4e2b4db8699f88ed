//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

use crate::game::Lifeline;

/// Top-level domain error type.
///
/// Every variant maps to a stable machine-readable code (see
/// [`DomainError::code`]) so callers can branch on the failure kind.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Input rejected before any mutation (bad player name, malformed ids,
    /// answering a question that was never dispensed).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The external question source failed or stayed rate-limited past the
    /// retry policy.
    #[error("question provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// An entity was not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was looked up.
        entity: &'static str,
        /// The identifier that was looked up.
        id: Uuid,
    },

    /// The operation targeted a game that has already finished.
    #[error("game {0} is finished")]
    GameFinished(Uuid),

    /// The lifeline has already been used in this game.
    #[error("lifeline {lifeline} already used in game {game_id}")]
    LifelineExhausted {
        /// The game the lifeline was requested for.
        game_id: Uuid,
        /// The lifeline that was requested.
        lifeline: Lifeline,
    },

    /// A durable-store error.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    /// Shorthand for a missing player.
    #[must_use]
    pub fn player_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: "player",
            id,
        }
    }

    /// Shorthand for a missing game.
    #[must_use]
    pub fn game_not_found(id: Uuid) -> Self {
        Self::NotFound { entity: "game", id }
    }

    /// Shorthand for a missing question.
    #[must_use]
    pub fn question_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: "question",
            id,
        }
    }

    /// Stable machine-readable code for this error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::ProviderUnavailable(_) => "provider_unavailable",
            Self::NotFound { .. } => "not_found",
            Self::GameFinished(_) => "game_finished",
            Self::LifelineExhausted { .. } => "lifeline_exhausted",
            Self::Storage(_) => "storage_failure",
        }
    }
}
