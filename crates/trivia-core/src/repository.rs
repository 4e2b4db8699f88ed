//! Storage abstractions for players, games, and questions.
//!
//! Every method that mutates shared state documents the atomicity it
//! guarantees. Implementations must honor those guarantees across
//! processes, so they cannot rely on in-process locks alone.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::game::{Game, Lifeline};
use crate::player::Player;
use crate::question::{Dispensed, Question, QuestionDraft, SaveReport};

/// Durable directory of players keyed by unique name.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Looks a player up by exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, DomainError>;

    /// Looks a player up by id.
    async fn find_by_id(&self, player_id: Uuid) -> Result<Option<Player>, DomainError>;

    /// Inserts `player` unless its name is already taken.
    ///
    /// Returns `false` when the unique name constraint rejected the insert;
    /// the caller is expected to fall back to [`Self::find_by_name`].
    async fn insert_if_absent(&self, player: &Player) -> Result<bool, DomainError>;
}

/// An evaluated answer ready to be applied to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredAnswer {
    /// Game being played.
    pub game_id: Uuid,
    /// Question being answered.
    pub question_id: Uuid,
    /// Whether the submitted answer matched the ground truth.
    pub correct: bool,
    /// Points to add when `correct`.
    pub points: i64,
    /// When the answer was evaluated.
    pub answered_at: DateTime<Utc>,
}

/// What applying a [`ScoredAnswer`] did to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// First answer for the question; the game reflects it.
    Recorded(Game),
    /// The question had already been answered (e.g. a retried request);
    /// nothing changed.
    AlreadyAnswered {
        /// Outcome recorded by the first answer.
        correct: bool,
        /// Current game state.
        game: Game,
    },
}

/// Durable game records.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Inserts a new game. The game must be in `Creating`.
    async fn create(&self, game: &Game) -> Result<(), DomainError>;

    /// Moves a game from `Creating` to `Active`.
    ///
    /// # Errors
    ///
    /// `DomainError::NotFound` if no such game is in `Creating`.
    async fn activate(&self, game_id: Uuid) -> Result<Game, DomainError>;

    /// Deletes a game that never left `Creating`, together with its
    /// questions. Games in any other state are left untouched.
    async fn discard(&self, game_id: Uuid) -> Result<(), DomainError>;

    /// Loads a game in any state.
    async fn find(&self, game_id: Uuid) -> Result<Option<Game>, DomainError>;

    /// Applies an evaluated answer in one atomic step.
    ///
    /// The game must be `Active` and the question must belong to it and have
    /// been dispensed. The answer is recorded at most once per question; on
    /// first recording a correct answer adds `points` to the score and a
    /// wrong one resets the score to zero and finishes the game.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown game or a question outside the game,
    /// `GameFinished` for a finished game, `InvalidInput` for a question
    /// that was never dispensed.
    async fn settle_answer(&self, answer: &ScoredAnswer) -> Result<Settlement, DomainError>;

    /// Finishes an `Active` game as completed, keeping its score. A game that
    /// is already finished is returned unchanged.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown game or one still in `Creating`.
    async fn complete(&self, game_id: Uuid, at: DateTime<Utc>) -> Result<Game, DomainError>;

    /// Marks `lifeline` as used for an `Active` game.
    ///
    /// Returns `false` if it had already been used (or the game is no longer
    /// active); exactly one concurrent caller observes `true`.
    async fn consume_lifeline(&self, game_id: Uuid, lifeline: Lifeline)
    -> Result<bool, DomainError>;
}

/// Durable set of questions assigned to games, and their displayed flag.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Persists drafts as undisplayed questions after any already stored for
    /// the game. Each insert is independent; a draft whose fingerprint is
    /// already present in the game is skipped.
    async fn save_batch(
        &self,
        game_id: Uuid,
        drafts: &[QuestionDraft],
    ) -> Result<SaveReport, DomainError>;

    /// Atomically selects the earliest undisplayed question of the game,
    /// marks it displayed, and returns it. At most one caller ever receives
    /// a given question. The game status is checked in the same atomic step.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GameFinished` once the game has finished, and
    /// `DomainError::NotFound` for an unknown or still-creating game.
    async fn dispense_next(&self, game_id: Uuid) -> Result<Dispensed, DomainError>;

    /// Read-only fetch that never touches the displayed flag.
    async fn peek(&self, question_id: Uuid) -> Result<Option<Question>, DomainError>;

    /// Number of undisplayed questions left in the game.
    async fn count_remaining(&self, game_id: Uuid) -> Result<u64, DomainError>;
}
