//! Game record and its lifecycle states.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Lifecycle state of a game.
///
/// `Creating` only exists while the question bundle is being stored; the
/// engine treats such a game as if it did not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Question bundle is being persisted.
    Creating,
    /// Questions can be dispensed and answered.
    Active,
    /// Terminal.
    Finished,
}

impl GameStatus {
    /// Storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creating => "creating",
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl FromStr for GameStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creating" => Ok(Self::Creating),
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            other => Err(DomainError::Storage(format!("unknown game status: {other}"))),
        }
    }
}

/// Why a game reached `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// A wrong answer reset the score to zero.
    WrongAnswer,
    /// Every stored question was dispensed.
    Completed,
}

impl FinishReason {
    /// Storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WrongAnswer => "wrong_answer",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for FinishReason {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wrong_answer" => Ok(Self::WrongAnswer),
            "completed" => Ok(Self::Completed),
            other => Err(DomainError::Storage(format!(
                "unknown finish reason: {other}"
            ))),
        }
    }
}

/// One-time-per-game assists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifeline {
    /// Eliminates two incorrect answers.
    FiftyFifty,
    /// Narrows the answer to one of two, one of which is correct.
    PhoneAFriend,
}

impl Lifeline {
    /// All lifelines, in display order.
    pub const ALL: [Self; 2] = [Self::FiftyFifty, Self::PhoneAFriend];

    /// Stable name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FiftyFifty => "fifty_fifty",
            Self::PhoneAFriend => "phone_a_friend",
        }
    }
}

impl fmt::Display for Lifeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One play-through owned by a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// Game identifier.
    pub game_id: Uuid,
    /// Owning player.
    pub player_id: Uuid,
    /// Current score.
    pub score: i64,
    /// Lifecycle state.
    pub status: GameStatus,
    /// Set once the game is finished.
    pub finish_reason: Option<FinishReason>,
    /// Whether Fifty-Fifty has been consumed.
    pub fifty_fifty_used: bool,
    /// Whether Phone-a-Friend has been consumed.
    pub phone_a_friend_used: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Set once the game is finished.
    pub finished_at: Option<DateTime<Utc>>,
}

impl Game {
    /// A fresh game in `Creating` with a zero score and every lifeline
    /// available.
    #[must_use]
    pub fn new(game_id: Uuid, player_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            game_id,
            player_id,
            score: 0,
            status: GameStatus::Creating,
            finish_reason: None,
            fifty_fifty_used: false,
            phone_a_friend_used: false,
            created_at,
            finished_at: None,
        }
    }

    /// Checks that questions can be dispensed or answered.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` for a game still in `Creating` and
    /// `DomainError::GameFinished` for a finished one.
    pub fn ensure_active(&self) -> Result<(), DomainError> {
        match self.status {
            GameStatus::Active => Ok(()),
            GameStatus::Creating => Err(DomainError::game_not_found(self.game_id)),
            GameStatus::Finished => Err(DomainError::GameFinished(self.game_id)),
        }
    }

    /// Whether `lifeline` has already been consumed.
    #[must_use]
    pub fn lifeline_used(&self, lifeline: Lifeline) -> bool {
        match lifeline {
            Lifeline::FiftyFifty => self.fifty_fifty_used,
            Lifeline::PhoneAFriend => self.phone_a_friend_used,
        }
    }

    /// Lifelines still available to the player.
    #[must_use]
    pub fn lifelines_available(&self) -> Vec<Lifeline> {
        Lifeline::ALL
            .into_iter()
            .filter(|lifeline| !self.lifeline_used(*lifeline))
            .collect()
    }
}
