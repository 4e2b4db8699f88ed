//! Row types and their conversion into domain records.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use trivia_core::error::DomainError;
use trivia_core::game::{FinishReason, Game, GameStatus};
use trivia_core::player::Player;
use trivia_core::question::{Difficulty, Question};
use uuid::Uuid;

pub(crate) const PLAYER_COLUMNS: &str = "player_id, name, created_at";

pub(crate) const GAME_COLUMNS: &str = "game_id, player_id, score, status, finish_reason, \
     fifty_fifty_used, phone_a_friend_used, created_at, finished_at";

pub(crate) const QUESTION_COLUMNS: &str = "question_id, game_id, position, difficulty, category, \
     question_text, correct_answer, incorrect_answer_1, incorrect_answer_2, incorrect_answer_3, \
     fingerprint, displayed, answered_correctly";

#[derive(Debug, FromRow)]
pub(crate) struct PlayerRow {
    player_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Self {
            player_id: row.player_id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct GameRow {
    game_id: Uuid,
    player_id: Uuid,
    score: i64,
    status: String,
    finish_reason: Option<String>,
    fifty_fifty_used: bool,
    phone_a_friend_used: bool,
    created_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl TryFrom<GameRow> for Game {
    type Error = DomainError;

    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        Ok(Self {
            game_id: row.game_id,
            player_id: row.player_id,
            score: row.score,
            status: row.status.parse::<GameStatus>()?,
            finish_reason: row
                .finish_reason
                .as_deref()
                .map(str::parse::<FinishReason>)
                .transpose()?,
            fifty_fifty_used: row.fifty_fifty_used,
            phone_a_friend_used: row.phone_a_friend_used,
            created_at: row.created_at,
            finished_at: row.finished_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct QuestionRow {
    question_id: Uuid,
    game_id: Uuid,
    position: i32,
    difficulty: String,
    category: String,
    question_text: String,
    correct_answer: String,
    incorrect_answer_1: String,
    incorrect_answer_2: String,
    incorrect_answer_3: String,
    fingerprint: String,
    displayed: bool,
    answered_correctly: Option<bool>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = DomainError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let difficulty = row
            .difficulty
            .parse::<Difficulty>()
            .map_err(|e| DomainError::Storage(format!("corrupt question row: {e}")))?;
        Ok(Self {
            question_id: row.question_id,
            game_id: row.game_id,
            position: row.position,
            difficulty,
            category: row.category,
            text: row.question_text,
            correct_answer: row.correct_answer,
            incorrect_answers: [
                row.incorrect_answer_1,
                row.incorrect_answer_2,
                row.incorrect_answer_3,
            ],
            fingerprint: row.fingerprint,
            displayed: row.displayed,
            answered_correctly: row.answered_correctly,
        })
    }
}
