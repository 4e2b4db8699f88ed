//! `PostgreSQL` implementation of the `GameRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use trivia_core::error::DomainError;
use trivia_core::game::{FinishReason, Game, GameStatus, Lifeline};
use trivia_core::repository::{GameRepository, ScoredAnswer, Settlement};

use crate::error::storage;
use crate::rows::{GAME_COLUMNS, GameRow};

/// PostgreSQL-backed game records.
#[derive(Debug, Clone)]
pub struct PgGameRepository {
    pool: PgPool,
}

impl PgGameRepository {
    /// Creates a new `PgGameRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameRepository for PgGameRepository {
    async fn create(&self, game: &Game) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO games (game_id, player_id, score, status, finish_reason, \
             fifty_fifty_used, phone_a_friend_used, created_at, finished_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(game.game_id)
        .bind(game.player_id)
        .bind(game.score)
        .bind(game.status.as_str())
        .bind(game.finish_reason.map(FinishReason::as_str))
        .bind(game.fifty_fifty_used)
        .bind(game.phone_a_friend_used)
        .bind(game.created_at)
        .bind(game.finished_at)
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(())
    }

    async fn activate(&self, game_id: Uuid) -> Result<Game, DomainError> {
        let sql = format!(
            "UPDATE games SET status = 'active' \
             WHERE game_id = $1 AND status = 'creating' \
             RETURNING {GAME_COLUMNS}"
        );
        let row: Option<GameRow> = sqlx::query_as(&sql)
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.ok_or_else(|| DomainError::game_not_found(game_id))?
            .try_into()
    }

    async fn discard(&self, game_id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM games WHERE game_id = $1 AND status = 'creating'")
            .bind(game_id)
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        debug!(%game_id, deleted = result.rows_affected(), "discarded game in creating");
        Ok(())
    }

    async fn find(&self, game_id: Uuid) -> Result<Option<Game>, DomainError> {
        let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE game_id = $1");
        let row: Option<GameRow> = sqlx::query_as(&sql)
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.map(Game::try_from).transpose()
    }

    async fn settle_answer(&self, answer: &ScoredAnswer) -> Result<Settlement, DomainError> {
        let mut transaction = self.pool.begin().await.map_err(storage)?;

        let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE game_id = $1 FOR UPDATE");
        let game: Game = sqlx::query_as::<_, GameRow>(&sql)
            .bind(answer.game_id)
            .fetch_optional(&mut *transaction)
            .await
            .map_err(storage)?
            .ok_or_else(|| DomainError::game_not_found(answer.game_id))?
            .try_into()?;
        game.ensure_active()?;

        let question: Option<(bool, Option<bool>)> = sqlx::query_as(
            "SELECT displayed, answered_correctly FROM questions \
             WHERE question_id = $1 AND game_id = $2 FOR UPDATE",
        )
        .bind(answer.question_id)
        .bind(answer.game_id)
        .fetch_optional(&mut *transaction)
        .await
        .map_err(storage)?;
        let (displayed, answered_correctly) =
            question.ok_or_else(|| DomainError::question_not_found(answer.question_id))?;
        if !displayed {
            return Err(DomainError::InvalidInput(format!(
                "question {} has not been dispensed",
                answer.question_id
            )));
        }
        if let Some(correct) = answered_correctly {
            transaction.commit().await.map_err(storage)?;
            return Ok(Settlement::AlreadyAnswered { correct, game });
        }

        sqlx::query("UPDATE questions SET answered_correctly = $2 WHERE question_id = $1")
            .bind(answer.question_id)
            .bind(answer.correct)
            .execute(&mut *transaction)
            .await
            .map_err(storage)?;

        let sql = if answer.correct {
            format!(
                "UPDATE games SET score = score + $2 WHERE game_id = $1 \
                 RETURNING {GAME_COLUMNS}"
            )
        } else {
            format!(
                "UPDATE games SET score = 0, status = 'finished', \
                 finish_reason = 'wrong_answer', finished_at = $2 WHERE game_id = $1 \
                 RETURNING {GAME_COLUMNS}"
            )
        };
        let query = sqlx::query_as::<_, GameRow>(&sql).bind(answer.game_id);
        let query = if answer.correct {
            query.bind(answer.points)
        } else {
            query.bind(answer.answered_at)
        };
        let game: Game = query
            .fetch_one(&mut *transaction)
            .await
            .map_err(storage)?
            .try_into()?;

        transaction.commit().await.map_err(storage)?;
        Ok(Settlement::Recorded(game))
    }

    async fn complete(&self, game_id: Uuid, at: DateTime<Utc>) -> Result<Game, DomainError> {
        let sql = format!(
            "UPDATE games SET status = 'finished', finish_reason = 'completed', finished_at = $2 \
             WHERE game_id = $1 AND status = 'active' \
             RETURNING {GAME_COLUMNS}"
        );
        let row: Option<GameRow> = sqlx::query_as(&sql)
            .bind(game_id)
            .bind(at)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        if let Some(row) = row {
            return row.try_into();
        }

        // Finished by a concurrent caller, or not visible at all.
        self.find(game_id)
            .await?
            .filter(|game| game.status == GameStatus::Finished)
            .ok_or_else(|| DomainError::game_not_found(game_id))
    }

    async fn consume_lifeline(
        &self,
        game_id: Uuid,
        lifeline: Lifeline,
    ) -> Result<bool, DomainError> {
        let sql = match lifeline {
            Lifeline::FiftyFifty => {
                "UPDATE games SET fifty_fifty_used = TRUE \
                 WHERE game_id = $1 AND status = 'active' AND NOT fifty_fifty_used"
            }
            Lifeline::PhoneAFriend => {
                "UPDATE games SET phone_a_friend_used = TRUE \
                 WHERE game_id = $1 AND status = 'active' AND NOT phone_a_friend_used"
            }
        };
        let result = sqlx::query(sql)
            .bind(game_id)
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(result.rows_affected() == 1)
    }
}
