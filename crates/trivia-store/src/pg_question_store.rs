//! `PostgreSQL` implementation of the `QuestionStore` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use trivia_core::error::DomainError;
use trivia_core::game::Game;
use trivia_core::question::{Dispensed, Question, QuestionDraft, SaveReport};
use trivia_core::repository::QuestionStore;

use crate::error::storage;
use crate::rows::{GAME_COLUMNS, GameRow, QUESTION_COLUMNS, QuestionRow};

/// PostgreSQL-backed question store.
#[derive(Debug, Clone)]
pub struct PgQuestionStore {
    pool: PgPool,
}

impl PgQuestionStore {
    /// Creates a new `PgQuestionStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn save_batch(
        &self,
        game_id: Uuid,
        drafts: &[QuestionDraft],
    ) -> Result<SaveReport, DomainError> {
        let (mut position,): (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM questions WHERE game_id = $1",
        )
        .bind(game_id)
        .fetch_one(&self.pool)
        .await
        .map_err(storage)?;

        let mut report = SaveReport::default();
        for draft in drafts {
            let [first, second, third] = &draft.incorrect_answers;
            let result = sqlx::query(
                "INSERT INTO questions (question_id, game_id, position, difficulty, category, \
                 question_text, correct_answer, incorrect_answer_1, incorrect_answer_2, \
                 incorrect_answer_3, fingerprint) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
                 ON CONFLICT (game_id, fingerprint) DO NOTHING",
            )
            .bind(Uuid::new_v4())
            .bind(game_id)
            .bind(position)
            .bind(draft.difficulty.as_str())
            .bind(&draft.category)
            .bind(&draft.text)
            .bind(&draft.correct_answer)
            .bind(first)
            .bind(second)
            .bind(third)
            .bind(draft.fingerprint())
            .execute(&self.pool)
            .await
            .map_err(storage)?;

            if result.rows_affected() == 1 {
                report.stored += 1;
                position += 1;
            } else {
                debug!(%game_id, text = %draft.text, "skipped duplicate question");
                report.skipped += 1;
            }
        }
        Ok(report)
    }

    async fn dispense_next(&self, game_id: Uuid) -> Result<Dispensed, DomainError> {
        let mut transaction = self.pool.begin().await.map_err(storage)?;

        // FOR SHARE blocks while settle_answer holds the game FOR UPDATE.
        let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE game_id = $1 FOR SHARE");
        let game: Game = sqlx::query_as::<_, GameRow>(&sql)
            .bind(game_id)
            .fetch_optional(&mut *transaction)
            .await
            .map_err(storage)?
            .ok_or_else(|| DomainError::game_not_found(game_id))?
            .try_into()?;
        game.ensure_active()?;

        let sql = format!(
            "UPDATE questions SET displayed = TRUE \
             WHERE NOT displayed AND question_id = ( \
                 SELECT question_id FROM questions \
                 WHERE game_id = $1 AND NOT displayed \
                 ORDER BY position \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {QUESTION_COLUMNS}"
        );
        let row: Option<QuestionRow> = sqlx::query_as(&sql)
            .bind(game_id)
            .fetch_optional(&mut *transaction)
            .await
            .map_err(storage)?;
        let dispensed = match row {
            Some(row) => Dispensed::Question(Box::new(Question::try_from(row)?)),
            None => Dispensed::Exhausted,
        };

        transaction.commit().await.map_err(storage)?;
        Ok(dispensed)
    }

    async fn peek(&self, question_id: Uuid) -> Result<Option<Question>, DomainError> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE question_id = $1");
        let row: Option<QuestionRow> = sqlx::query_as(&sql)
            .bind(question_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.map(Question::try_from).transpose()
    }

    async fn count_remaining(&self, game_id: Uuid) -> Result<u64, DomainError> {
        let (remaining,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM questions WHERE game_id = $1 AND NOT displayed")
                .bind(game_id)
                .fetch_one(&self.pool)
                .await
                .map_err(storage)?;
        Ok(u64::try_from(remaining).unwrap_or_default())
    }
}
