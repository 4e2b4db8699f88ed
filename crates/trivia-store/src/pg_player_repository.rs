//! `PostgreSQL` implementation of the `PlayerRepository` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use trivia_core::error::DomainError;
use trivia_core::player::Player;
use trivia_core::repository::PlayerRepository;

use crate::error::storage;
use crate::rows::{PLAYER_COLUMNS, PlayerRow};

/// PostgreSQL-backed player directory.
#[derive(Debug, Clone)]
pub struct PgPlayerRepository {
    pool: PgPool,
}

impl PgPlayerRepository {
    /// Creates a new `PgPlayerRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for PgPlayerRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, DomainError> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE name = $1");
        let row: Option<PlayerRow> = sqlx::query_as(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        Ok(row.map(Player::from))
    }

    async fn find_by_id(&self, player_id: Uuid) -> Result<Option<Player>, DomainError> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE player_id = $1");
        let row: Option<PlayerRow> = sqlx::query_as(&sql)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        Ok(row.map(Player::from))
    }

    async fn insert_if_absent(&self, player: &Player) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "INSERT INTO players (player_id, name, created_at) VALUES ($1, $2, $3) \
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(player.player_id)
        .bind(&player.name)
        .bind(player.created_at)
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(result.rows_affected() == 1)
    }
}
