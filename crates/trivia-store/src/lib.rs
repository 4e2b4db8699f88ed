//! PostgreSQL storage for the trivia engine.
//!
//! Implements the repository traits from `trivia-core` with `sqlx`. Every
//! atomicity guarantee is enforced by the database (conditional updates,
//! row locks, and unique constraints), so several processes can share one
//! database.

mod error;
pub mod pg_game_repository;
pub mod pg_player_repository;
pub mod pg_question_store;
mod rows;

pub use pg_game_repository::PgGameRepository;
pub use pg_player_repository::PgPlayerRepository;
pub use pg_question_store::PgQuestionStore;
