//! Query handlers for the Game Session Engine.
//!
//! Read-only: nothing here dispenses questions or changes a game.

use serde::Serialize;
use trivia_core::error::DomainError;
use trivia_core::game::{FinishReason, Game, GameStatus, Lifeline};
use trivia_core::repository::{GameRepository, QuestionStore};
use uuid::Uuid;

/// Read-only view of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    /// The game identifier.
    pub game_id: Uuid,
    /// The owning player.
    pub player_id: Uuid,
    /// Current score.
    pub score: i64,
    /// Lifecycle state.
    pub status: GameStatus,
    /// Why the game finished, once it has.
    pub finish_reason: Option<FinishReason>,
    /// Questions not yet dispensed.
    pub questions_remaining: u64,
    /// Lifelines that can still be used.
    pub lifelines_available: Vec<Lifeline>,
}

/// Loads a game that callers are allowed to see. A game still in
/// `Creating` is reported as missing.
pub(crate) async fn find_visible_game(
    game_id: Uuid,
    games: &dyn GameRepository,
) -> Result<Game, DomainError> {
    games
        .find(game_id)
        .await?
        .filter(|game| game.status != GameStatus::Creating)
        .ok_or_else(|| DomainError::game_not_found(game_id))
}

/// Returns a game's current score, in any visible state.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the game does not exist.
pub async fn get_score(game_id: Uuid, games: &dyn GameRepository) -> Result<i64, DomainError> {
    Ok(find_visible_game(game_id, games).await?.score)
}

/// Retrieves a summary of a game.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the game does not exist.
pub async fn get_game_summary(
    game_id: Uuid,
    games: &dyn GameRepository,
    questions: &dyn QuestionStore,
) -> Result<GameSummary, DomainError> {
    let game = find_visible_game(game_id, games).await?;
    let questions_remaining = questions.count_remaining(game_id).await?;

    Ok(GameSummary {
        game_id: game.game_id,
        player_id: game.player_id,
        score: game.score,
        status: game.status,
        finish_reason: game.finish_reason,
        questions_remaining,
        lifelines_available: game.lifelines_available(),
    })
}
