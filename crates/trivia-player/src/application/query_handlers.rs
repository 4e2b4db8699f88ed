//! Query handlers for the Player Directory.

use trivia_core::error::DomainError;
use trivia_core::player::Player;
use trivia_core::repository::PlayerRepository;
use uuid::Uuid;

/// Retrieves a player by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no such player exists.
pub async fn get_player_by_id(
    player_id: Uuid,
    repo: &dyn PlayerRepository,
) -> Result<Player, DomainError> {
    repo.find_by_id(player_id)
        .await?
        .ok_or_else(|| DomainError::player_not_found(player_id))
}
