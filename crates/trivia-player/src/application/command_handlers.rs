//! Command handlers for the Player Directory.

use tracing::{debug, info, instrument};
use trivia_core::clock::Clock;
use trivia_core::command::Command;
use trivia_core::error::DomainError;
use trivia_core::player::Player;
use trivia_core::repository::PlayerRepository;
use uuid::Uuid;

use crate::domain::commands::GetOrCreatePlayer;
use crate::domain::player_name::PlayerName;

/// Result of a get-or-create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommandResult {
    /// The existing or newly registered player's id.
    pub player_id: Uuid,
    /// Whether this call registered the player.
    pub created: bool,
}

/// Handles the `GetOrCreatePlayer` command: validates the name, returns the
/// existing player's id, or registers a new player.
///
/// Two callers racing on the same new name both end up with the same id:
/// the loser's insert is rejected by the unique name constraint and it
/// falls back to a lookup.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for an invalid name (before any
/// storage access) and `DomainError::Storage` if the store fails.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id()))]
pub async fn handle_get_or_create_player(
    command: &GetOrCreatePlayer,
    clock: &dyn Clock,
    repo: &dyn PlayerRepository,
) -> Result<PlayerCommandResult, DomainError> {
    let name = PlayerName::parse(&command.name)?;

    if let Some(existing) = repo.find_by_name(name.as_str()).await? {
        debug!(player_id = %existing.player_id, "player already registered");
        return Ok(PlayerCommandResult {
            player_id: existing.player_id,
            created: false,
        });
    }

    let player = Player {
        player_id: Uuid::new_v4(),
        name: name.as_str().to_owned(),
        created_at: clock.now(),
    };
    if repo.insert_if_absent(&player).await? {
        info!(player_id = %player.player_id, "registered new player");
        return Ok(PlayerCommandResult {
            player_id: player.player_id,
            created: true,
        });
    }

    debug!("lost player registration race; reloading by name");
    let winner = repo.find_by_name(name.as_str()).await?.ok_or_else(|| {
        DomainError::Storage(format!(
            "player {name} rejected as duplicate but not found on reload"
        ))
    })?;
    Ok(PlayerCommandResult {
        player_id: winner.player_id,
        created: false,
    })
}
