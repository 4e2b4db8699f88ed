//! Player identity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Maximum player name length, in characters.
pub const MAX_PLAYER_NAME_CHARS: usize = 40;

/// A registered player. Created on first encounter of a name, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    /// Durable player identifier.
    pub player_id: Uuid,
    /// Unique display name.
    pub name: String,
    /// When the player was first seen.
    pub created_at: DateTime<Utc>,
}
