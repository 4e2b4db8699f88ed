//! Commands for the Player Directory.

use trivia_core::command::Command;
use uuid::Uuid;

/// Command to look up a player by name, registering it on first encounter.
#[derive(Debug, Clone)]
pub struct GetOrCreatePlayer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The requested player name, unvalidated.
    pub name: String,
}

impl Command for GetOrCreatePlayer {
    fn command_type(&self) -> &'static str {
        "player.get_or_create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
