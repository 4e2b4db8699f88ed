//! Commands for the Game Session Engine.

use trivia_core::command::Command;
use trivia_core::game::Lifeline;
use uuid::Uuid;

/// Command to start a new game for a player.
#[derive(Debug, Clone)]
pub struct StartGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player who owns the game.
    pub player_id: Uuid,
}

impl Command for StartGame {
    fn command_type(&self) -> &'static str {
        "game.start"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to dispense the next question of a game.
#[derive(Debug, Clone)]
pub struct NextQuestion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game to dispense from.
    pub game_id: Uuid,
}

impl Command for NextQuestion {
    fn command_type(&self) -> &'static str {
        "game.next_question"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to answer a dispensed question.
#[derive(Debug, Clone)]
pub struct SubmitAnswer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game being played.
    pub game_id: Uuid,
    /// The question being answered.
    pub question_id: Uuid,
    /// The player's answer, compared verbatim.
    pub answer: String,
}

impl Command for SubmitAnswer {
    fn command_type(&self) -> &'static str {
        "game.submit_answer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to use a lifeline on a dispensed question.
#[derive(Debug, Clone)]
pub struct UseLifeline {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game being played.
    pub game_id: Uuid,
    /// The question the lifeline applies to.
    pub question_id: Uuid,
    /// Which lifeline.
    pub lifeline: Lifeline,
}

impl Command for UseLifeline {
    fn command_type(&self) -> &'static str {
        match self.lifeline {
            Lifeline::FiftyFifty => "game.lifeline.fifty_fifty",
            Lifeline::PhoneAFriend => "game.lifeline.phone_a_friend",
        }
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
