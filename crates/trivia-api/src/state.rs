//! Shared application state.

use std::sync::{Arc, Mutex};

use trivia_core::clock::Clock;
use trivia_core::question_bank::QuestionBank;
use trivia_core::repository::{GameRepository, PlayerRepository, QuestionStore};
use trivia_core::rng::DeterministicRng;
use trivia_game::domain::scoring::GameSettings;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Shuffles answers and drives lifelines. Locked only around synchronous
    /// calls.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Player directory.
    pub players: Arc<dyn PlayerRepository>,
    /// Game records.
    pub games: Arc<dyn GameRepository>,
    /// Stored questions.
    pub questions: Arc<dyn QuestionStore>,
    /// External question source.
    pub question_bank: Arc<dyn QuestionBank>,
    /// Engine settings.
    pub settings: GameSettings,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        players: Arc<dyn PlayerRepository>,
        games: Arc<dyn GameRepository>,
        questions: Arc<dyn QuestionStore>,
        question_bank: Arc<dyn QuestionBank>,
        settings: GameSettings,
    ) -> Self {
        Self {
            clock,
            rng,
            players,
            games,
            questions,
            question_bank,
            settings,
        }
    }
}
