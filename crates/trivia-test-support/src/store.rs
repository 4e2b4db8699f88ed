//! Test stores: in-memory and failing implementations of the repository
//! traits.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use trivia_core::error::DomainError;
use trivia_core::game::{FinishReason, Game, GameStatus, Lifeline};
use trivia_core::player::Player;
use trivia_core::question::{Dispensed, Question, QuestionDraft, SaveReport};
use trivia_core::repository::{
    GameRepository, PlayerRepository, QuestionStore, ScoredAnswer, Settlement,
};
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    players: Vec<Player>,
    games: HashMap<Uuid, Game>,
    questions: Vec<Question>,
}

/// A store that keeps every record in memory behind a single mutex.
///
/// Each trait method runs entirely under the lock, which gives it the same
/// atomicity the PostgreSQL store gets from conditional updates and row
/// locks.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    fail_saves: AtomicBool,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `save_batch` call fail with a storage error.
    pub fn fail_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }

    /// Snapshot of all players.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn players(&self) -> Vec<Player> {
        self.state.lock().unwrap().players.clone()
    }

    /// Snapshot of all games.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn games(&self) -> Vec<Game> {
        self.state.lock().unwrap().games.values().cloned().collect()
    }

    /// Snapshot of a game's questions in position order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn questions_for(&self, game_id: Uuid) -> Vec<Question> {
        let state = self.state.lock().unwrap();
        let mut questions: Vec<Question> = state
            .questions
            .iter()
            .filter(|q| q.game_id == game_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.position);
        questions
    }

    /// Inserts a game directly, in whatever state it is in.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn seed_game(&self, game: Game) {
        self.state.lock().unwrap().games.insert(game.game_id, game);
    }

    /// Inserts a player directly.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn seed_player(&self, player: Player) {
        self.state.lock().unwrap().players.push(player);
    }
}

fn storage_lock_error() -> DomainError {
    DomainError::Storage("in-memory store mutex poisoned".into())
}

#[async_trait]
impl PlayerRepository for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, DomainError> {
        let state = self.state.lock().map_err(|_| storage_lock_error())?;
        Ok(state.players.iter().find(|p| p.name == name).cloned())
    }

    async fn find_by_id(&self, player_id: Uuid) -> Result<Option<Player>, DomainError> {
        let state = self.state.lock().map_err(|_| storage_lock_error())?;
        Ok(state
            .players
            .iter()
            .find(|p| p.player_id == player_id)
            .cloned())
    }

    async fn insert_if_absent(&self, player: &Player) -> Result<bool, DomainError> {
        let mut state = self.state.lock().map_err(|_| storage_lock_error())?;
        if state.players.iter().any(|p| p.name == player.name) {
            return Ok(false);
        }
        state.players.push(player.clone());
        Ok(true)
    }
}

#[async_trait]
impl GameRepository for InMemoryStore {
    async fn create(&self, game: &Game) -> Result<(), DomainError> {
        let mut state = self.state.lock().map_err(|_| storage_lock_error())?;
        if state.games.contains_key(&game.game_id) {
            return Err(DomainError::Storage(format!(
                "duplicate game id {}",
                game.game_id
            )));
        }
        state.games.insert(game.game_id, game.clone());
        Ok(())
    }

    async fn activate(&self, game_id: Uuid) -> Result<Game, DomainError> {
        let mut state = self.state.lock().map_err(|_| storage_lock_error())?;
        match state.games.get_mut(&game_id) {
            Some(game) if game.status == GameStatus::Creating => {
                game.status = GameStatus::Active;
                Ok(game.clone())
            }
            _ => Err(DomainError::game_not_found(game_id)),
        }
    }

    async fn discard(&self, game_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.state.lock().map_err(|_| storage_lock_error())?;
        if state
            .games
            .get(&game_id)
            .is_some_and(|g| g.status == GameStatus::Creating)
        {
            state.games.remove(&game_id);
            state.questions.retain(|q| q.game_id != game_id);
        }
        Ok(())
    }

    async fn find(&self, game_id: Uuid) -> Result<Option<Game>, DomainError> {
        let state = self.state.lock().map_err(|_| storage_lock_error())?;
        Ok(state.games.get(&game_id).cloned())
    }

    async fn settle_answer(&self, answer: &ScoredAnswer) -> Result<Settlement, DomainError> {
        let mut guard = self.state.lock().map_err(|_| storage_lock_error())?;
        let State {
            games, questions, ..
        } = &mut *guard;

        let game = games
            .get_mut(&answer.game_id)
            .ok_or_else(|| DomainError::game_not_found(answer.game_id))?;
        game.ensure_active()?;

        let question = questions
            .iter_mut()
            .find(|q| q.question_id == answer.question_id && q.game_id == answer.game_id)
            .ok_or_else(|| DomainError::question_not_found(answer.question_id))?;
        if !question.displayed {
            return Err(DomainError::InvalidInput(format!(
                "question {} has not been dispensed",
                answer.question_id
            )));
        }
        if let Some(correct) = question.answered_correctly {
            return Ok(Settlement::AlreadyAnswered {
                correct,
                game: game.clone(),
            });
        }

        question.answered_correctly = Some(answer.correct);
        if answer.correct {
            game.score += answer.points;
        } else {
            finish(game, FinishReason::WrongAnswer, answer.answered_at);
            game.score = 0;
        }
        Ok(Settlement::Recorded(game.clone()))
    }

    async fn complete(&self, game_id: Uuid, at: DateTime<Utc>) -> Result<Game, DomainError> {
        let mut state = self.state.lock().map_err(|_| storage_lock_error())?;
        let game = state
            .games
            .get_mut(&game_id)
            .filter(|g| g.status != GameStatus::Creating)
            .ok_or_else(|| DomainError::game_not_found(game_id))?;
        if game.status == GameStatus::Active {
            finish(game, FinishReason::Completed, at);
        }
        Ok(game.clone())
    }

    async fn consume_lifeline(
        &self,
        game_id: Uuid,
        lifeline: Lifeline,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.lock().map_err(|_| storage_lock_error())?;
        let Some(game) = state.games.get_mut(&game_id) else {
            return Ok(false);
        };
        if game.status != GameStatus::Active || game.lifeline_used(lifeline) {
            return Ok(false);
        }
        match lifeline {
            Lifeline::FiftyFifty => game.fifty_fifty_used = true,
            Lifeline::PhoneAFriend => game.phone_a_friend_used = true,
        }
        Ok(true)
    }
}

fn finish(game: &mut Game, reason: FinishReason, at: DateTime<Utc>) {
    game.status = GameStatus::Finished;
    game.finish_reason = Some(reason);
    game.finished_at = Some(at);
}

#[async_trait]
impl QuestionStore for InMemoryStore {
    async fn save_batch(
        &self,
        game_id: Uuid,
        drafts: &[QuestionDraft],
    ) -> Result<SaveReport, DomainError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("disk full".into()));
        }
        let mut state = self.state.lock().map_err(|_| storage_lock_error())?;
        let mut next_position = state
            .questions
            .iter()
            .filter(|q| q.game_id == game_id)
            .map(|q| q.position + 1)
            .max()
            .unwrap_or(0);

        let mut report = SaveReport::default();
        for draft in drafts {
            let fingerprint = draft.fingerprint();
            let duplicate = state
                .questions
                .iter()
                .any(|q| q.game_id == game_id && q.fingerprint == fingerprint);
            if duplicate {
                report.skipped += 1;
                continue;
            }
            state
                .questions
                .push(Question::from_draft(draft.clone(), game_id, next_position));
            next_position += 1;
            report.stored += 1;
        }
        Ok(report)
    }

    async fn dispense_next(&self, game_id: Uuid) -> Result<Dispensed, DomainError> {
        let mut state = self.state.lock().map_err(|_| storage_lock_error())?;
        state
            .games
            .get(&game_id)
            .ok_or_else(|| DomainError::game_not_found(game_id))?
            .ensure_active()?;
        let next = state
            .questions
            .iter_mut()
            .filter(|q| q.game_id == game_id && !q.displayed)
            .min_by_key(|q| q.position);
        Ok(match next {
            Some(question) => {
                question.displayed = true;
                Dispensed::Question(Box::new(question.clone()))
            }
            None => Dispensed::Exhausted,
        })
    }

    async fn peek(&self, question_id: Uuid) -> Result<Option<Question>, DomainError> {
        let state = self.state.lock().map_err(|_| storage_lock_error())?;
        Ok(state
            .questions
            .iter()
            .find(|q| q.question_id == question_id)
            .cloned())
    }

    async fn count_remaining(&self, game_id: Uuid) -> Result<u64, DomainError> {
        let state = self.state.lock().map_err(|_| storage_lock_error())?;
        let remaining = state
            .questions
            .iter()
            .filter(|q| q.game_id == game_id && !q.displayed)
            .count();
        Ok(u64::try_from(remaining).unwrap_or(u64::MAX))
    }
}

/// A store whose every operation fails with a storage error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingStore;

fn connection_refused() -> DomainError {
    DomainError::Storage("connection refused".into())
}

#[async_trait]
impl PlayerRepository for FailingStore {
    async fn find_by_name(&self, _name: &str) -> Result<Option<Player>, DomainError> {
        Err(connection_refused())
    }

    async fn find_by_id(&self, _player_id: Uuid) -> Result<Option<Player>, DomainError> {
        Err(connection_refused())
    }

    async fn insert_if_absent(&self, _player: &Player) -> Result<bool, DomainError> {
        Err(connection_refused())
    }
}

#[async_trait]
impl GameRepository for FailingStore {
    async fn create(&self, _game: &Game) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn activate(&self, _game_id: Uuid) -> Result<Game, DomainError> {
        Err(connection_refused())
    }

    async fn discard(&self, _game_id: Uuid) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn find(&self, _game_id: Uuid) -> Result<Option<Game>, DomainError> {
        Err(connection_refused())
    }

    async fn settle_answer(&self, _answer: &ScoredAnswer) -> Result<Settlement, DomainError> {
        Err(connection_refused())
    }

    async fn complete(&self, _game_id: Uuid, _at: DateTime<Utc>) -> Result<Game, DomainError> {
        Err(connection_refused())
    }

    async fn consume_lifeline(
        &self,
        _game_id: Uuid,
        _lifeline: Lifeline,
    ) -> Result<bool, DomainError> {
        Err(connection_refused())
    }
}

#[async_trait]
impl QuestionStore for FailingStore {
    async fn save_batch(
        &self,
        _game_id: Uuid,
        _drafts: &[QuestionDraft],
    ) -> Result<SaveReport, DomainError> {
        Err(connection_refused())
    }

    async fn dispense_next(&self, _game_id: Uuid) -> Result<Dispensed, DomainError> {
        Err(connection_refused())
    }

    async fn peek(&self, _question_id: Uuid) -> Result<Option<Question>, DomainError> {
        Err(connection_refused())
    }

    async fn count_remaining(&self, _game_id: Uuid) -> Result<u64, DomainError> {
        Err(connection_refused())
    }
}
