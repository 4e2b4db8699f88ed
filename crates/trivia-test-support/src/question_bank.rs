//! Test question banks: canned `QuestionBank` implementations.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use trivia_core::error::DomainError;
use trivia_core::question::{Difficulty, QuestionDraft};
use trivia_core::question_bank::QuestionBank;

/// A question bank that serves fixed batches per tier and records the tiers
/// it was asked for. Tiers without a batch return an empty batch; tiers
/// marked as failing return `ProviderUnavailable`.
#[derive(Debug, Default)]
pub struct StubQuestionBank {
    batches: HashMap<Difficulty, Vec<QuestionDraft>>,
    failing: Vec<Difficulty>,
    requests: Mutex<Vec<(Difficulty, u32)>>,
}

impl StubQuestionBank {
    /// A bank with no questions in any tier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `drafts` for `difficulty`.
    #[must_use]
    pub fn with_batch(mut self, difficulty: Difficulty, drafts: Vec<QuestionDraft>) -> Self {
        self.batches.insert(difficulty, drafts);
        self
    }

    /// Fails every request for `difficulty`.
    #[must_use]
    pub fn failing_on(mut self, difficulty: Difficulty) -> Self {
        self.failing.push(difficulty);
        self
    }

    /// Tiers and counts requested so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<(Difficulty, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionBank for StubQuestionBank {
    async fn fetch_batch(
        &self,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<Vec<QuestionDraft>, DomainError> {
        self.requests
            .lock()
            .map_err(|_| DomainError::ProviderUnavailable("stub mutex poisoned".into()))?
            .push((difficulty, count));
        if self.failing.contains(&difficulty) {
            return Err(DomainError::ProviderUnavailable(format!(
                "no {difficulty} questions available"
            )));
        }
        Ok(self.batches.get(&difficulty).cloned().unwrap_or_default())
    }
}
