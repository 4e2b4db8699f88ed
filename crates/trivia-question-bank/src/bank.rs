//! Paced question bank.

use async_trait::async_trait;
use tracing::{info, instrument, warn};
use trivia_core::error::DomainError;
use trivia_core::question::{Difficulty, QuestionDraft};
use trivia_core::question_bank::QuestionBank;

use crate::normalize::normalize_batch;
use crate::pacing::{Pacer, PacingPolicy};
use crate::provider::{QuestionProvider, ResponseCode};

/// Largest batch a single provider request may ask for.
pub const MAX_BATCH_SIZE: u32 = 50;

/// [`QuestionBank`] over a raw provider, with pacing and rate-limit retries.
#[derive(Debug)]
pub struct PacedQuestionBank<P> {
    provider: P,
    pacer: Pacer,
}

impl<P: QuestionProvider> PacedQuestionBank<P> {
    /// Wraps `provider` with the given pacing policy.
    #[must_use]
    pub fn new(provider: P, policy: PacingPolicy) -> Self {
        Self {
            provider,
            pacer: Pacer::new(policy),
        }
    }
}

#[async_trait]
impl<P: QuestionProvider> QuestionBank for PacedQuestionBank<P> {
    #[instrument(skip(self))]
    async fn fetch_batch(
        &self,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<Vec<QuestionDraft>, DomainError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if count > MAX_BATCH_SIZE {
            return Err(DomainError::InvalidInput(format!(
                "batch size {count} exceeds {MAX_BATCH_SIZE}"
            )));
        }

        let retries = self.pacer.policy().rate_limit_retries;
        for attempt in 0..=retries {
            self.pacer.wait_turn().await;
            let response = self.provider.request(difficulty, count).await?;

            match response.code {
                ResponseCode::Success => {
                    let drafts = normalize_batch(difficulty, &response.results);
                    info!(%difficulty, received = drafts.len(), "fetched question batch");
                    return Ok(drafts);
                }
                ResponseCode::RateLimited => {
                    warn!(%difficulty, attempt, "trivia provider rate limited the request");
                }
                other => {
                    return Err(DomainError::ProviderUnavailable(format!(
                        "provider returned {other:?} for {difficulty} questions"
                    )));
                }
            }
        }

        Err(DomainError::ProviderUnavailable(format!(
            "rate limited fetching {difficulty} questions after {retries} retries"
        )))
    }
}
