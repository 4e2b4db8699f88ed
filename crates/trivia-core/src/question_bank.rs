//! Question bank abstraction.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::question::{Difficulty, QuestionDraft};

/// Source of normalized questions, one batch per difficulty tier.
///
/// Implementations own any pacing or retry policy the upstream provider
/// requires; callers simply await the batch.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Fetches up to `count` plain-text, deduplicated questions of the given
    /// difficulty.
    ///
    /// # Errors
    ///
    /// `DomainError::ProviderUnavailable` if the tier cannot be retrieved.
    async fn fetch_batch(
        &self,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<Vec<QuestionDraft>, DomainError>;
}
