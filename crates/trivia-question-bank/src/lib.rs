//! Trivia Question Bank: the adapter between the game engine and an
//! external trivia provider.
//!
//! [`PacedQuestionBank`] implements the core `QuestionBank` trait on top of
//! any [`QuestionProvider`], enforcing the provider's pacing policy and
//! normalizing raw records into plain-text drafts. [`OpenTdbClient`] is the
//! Open Trivia DB provider.

pub mod bank;
pub mod normalize;
pub mod opentdb;
pub mod pacing;
pub mod provider;

pub use bank::PacedQuestionBank;
pub use opentdb::OpenTdbClient;
pub use pacing::PacingPolicy;
pub use provider::{ProviderResponse, QuestionProvider, RawQuestion, ResponseCode};
