//! Shared test doubles and fixtures for the trivia game engine.

mod clock;
pub mod fixtures;
mod question_bank;
mod rng;
mod store;

pub use clock::FixedClock;
pub use question_bank::StubQuestionBank;
pub use rng::{MockRng, SequenceRng};
pub use store::{FailingStore, InMemoryStore};
