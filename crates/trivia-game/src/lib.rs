//! Trivia: Game Session Engine.
//!
//! Responsible for the game lifecycle (creation, question dispensing,
//! answer evaluation, scoring, termination) and for the lifelines that
//! narrow a question's answer set.

pub mod application;
pub mod domain;
