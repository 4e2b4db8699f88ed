//! Trivia Core: shared domain model and abstractions.
//!
//! This crate defines the records, error taxonomy, and traits that every
//! other trivia crate depends on. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod game;
pub mod player;
pub mod question;
pub mod question_bank;
pub mod repository;
pub mod rng;
