//! Trivia: Player Directory.
//!
//! Responsible for validating player names and the create-or-lookup of a
//! player by name.

pub mod application;
pub mod domain;
