//! Domain layer for the Game Session Engine.

pub mod commands;
pub mod lifelines;
pub mod outcomes;
pub mod scoring;
pub mod view;
