//! Application layer for the Game Session Engine.

pub mod command_handlers;
pub mod query_handlers;
