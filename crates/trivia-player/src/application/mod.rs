//! Application layer for the Player Directory.

pub mod command_handlers;
pub mod query_handlers;
