//! Domain layer for the Player Directory.

pub mod commands;
pub mod player_name;
