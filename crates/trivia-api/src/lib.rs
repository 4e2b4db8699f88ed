//! Trivia API library: configuration, application state, error mapping,
//! and route definitions shared by the server binary and its tests.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
