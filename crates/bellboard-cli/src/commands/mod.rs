//! CLI command implementations.

pub mod common;
pub mod leaderboard;
pub mod submit;
