//! Bellboard command-line interface.
//!
//! The `bellboard` binary lives in `main.rs`; argument definitions and
//! command implementations are exposed here so they can be tested directly.

pub mod cli;
pub mod commands;
