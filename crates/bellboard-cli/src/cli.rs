//! Command-line definition.

use clap::{Parser, Subcommand};

/// Bellboard - Bell-state jobs and their leaderboard
#[derive(Parser, Debug)]
#[command(name = "bellboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Backend endpoint (overrides config file and BELLBOARD_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a Bell pair and follow the job until it finishes
    Submit {
        /// Name shown on the leaderboard
        #[arg(short, long)]
        username: String,

        /// First qubit of the pair
        #[arg(long, default_value = "0")]
        q1: u32,

        /// Second qubit of the pair
        #[arg(long, default_value = "1")]
        q2: u32,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Show the ranked leaderboard
    Leaderboard {
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

/// Log filter for a `-v` count.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
