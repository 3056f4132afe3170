//! Leaderboard command implementation.

use std::sync::Arc;

use anyhow::Result;
use console::style;

use bellboard_client::{ClientConfig, HttpBackend, LeaderboardStore};

use super::common::{leaderboard_json, print_leaderboard};

/// Execute the leaderboard command.
pub async fn execute(config: &ClientConfig, limit: Option<usize>, format: &str) -> Result<()> {
    let store = LeaderboardStore::new(Arc::new(HttpBackend::new(config)?));
    let entries = store
        .refresh()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to fetch leaderboard: {e}"))?;

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&leaderboard_json(&entries, limit))?;
            println!("{json}");
        }
        _ => {
            println!(
                "{} Leaderboard ({} submissions):",
                style("→").cyan().bold(),
                entries.len()
            );
            print_leaderboard(&entries, limit, None);
        }
    }

    Ok(())
}
