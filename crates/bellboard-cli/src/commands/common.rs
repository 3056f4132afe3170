//! Shared helpers for CLI commands.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Value, json};

use bellboard_client::ClientConfig;
use bellboard_core::{LeaderboardEntry, ScoredResult};

/// Widest histogram bar, reached by an outcome holding every shot.
const BAR_WIDTH: usize = 40;

/// Resolve the client configuration: file, environment, then `--endpoint`.
pub fn load_config(endpoint: Option<&str>) -> Result<ClientConfig> {
    Ok(ClientConfig::load(endpoint)?)
}

/// Spinner used while waiting on the backend; hidden for machine output.
pub fn spinner(hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(spinner)
}

/// Histogram bar for `count` out of `total` shots.
pub fn bar(count: u64, total: u64) -> String {
    if total == 0 {
        return String::new();
    }
    let len = (count as f64 / total as f64 * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.min(BAR_WIDTH))
}

/// Print a scored result as a label-ordered histogram followed by the score.
pub fn print_histogram(result: &ScoredResult) {
    let total = result.total_shots();
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        total
    );

    for (label, count) in &result.histogram {
        let prob = if total == 0 {
            0.0
        } else {
            *count as f64 / total as f64 * 100.0
        };
        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(label).cyan(),
            count,
            prob,
            style(bar(*count, total)).green()
        );
    }

    println!("\n  Score: {}", style(result.score).yellow().bold());
}

/// Print ranked entries as a table, optionally highlighting one user.
pub fn print_leaderboard(entries: &[LeaderboardEntry], limit: Option<usize>, highlight: Option<&str>) {
    if entries.is_empty() {
        println!("  No submissions yet.");
        return;
    }

    println!(
        "  {:>4}  {:<20} {:>9}  {:>8}",
        style("Rank").bold(),
        style("User").bold(),
        style("Qubits").bold(),
        style("Score").bold()
    );

    let shown = limit.unwrap_or(entries.len()).min(entries.len());
    for (index, entry) in entries.iter().take(shown).enumerate() {
        let (q1, q2) = entry.qubits();
        let user = if highlight == Some(entry.username.as_str()) {
            style(entry.username.as_str()).green().bold()
        } else {
            style(entry.username.as_str())
        };
        println!(
            "  {:>4}  {:<20} {:>9}  {:>8}",
            index + 1,
            user,
            format!("({q1}, {q2})"),
            entry.score
        );
    }

    if entries.len() > shown {
        println!("  ... and {} more", entries.len() - shown);
    }
}

/// JSON form of a ranked leaderboard.
pub fn leaderboard_json(entries: &[LeaderboardEntry], limit: Option<usize>) -> Value {
    let shown = limit.unwrap_or(entries.len());
    Value::Array(
        entries
            .iter()
            .take(shown)
            .enumerate()
            .map(|(index, entry)| {
                json!({
                    "rank": index + 1,
                    "username": entry.username,
                    "q1": entry.qubit_a,
                    "q2": entry.qubit_b,
                    "score": entry.score,
                })
            })
            .collect(),
    )
}

/// JSON form of a histogram, keeping label order.
pub fn histogram_json(result: &ScoredResult) -> Value {
    Value::Array(
        result
            .histogram
            .iter()
            .map(|(label, count)| json!({ "outcome": label, "count": count }))
            .collect(),
    )
}
