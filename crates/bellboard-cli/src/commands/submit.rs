//! Submit command implementation.
//!
//! Submits a Bell pair, follows the status channel with a spinner, then prints
//! the histogram and the refreshed leaderboard.

use anyhow::Result;
use console::style;
use serde_json::json;

use bellboard_client::{ClientConfig, JobLifecycleController, SubmitOutcome};
use bellboard_core::{ImageRef, Phase, SubmissionRequest};

use super::common::{histogram_json, leaderboard_json, print_histogram, print_leaderboard, spinner};

/// Execute the submit command.
pub async fn execute(
    config: &ClientConfig,
    username: &str,
    q1: u32,
    q2: u32,
    format: &str,
) -> Result<()> {
    let json_output = format == "json";
    let mut controller = JobLifecycleController::from_config(config)?;

    if !json_output {
        println!(
            "{} Submitting Bell pair ({}, {}) for {} to {}",
            style("→").cyan().bold(),
            q1,
            q2,
            style(username).green(),
            style(&config.endpoint).dim()
        );
    }

    controller.start().await;

    let progress = spinner(json_output)?;
    progress.set_message("Submitting...");

    let outcome = match controller
        .submit(SubmissionRequest::new(username, q1, q2))
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            progress.finish_and_clear();
            return Err(e.into());
        }
    };

    let job_id = match outcome {
        SubmitOutcome::Accepted(job_id) => job_id,
        SubmitOutcome::Ignored => {
            progress.finish_and_clear();
            anyhow::bail!("A job is already in flight");
        }
        SubmitOutcome::Failed => {
            progress.finish_and_clear();
            anyhow::bail!("{}", controller.state().status_line());
        }
    };
    progress.set_message(format!("{} (job {job_id})", controller.state().status_line()));

    let mut shown_image: Option<ImageRef> = None;
    while let Some(phase) = controller.next_transition().await {
        let state = controller.state();
        progress.set_message(format!("{} (job {job_id})", state.status_line()));

        if phase == Phase::Transpiled && state.circuit_image != shown_image {
            if let Some(image) = &state.circuit_image {
                progress.println(format!("  Circuit image: {}", style(&image.0).cyan()));
            }
            shown_image = state.circuit_image.clone();
        }
    }
    progress.finish_and_clear();

    let state = controller.state().clone();
    if state.phase == Phase::Errored {
        anyhow::bail!("{}", state.status_line());
    }
    let Some(result) = state.result.as_ref() else {
        anyhow::bail!("Job {job_id} ended in phase {} without a result", state.phase);
    };

    controller.wait_for_refresh().await;
    let entries = controller.leaderboard().entries().await;
    controller.close();

    if json_output {
        let report = json!({
            "job_id": job_id,
            "phase": state.phase,
            "circuit_image": state.circuit_image,
            "histogram": histogram_json(result),
            "score": result.score,
            "leaderboard": leaderboard_json(&entries, None),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} (job {})",
        style("✓").green().bold(),
        state.status_line(),
        style(&job_id).dim()
    );
    print_histogram(result);

    println!("\n{} Leaderboard:", style("→").cyan().bold());
    print_leaderboard(&entries, None, Some(username));

    Ok(())
}
