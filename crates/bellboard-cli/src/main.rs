//! Bellboard Command-Line Interface
//!
//! Submit a Bell-pair job, follow it to completion and see where it lands on
//! the leaderboard.
//!
//! ```text
//! bellboard submit --username alice --q1 0 --q2 1
//! bellboard leaderboard --limit 10
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use bellboard_cli::cli::{Cli, Commands, log_filter};
use bellboard_cli::commands::{common, leaderboard, submit};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(cli.verbose)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match common::load_config(cli.endpoint.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Submit {
                username,
                q1,
                q2,
                format,
            } => submit::execute(&config, &username, q1, q2, &format).await,
            Commands::Leaderboard { limit, format } => {
                leaderboard::execute(&config, limit, &format).await
            }
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
