//! Bellboard job lifecycle client.
//!
//! Submits Bell-state jobs, follows them over a per-job WebSocket status
//! channel and keeps a ranked leaderboard up to date.
//!
//! # Overview
//!
//! - [`JobLifecycleController`] drives one submission at a time and owns the
//!   observable [`UiJobState`](bellboard_core::UiJobState)
//! - [`JobChannel`] turns a transport's frames into ordered [`ChannelUpdate`]s
//! - [`LeaderboardStore`] fetches, scores and ranks past submissions
//! - [`HttpBackend`] and [`WsStatusTransport`] talk to the real backend
//!
//! # Example
//!
//! ```ignore
//! use bellboard_client::{ClientConfig, JobLifecycleController};
//! use bellboard_core::SubmissionRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::load(None)?;
//!     let mut controller = JobLifecycleController::from_config(&config)?;
//!     controller.start().await;
//!
//!     controller.submit(SubmissionRequest::new("alice", 0, 1)).await?;
//!     let state = controller.run_to_completion().await;
//!     if let Some(result) = &state.result {
//!         println!("score {}", result.score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod store;
pub mod ws;

pub use channel::{ChannelState, ChannelUpdate, JobChannel};
pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use controller::{JobLifecycleController, SubmitOutcome};
pub use error::{ClientError, ClientResult};
pub use http::HttpBackend;
pub use store::{LeaderboardSnapshot, LeaderboardStore};
pub use ws::WsStatusTransport;
