//! Bellboard core: job model, result scoring and the client-side lifecycle
//! state machine.
//!
//! A user submits a two-qubit Bell-state circuit to a remote execution
//! service, watches it move through the service's pipeline and finally gets a
//! measurement histogram back. This crate holds everything about that flow
//! that does not touch the network:
//!
//! - The wire-facing data model ([`SubmissionRequest`], [`JobStatusEvent`],
//!   [`LeaderboardRecord`])
//! - The scorer ([`compute_score`], [`to_display_sequence`])
//! - The observable job state ([`UiJobState`]) and its transitions
//! - Leaderboard ranking ([`rank`])
//! - The error taxonomy shared by every adapter
//! - The backend-facing traits ([`SubmissionService`], [`LeaderboardSource`],
//!   [`StatusTransport`])
//!
//! # Example: Scoring a Result
//!
//! ```
//! use bellboard_core::{Counts, compute_score, to_display_sequence};
//!
//! let counts: Counts = [("11", 5), ("00", 3), ("01", 1)].into_iter().collect();
//!
//! assert_eq!(compute_score(&counts), 8);
//! assert_eq!(
//!     to_display_sequence(&counts),
//!     vec![("00".to_string(), 3), ("01".to_string(), 1), ("11".to_string(), 5)],
//! );
//! ```
//!
//! # Implementing a Transport
//!
//! ```ignore
//! use async_trait::async_trait;
//! use bellboard_core::{ChannelError, FrameStream, JobId, StatusTransport};
//! use futures::StreamExt;
//!
//! struct Replay(Vec<String>);
//!
//! #[async_trait]
//! impl StatusTransport for Replay {
//!     async fn connect(&self, _job_id: &JobId) -> Result<FrameStream, ChannelError> {
//!         Ok(futures::stream::iter(self.0.clone().into_iter().map(Ok)).boxed())
//!     }
//! }
//! ```

pub mod counts;
pub mod error;
pub mod event;
pub mod job;
pub mod leaderboard;
pub mod score;
pub mod service;
pub mod state;

pub use counts::Counts;
pub use error::{ChannelError, DecodeError, FetchError, SubmissionError, ValidationError};
pub use event::{ImageRef, JobStatusEvent};
pub use job::{JobHandle, JobId, MAX_QUBIT_INDEX, SubmissionRequest};
pub use leaderboard::{LeaderboardEntry, LeaderboardRecord, rank};
pub use score::{CORRELATED_OUTCOMES, ScoredResult, compute_score, to_display_sequence};
pub use service::{FrameStream, LeaderboardSource, StatusTransport, SubmissionService};
pub use state::{JobFailure, Phase, UiJobState};
