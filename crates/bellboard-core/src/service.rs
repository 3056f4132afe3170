//! Backend-facing traits.
//!
//! The remote execution service is opaque; the client only relies on three
//! interfaces:
//!
//! | Trait | Wire form | Returns |
//! |-------|-----------|---------|
//! | [`SubmissionService`] | `POST /submit {username, q1, q2}` | `{task_id}` |
//! | [`StatusTransport`] | real-time channel per `task_id` | text frames |
//! | [`LeaderboardSource`] | `GET /leaderboard` | `[{username, q1, q2, result}]` |
//!
//! All traits are `Send + Sync` so adapters can be shared behind `Arc` and
//! replaced by in-memory doubles in tests.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::{ChannelError, FetchError, SubmissionError};
use crate::job::{JobId, SubmissionRequest};
use crate::leaderboard::LeaderboardRecord;

/// Raw text frames from a status channel, in arrival order.
///
/// The stream ends when the remote side closes the channel.
pub type FrameStream = BoxStream<'static, Result<String, ChannelError>>;

/// Submission endpoint.
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Submit a request and return the job identifier issued by the backend.
    async fn submit(&self, request: &SubmissionRequest) -> Result<JobId, SubmissionError>;
}

/// Leaderboard listing endpoint.
#[async_trait]
pub trait LeaderboardSource: Send + Sync {
    /// Fetch all historical submissions in source order.
    async fn list(&self) -> Result<Vec<LeaderboardRecord>, FetchError>;
}

/// Real-time status channel.
#[async_trait]
pub trait StatusTransport: Send + Sync {
    /// Open the channel addressed by `job_id`.
    async fn connect(&self, job_id: &JobId) -> Result<FrameStream, ChannelError>;
}
