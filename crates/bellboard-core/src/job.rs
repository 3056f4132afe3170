//! Submission and job identity types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Highest physical qubit index on the target device.
///
/// Advisory only: requests outside `0..=MAX_QUBIT_INDEX` are still sent and
/// left to the backend to reject.
pub const MAX_QUBIT_INDEX: u32 = 53;

/// Opaque job identifier issued by the submission endpoint (`task_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A request to run the Bell circuit on a pair of physical qubits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    /// Name shown on the leaderboard.
    pub username: String,
    /// First physical qubit.
    #[serde(rename = "q1")]
    pub qubit_a: u32,
    /// Second physical qubit.
    #[serde(rename = "q2")]
    pub qubit_b: u32,
}

impl SubmissionRequest {
    /// Create a new request.
    pub fn new(username: impl Into<String>, qubit_a: u32, qubit_b: u32) -> Self {
        Self {
            username: username.into(),
            qubit_a,
            qubit_b,
        }
    }

    /// Check local preconditions. Only the username is enforced.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        Ok(())
    }

    /// Check if both qubit indices fall inside the advisory device range.
    pub fn within_device_bounds(&self) -> bool {
        self.qubit_a <= MAX_QUBIT_INDEX && self.qubit_b <= MAX_QUBIT_INDEX
    }
}

/// An accepted submission, alive until its status channel closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    /// The job identifier.
    pub job_id: JobId,
    /// Time the backend accepted the job.
    pub submitted_at: DateTime<Utc>,
}

impl JobHandle {
    /// Create a handle stamped with the current time.
    pub fn new(job_id: impl Into<JobId>) -> Self {
        Self {
            job_id: job_id.into(),
            submitted_at: Utc::now(),
        }
    }

    /// Time since the job was accepted.
    pub fn elapsed(&self) -> Duration {
        Utc::now() - self.submitted_at
    }
}
