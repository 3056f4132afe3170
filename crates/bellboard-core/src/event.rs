//! Status frames delivered over a job's real-time channel.
//!
//! Wire shapes (JSON text frames):
//!
//! ```text
//!   {"status": "queued"}
//!   {"status": "transpiled", "image": "<image-reference>"}   image optional
//!   {"status": "done", "result": {"00": 510, "11": 514}}
//! ```
//!
//! Anything else is a [`DecodeError`]. Unknown extra fields are ignored.

use serde::{Deserialize, Serialize};

use crate::counts::Counts;
use crate::error::DecodeError;

/// Reference to a rendered circuit diagram (URL or data URI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    /// Create an image reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One decoded status event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatusEvent {
    /// Job accepted into the backend queue.
    Queued,
    /// Circuit transpiled for the device.
    Transpiled {
        /// Rendered circuit, if the backend produced one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<ImageRef>,
    },
    /// Job finished. Terminal.
    Done {
        /// Measurement histogram.
        result: Counts,
    },
}

impl JobStatusEvent {
    /// Decode a text frame.
    pub fn decode(frame: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(frame).map_err(|e| DecodeError::new(e.to_string(), frame))
    }

    /// Check if this event ends the job.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatusEvent::Done { .. })
    }

    /// Wire name of the status.
    pub fn name(&self) -> &'static str {
        match self {
            JobStatusEvent::Queued => "queued",
            JobStatusEvent::Transpiled { .. } => "transpiled",
            JobStatusEvent::Done { .. } => "done",
        }
    }
}
