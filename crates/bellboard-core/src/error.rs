//! Error taxonomy for the job lifecycle.
//!
//! Each kind stops progress for a different reason and is surfaced to the
//! user differently:
//!
//! | Error | Raised by | Effect |
//! |-------|-----------|--------|
//! | [`ValidationError`] | local precondition | username flag, no network call |
//! | [`SubmissionError`] | submission endpoint | job phase `Errored` |
//! | [`ChannelError`] | status channel | job phase `Errored` |
//! | [`DecodeError`] | one status frame | logged, frame dropped |
//! | [`FetchError`] | leaderboard listing | logged, stale entries kept |
//!
//! Payloads are plain strings so adapters convert their transport errors at
//! the boundary and this crate stays free of network dependencies.

use thiserror::Error;

/// Maximum number of characters of a rejected frame kept in a [`DecodeError`].
const FRAME_EXCERPT_LEN: usize = 120;

/// Local precondition failure. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Username is empty after trimming whitespace.
    #[error("Username is required")]
    EmptyUsername,
}

/// The backend rejected the submission or could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Backend answered with a non-success status.
    #[error("Submission rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Backend could not be reached.
    #[error("Submission endpoint unreachable: {0}")]
    Unreachable(String),

    /// Backend answered but without a usable task id.
    #[error("Malformed submission response: {0}")]
    MalformedResponse(String),
}

/// The status channel failed before delivering a terminal event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Connection could not be established.
    #[error("Status channel connection failed: {0}")]
    Connect(String),

    /// Connection broke while open.
    #[error("Status channel transport error: {0}")]
    Transport(String),

    /// Remote side closed the channel before the job was done.
    #[error("Status channel closed before the job finished")]
    ClosedBeforeDone,
}

/// A single status frame could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed status frame ({reason}): {frame}")]
pub struct DecodeError {
    /// Why decoding failed.
    pub reason: String,
    /// Leading part of the offending frame.
    pub frame: String,
}

impl DecodeError {
    /// Build a decode error, keeping only an excerpt of the frame.
    pub fn new(reason: impl Into<String>, frame: &str) -> Self {
        let frame = match frame.char_indices().nth(FRAME_EXCERPT_LEN) {
            Some((cut, _)) => format!("{}...", &frame[..cut]),
            None => frame.to_string(),
        };
        Self {
            reason: reason.into(),
            frame,
        }
    }
}

/// The leaderboard listing could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Listing endpoint could not be reached.
    #[error("Leaderboard unreachable: {0}")]
    Unreachable(String),

    /// Listing endpoint answered with a non-success status.
    #[error("Leaderboard request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Listing body was not a sequence of entries.
    #[error("Malformed leaderboard response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        assert_eq!(
            ValidationError::EmptyUsername.to_string(),
            "Username is required"
        );
    }

    #[test]
    fn test_submission_rejected_display() {
        let err = SubmissionError::Rejected {
            status: 422,
            message: "q1 missing".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("422"));
        assert!(msg.contains("q1 missing"));
    }

    #[test]
    fn test_channel_closed_display() {
        assert!(
            ChannelError::ClosedBeforeDone
                .to_string()
                .contains("before the job finished")
        );
    }

    #[test]
    fn test_decode_error_keeps_short_frame() {
        let err = DecodeError::new("unknown status", r#"{"status":"lost"}"#);
        assert_eq!(err.frame, r#"{"status":"lost"}"#);
        assert!(err.to_string().contains("unknown status"));
    }

    #[test]
    fn test_decode_error_truncates_long_frame() {
        let frame = "x".repeat(500);
        let err = DecodeError::new("not json", &frame);
        assert_eq!(err.frame.len(), FRAME_EXCERPT_LEN + 3);
        assert!(err.frame.ends_with("..."));
    }

    #[test]
    fn test_decode_error_truncates_on_char_boundary() {
        let frame = "é".repeat(200);
        let err = DecodeError::new("not json", &frame);
        assert_eq!(err.frame.chars().count(), FRAME_EXCERPT_LEN + 3);
    }

    #[test]
    fn test_fetch_status_display() {
        let err = FetchError::Status {
            status: 503,
            message: "down".into(),
        };
        assert!(err.to_string().contains("503"));
    }
}
