//! Observable job state.
//!
//! The state machine owned by the lifecycle controller:
//!
//! ```text
//!   Idle ──→ Submitting ──→ Queued ──→ Transpiled ──→ Done
//!              │              │            │
//!              └──────────────┴────────────┴──→ Errored
//! ```
//!
//! **Invariants:**
//! - A new submission is only accepted from `Idle`, `Done` or `Errored`.
//! - Phases never move backward within one submission.
//! - `result` is only set in `Done`; `circuit_image` survives into `Done`.
//! - `begin_submission()` is the only reset point.

use serde::{Deserialize, Serialize};

use crate::error::{ChannelError, SubmissionError};
use crate::event::{ImageRef, JobStatusEvent};
use crate::job::JobId;
use crate::score::ScoredResult;

/// Coarse lifecycle stage of the current job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing submitted yet.
    Idle,
    /// Waiting for the submission endpoint.
    Submitting,
    /// Accepted by the backend, waiting in its queue.
    Queued,
    /// Circuit transpiled for the device.
    Transpiled,
    /// Result received.
    Done,
    /// Submission or channel failed.
    Errored,
}

impl Phase {
    /// Check if a new submission may start from this phase.
    pub fn accepts_submission(self) -> bool {
        matches!(self, Phase::Idle | Phase::Done | Phase::Errored)
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Errored)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "Idle",
            Phase::Submitting => "Submitting",
            Phase::Queued => "Queued",
            Phase::Transpiled => "Transpiled",
            Phase::Done => "Done",
            Phase::Errored => "Errored",
        };
        f.write_str(name)
    }
}

/// Why the current job stopped in `Errored`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobFailure {
    /// The submission endpoint rejected the request or was unreachable.
    Submission(SubmissionError),
    /// The status channel for `job_id` failed before `Done`.
    Channel {
        /// Job whose channel failed.
        job_id: JobId,
        /// What went wrong.
        error: ChannelError,
    },
}

/// Everything the presentation layer needs about the current job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiJobState {
    /// Current lifecycle stage.
    pub phase: Phase,
    /// Circuit diagram from the `transpiled` event.
    pub circuit_image: Option<ImageRef>,
    /// Sorted histogram and score, set on `Done`.
    pub result: Option<ScoredResult>,
    /// Failure detail, set on `Errored`.
    pub failure: Option<JobFailure>,
}

impl Default for UiJobState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiJobState {
    /// Create an idle state.
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            circuit_image: None,
            result: None,
            failure: None,
        }
    }

    /// Check if a job is in flight (the "loading" indicator).
    pub fn is_busy(&self) -> bool {
        !self.phase.accepts_submission()
    }

    /// Reset for a new submission.
    pub fn begin_submission(&mut self) {
        *self = Self {
            phase: Phase::Submitting,
            ..Self::new()
        };
    }

    /// The backend accepted the submission.
    pub fn submission_accepted(&mut self) {
        if self.phase == Phase::Submitting {
            self.phase = Phase::Queued;
        }
    }

    /// The backend rejected the submission.
    pub fn submission_failed(&mut self, error: SubmissionError) {
        self.phase = Phase::Errored;
        self.failure = Some(JobFailure::Submission(error));
    }

    /// Apply one status event. Returns true if the state changed.
    pub fn apply_event(&mut self, event: &JobStatusEvent) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        match event {
            JobStatusEvent::Queued => {
                if self.phase < Phase::Queued {
                    self.phase = Phase::Queued;
                    return true;
                }
                false
            }
            JobStatusEvent::Transpiled { image } => {
                self.phase = Phase::Transpiled;
                if let Some(image) = image {
                    self.circuit_image = Some(image.clone());
                }
                true
            }
            JobStatusEvent::Done { result } => {
                self.phase = Phase::Done;
                self.result = Some(ScoredResult::from_counts(result));
                true
            }
        }
    }

    /// The status channel failed. Ignored once the job is terminal.
    pub fn channel_failed(&mut self, job_id: JobId, error: ChannelError) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = Phase::Errored;
        self.result = None;
        self.failure = Some(JobFailure::Channel { job_id, error });
    }

    /// Human-readable status, one distinct line per phase and failure kind.
    pub fn status_line(&self) -> String {
        match self.phase {
            Phase::Idle => String::new(),
            Phase::Submitting => "Submitting...".to_string(),
            Phase::Queued => "Your job is queued...".to_string(),
            Phase::Transpiled => "Circuit transpiled".to_string(),
            Phase::Done => "Done!".to_string(),
            Phase::Errored => match &self.failure {
                Some(JobFailure::Submission(error)) => format!("Error submitting job: {error}"),
                Some(JobFailure::Channel { job_id, error }) => {
                    format!("Connection to job {job_id} lost: {error}")
                }
                None => "Error".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counts::Counts;

    fn submitted() -> UiJobState {
        let mut state = UiJobState::new();
        state.begin_submission();
        state.submission_accepted();
        state
    }

    #[test]
    fn test_accepts_submission() {
        assert!(Phase::Idle.accepts_submission());
        assert!(Phase::Done.accepts_submission());
        assert!(Phase::Errored.accepts_submission());
        assert!(!Phase::Submitting.accepts_submission());
        assert!(!Phase::Queued.accepts_submission());
        assert!(!Phase::Transpiled.accepts_submission());
    }

    #[test]
    fn test_full_sequence() {
        let mut state = submitted();
        assert_eq!(state.phase, Phase::Queued);

        state.apply_event(&JobStatusEvent::Queued);
        state.apply_event(&JobStatusEvent::Transpiled {
            image: Some(ImageRef::new("X")),
        });
        let result: Counts = [("00", 3), ("11", 5), ("01", 1)].into_iter().collect();
        state.apply_event(&JobStatusEvent::Done { result });

        assert_eq!(state.phase, Phase::Done);
        assert_eq!(state.circuit_image, Some(ImageRef::new("X")));
        let scored = state.result.as_ref().unwrap();
        assert_eq!(scored.score, 8);
        assert_eq!(
            scored.histogram,
            vec![
                ("00".to_string(), 3),
                ("01".to_string(), 1),
                ("11".to_string(), 5)
            ]
        );
        assert_eq!(state.status_line(), "Done!");
        assert!(!state.is_busy());
    }

    #[test]
    fn test_transpiled_without_image_keeps_previous() {
        let mut state = submitted();
        state.apply_event(&JobStatusEvent::Transpiled {
            image: Some(ImageRef::new("first")),
        });
        state.apply_event(&JobStatusEvent::Transpiled { image: None });
        assert_eq!(state.circuit_image, Some(ImageRef::new("first")));
    }

    #[test]
    fn test_late_queued_does_not_regress() {
        let mut state = submitted();
        state.apply_event(&JobStatusEvent::Transpiled { image: None });
        assert!(!state.apply_event(&JobStatusEvent::Queued));
        assert_eq!(state.phase, Phase::Transpiled);
    }

    #[test]
    fn test_events_after_done_ignored() {
        let mut state = submitted();
        state.apply_event(&JobStatusEvent::Done {
            result: Counts::new(),
        });
        assert!(!state.apply_event(&JobStatusEvent::Transpiled {
            image: Some(ImageRef::new("late"))
        }));
        assert_eq!(state.phase, Phase::Done);
        assert!(state.circuit_image.is_none());
    }

    #[test]
    fn test_channel_failure_before_done() {
        let mut state = submitted();
        state.channel_failed(JobId::new("j1"), ChannelError::ClosedBeforeDone);
        assert_eq!(state.phase, Phase::Errored);
        assert!(state.result.is_none());
        assert!(state.status_line().starts_with("Connection to job j1 lost"));
    }

    #[test]
    fn test_channel_failure_after_done_ignored() {
        let mut state = submitted();
        state.apply_event(&JobStatusEvent::Done {
            result: Counts::new(),
        });
        state.channel_failed(JobId::new("j1"), ChannelError::ClosedBeforeDone);
        assert_eq!(state.phase, Phase::Done);
    }

    #[test]
    fn test_submission_failure() {
        let mut state = UiJobState::new();
        state.begin_submission();
        state.submission_failed(SubmissionError::Unreachable("refused".into()));
        assert_eq!(state.phase, Phase::Errored);
        assert!(state.status_line().starts_with("Error submitting job"));
    }

    #[test]
    fn test_begin_submission_resets() {
        let mut state = submitted();
        state.apply_event(&JobStatusEvent::Transpiled {
            image: Some(ImageRef::new("old")),
        });
        state.apply_event(&JobStatusEvent::Done {
            result: Counts::new(),
        });
        state.begin_submission();
        assert_eq!(state.phase, Phase::Submitting);
        assert!(state.circuit_image.is_none());
        assert!(state.result.is_none());
        assert!(state.failure.is_none());
        assert!(state.is_busy());
    }

    #[test]
    fn test_status_lines_distinct() {
        let mut lines = vec![UiJobState::new().status_line()];
        let mut state = UiJobState::new();
        state.begin_submission();
        lines.push(state.status_line());
        state.submission_accepted();
        lines.push(state.status_line());
        state.apply_event(&JobStatusEvent::Transpiled { image: None });
        lines.push(state.status_line());
        state.apply_event(&JobStatusEvent::Done {
            result: Counts::new(),
        });
        lines.push(state.status_line());
        let unique: std::collections::HashSet<_> = lines.iter().collect();
        assert_eq!(unique.len(), lines.len());
    }
}
