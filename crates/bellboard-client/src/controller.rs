//! End-to-end driver for one submission at a time.
//!
//! The controller owns the [`UiJobState`] and is the only thing that mutates
//! it. A submission goes through:
//!
//! 1. local validation (username) - failure sets the username flag, nothing else
//! 2. the reentrancy guard - a job in flight turns `submit` into a no-op
//! 3. the submission call - failure ends in `Errored`
//! 4. a [`JobChannel`] for the issued job id, pumped with [`JobLifecycleController::next_transition`]
//!
//! When the job reaches `Done` a leaderboard refresh is spawned in the
//! background; its outcome never changes the job phase.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use bellboard_core::{
    ChannelError, JobHandle, JobId, LeaderboardSource, MAX_QUBIT_INDEX, Phase, StatusTransport,
    SubmissionRequest, SubmissionService, UiJobState, ValidationError,
};

use crate::channel::{ChannelState, ChannelUpdate, JobChannel};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::HttpBackend;
use crate::store::LeaderboardStore;
use crate::ws::WsStatusTransport;

/// Result of a [`JobLifecycleController::submit`] call that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Backend issued a job id and its status channel is opening.
    Accepted(JobId),
    /// A job is already in flight; nothing changed.
    Ignored,
    /// Backend rejected the request; the state is `Errored`.
    Failed,
}

/// Drives submissions through their lifecycle.
pub struct JobLifecycleController {
    submissions: Arc<dyn SubmissionService>,
    transport: Arc<dyn StatusTransport>,
    leaderboard: LeaderboardStore,
    state: UiJobState,
    username_invalid: bool,
    job: Option<JobHandle>,
    channel: Option<JobChannel>,
    refresh: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for JobLifecycleController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobLifecycleController")
            .field("state", &self.state)
            .field("username_invalid", &self.username_invalid)
            .field("job", &self.job)
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

impl JobLifecycleController {
    /// Create a controller over explicit adapters.
    pub fn new(
        submissions: Arc<dyn SubmissionService>,
        transport: Arc<dyn StatusTransport>,
        leaderboard: LeaderboardStore,
    ) -> Self {
        Self {
            submissions,
            transport,
            leaderboard,
            state: UiJobState::new(),
            username_invalid: false,
            job: None,
            channel: None,
            refresh: None,
        }
    }

    /// Create a controller talking HTTP and WebSocket to the configured backend.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let http = Arc::new(HttpBackend::new(config)?);
        let transport = Arc::new(WsStatusTransport::from_config(config));
        let leaderboard = LeaderboardStore::new(Arc::clone(&http) as Arc<dyn LeaderboardSource>);
        Ok(Self::new(http, transport, leaderboard))
    }

    /// Initial leaderboard load. A failure is logged and leaves the board empty.
    pub async fn start(&self) {
        let _ = self.leaderboard.refresh().await;
    }

    /// Current job state.
    pub fn state(&self) -> &UiJobState {
        &self.state
    }

    /// The leaderboard this controller refreshes.
    pub fn leaderboard(&self) -> &LeaderboardStore {
        &self.leaderboard
    }

    /// Check if the last submit was rejected for an empty username.
    pub fn username_invalid(&self) -> bool {
        self.username_invalid
    }

    /// Clear the username flag once the user types something non-blank.
    pub fn on_username_changed(&mut self, value: &str) {
        if !value.trim().is_empty() {
            self.username_invalid = false;
        }
    }

    /// The accepted job, while its channel is alive.
    pub fn job(&self) -> Option<&JobHandle> {
        self.job.as_ref()
    }

    /// State of the current status channel, if one is alive.
    pub fn channel_state(&self) -> Option<ChannelState> {
        self.channel.as_ref().map(JobChannel::state)
    }

    /// Submit a request.
    ///
    /// Returns `Err` only for local validation failures, which never touch
    /// an in-flight job. Backend failures are reported through the state.
    pub async fn submit(
        &mut self,
        request: SubmissionRequest,
    ) -> Result<SubmitOutcome, ValidationError> {
        if let Err(err) = request.validate() {
            warn!("Submission not sent: {err}");
            self.username_invalid = true;
            return Err(err);
        }

        if !self.state.phase.accepts_submission() {
            debug!(
                "Submission ignored, job already in flight (phase {})",
                self.state.phase
            );
            return Ok(SubmitOutcome::Ignored);
        }
        self.username_invalid = false;

        if !request.within_device_bounds() {
            warn!(
                "Qubit pair ({}, {}) outside 0..={MAX_QUBIT_INDEX}, leaving it to the backend",
                request.qubit_a, request.qubit_b
            );
        }

        self.release_channel();
        self.state.begin_submission();

        match self.submissions.submit(&request).await {
            Ok(job_id) => {
                info!(
                    "Job {job_id} accepted for {} on qubits ({}, {})",
                    request.username, request.qubit_a, request.qubit_b
                );
                self.state.submission_accepted();
                self.channel = Some(JobChannel::open(
                    Arc::clone(&self.transport),
                    job_id.clone(),
                ));
                self.job = Some(JobHandle::new(job_id.clone()));
                Ok(SubmitOutcome::Accepted(job_id))
            }
            Err(err) => {
                error!("Submission failed: {err}");
                self.state.submission_failed(err);
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    /// Wait for and apply the next channel update.
    ///
    /// Returns the phase after the update, or `None` when no channel is alive.
    pub async fn next_transition(&mut self) -> Option<Phase> {
        let update = self.channel.as_mut()?.next().await;
        match update {
            Some(update) => self.apply(update),
            None => self.release_channel(),
        }
        Some(self.state.phase)
    }

    /// Pump the channel until the job is done or failed.
    pub async fn run_to_completion(&mut self) -> &UiJobState {
        while self.next_transition().await.is_some() {}
        &self.state
    }

    /// Wait for a pending post-completion leaderboard refresh, if any.
    pub async fn wait_for_refresh(&mut self) {
        if let Some(refresh) = self.refresh.take() {
            let _ = refresh.await;
        }
    }

    /// Tear down: release the status channel. Idempotent.
    ///
    /// A job still in flight ends `Errored` with
    /// [`ChannelError::ClosedBeforeDone`], so the controller accepts the
    /// next submission.
    pub fn close(&mut self) {
        if self.channel.is_some() && !self.state.phase.is_terminal() {
            let job_id = self.current_job_id();
            warn!("Job {job_id}: status channel closed before completion");
            self.state
                .channel_failed(job_id, ChannelError::ClosedBeforeDone);
        }
        self.release_channel();
    }

    fn apply(&mut self, update: ChannelUpdate) {
        let job_id = self.current_job_id();

        match update {
            ChannelUpdate::Event(event) => {
                if !self.state.apply_event(&event) {
                    debug!("Job {job_id}: '{}' event left phase unchanged", event.name());
                }
                if event.is_terminal() {
                    let score = self.state.result.as_ref().map_or(0, |r| r.score);
                    match &self.job {
                        Some(job) => info!(
                            "Job {job_id} done in {}s, score {score}",
                            job.elapsed().num_seconds()
                        ),
                        None => info!("Job {job_id} done, score {score}"),
                    }
                    self.release_channel();
                    self.spawn_refresh();
                }
            }
            ChannelUpdate::Malformed(err) => {
                debug!("Job {job_id}: dropped frame ({})", err.reason);
            }
            ChannelUpdate::Failed(err) => {
                error!("Job {job_id}: {err}");
                self.state.channel_failed(job_id, err);
                self.release_channel();
            }
        }
    }

    fn current_job_id(&self) -> JobId {
        self.job
            .as_ref()
            .map(|job| job.job_id.clone())
            .unwrap_or_else(|| JobId::new("unknown"))
    }

    fn spawn_refresh(&mut self) {
        let store = self.leaderboard.clone();
        self.refresh = Some(tokio::spawn(async move {
            let _ = store.refresh().await;
        }));
    }

    fn release_channel(&mut self) {
        if let Some(mut channel) = self.channel.take() {
            channel.close();
        }
        self.job = None;
    }
}
