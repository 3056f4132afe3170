//! In-memory doubles for the three backend interfaces.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;
use futures::channel::mpsc;

use bellboard_client::{JobLifecycleController, LeaderboardStore};
use bellboard_core::{
    ChannelError, FetchError, FrameStream, JobId, LeaderboardRecord, LeaderboardSource,
    StatusTransport, SubmissionError, SubmissionRequest, SubmissionService,
};

pub const QUEUED: &str = r#"{"status":"queued"}"#;

pub fn transpiled(image: &str) -> String {
    format!(r#"{{"status":"transpiled","image":"{image}"}}"#)
}

pub fn done(result: &str) -> String {
    format!(r#"{{"status":"done","result":{result}}}"#)
}

// ============================================================================
// Submission
// ============================================================================

#[derive(Default)]
pub struct FakeSubmissions {
    responses: Mutex<VecDeque<Result<JobId, SubmissionError>>>,
    calls: Mutex<Vec<SubmissionRequest>>,
}

impl FakeSubmissions {
    pub fn accepting(ids: &[&str]) -> Arc<Self> {
        let fake = Self::default();
        for id in ids {
            fake.responses
                .lock()
                .unwrap()
                .push_back(Ok(JobId::new(*id)));
        }
        Arc::new(fake)
    }

    pub fn failing(error: SubmissionError) -> Arc<Self> {
        let fake = Self::default();
        fake.responses.lock().unwrap().push_back(Err(error));
        Arc::new(fake)
    }

    pub fn calls(&self) -> Vec<SubmissionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionService for FakeSubmissions {
    async fn submit(&self, request: &SubmissionRequest) -> Result<JobId, SubmissionError> {
        self.calls.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SubmissionError::Unreachable("no scripted response".into())))
    }
}

// ============================================================================
// Status channel
// ============================================================================

pub type LiveSender = mpsc::UnboundedSender<Result<String, ChannelError>>;

#[derive(Default)]
pub struct FakeTransport {
    script: Mutex<VecDeque<Result<FrameStream, ChannelError>>>,
    connects: Mutex<Vec<JobId>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Next connection delivers `frames` and then ends.
    pub fn push_frames<S: AsRef<str>>(&self, frames: &[S]) {
        let frames: Vec<Result<String, ChannelError>> =
            frames.iter().map(|f| Ok(f.as_ref().to_string())).collect();
        self.push_stream(futures::stream::iter(frames).boxed());
    }

    /// Next connection delivers `frames` and then stays open.
    pub fn push_open<S: AsRef<str>>(&self, frames: &[S]) {
        let frames: Vec<Result<String, ChannelError>> =
            frames.iter().map(|f| Ok(f.as_ref().to_string())).collect();
        self.push_stream(
            futures::stream::iter(frames)
                .chain(futures::stream::pending())
                .boxed(),
        );
    }

    /// Next connection is fed by the returned sender; dropping it ends the stream.
    pub fn push_live(&self) -> LiveSender {
        let (tx, rx) = mpsc::unbounded();
        self.push_stream(rx.boxed());
        tx
    }

    /// Next connection attempt fails.
    pub fn push_refusal(&self, error: ChannelError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    pub fn connects(&self) -> Vec<JobId> {
        self.connects.lock().unwrap().clone()
    }

    fn push_stream(&self, stream: FrameStream) {
        self.script.lock().unwrap().push_back(Ok(stream));
    }
}

#[async_trait]
impl StatusTransport for FakeTransport {
    async fn connect(&self, job_id: &JobId) -> Result<FrameStream, ChannelError> {
        self.connects.lock().unwrap().push(job_id.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChannelError::Connect("no scripted stream".into())))
    }
}

// ============================================================================
// Leaderboard listing
// ============================================================================

#[derive(Default)]
pub struct FakeListing {
    responses: Mutex<VecDeque<Result<Vec<LeaderboardRecord>, FetchError>>>,
    calls: Mutex<usize>,
}

impl FakeListing {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, response: Result<Vec<LeaderboardRecord>, FetchError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl LeaderboardSource for FakeListing {
    async fn list(&self) -> Result<Vec<LeaderboardRecord>, FetchError> {
        *self.calls.lock().unwrap() += 1;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn record(username: &str, qubits: (u32, u32), result: &[(&str, u64)]) -> LeaderboardRecord {
    LeaderboardRecord {
        username: username.to_string(),
        qubit_a: qubits.0,
        qubit_b: qubits.1,
        result: result.iter().map(|(l, c)| (*l, *c)).collect(),
    }
}

// ============================================================================
// Wiring
// ============================================================================

pub struct Harness {
    pub controller: JobLifecycleController,
    pub submissions: Arc<FakeSubmissions>,
    pub transport: Arc<FakeTransport>,
    pub listing: Arc<FakeListing>,
}

pub fn harness(submissions: Arc<FakeSubmissions>) -> Harness {
    let transport = FakeTransport::new();
    let listing = FakeListing::new();
    let controller = JobLifecycleController::new(
        submissions.clone(),
        transport.clone(),
        LeaderboardStore::new(listing.clone()),
    );
    Harness {
        controller,
        submissions,
        transport,
        listing,
    }
}
