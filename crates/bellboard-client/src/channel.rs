//! Per-job real-time status channel.
//!
//! ```text
//!   open() ──→ Connecting ──→ Open ──┬──→ Open        (queued / transpiled)
//!                  │                 ├──→ Closed      (done, self-closing)
//!                  └─────────────────┴──→ Closed      (transport error / abrupt close)
//! ```
//!
//! A reader task owns the transport stream and forwards raw frames through a
//! bounded queue; decoding and state changes happen on the consumer side, in
//! arrival order. `Closed` is terminal: closing drops the queue, so frames
//! already in flight are discarded rather than delivered.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use bellboard_core::{ChannelError, DecodeError, JobId, JobStatusEvent, StatusTransport};

/// Capacity of the frame queue between the reader task and the consumer.
const FRAME_BUFFER: usize = 32;

/// Lifecycle state of a [`JobChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Transport connection not yet established.
    Connecting,
    /// Receiving frames.
    Open,
    /// Released. Terminal.
    Closed,
}

/// What the channel delivers to its consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelUpdate {
    /// A decoded status event.
    Event(JobStatusEvent),
    /// One frame could not be decoded; the channel keeps listening.
    Malformed(DecodeError),
    /// The channel failed before a terminal event and is now closed.
    Failed(ChannelError),
}

/// Messages from the reader task.
#[derive(Debug)]
enum Inbound {
    Connected,
    Frame(String),
    Failed(ChannelError),
}

/// Status subscription bound to a single job.
pub struct JobChannel {
    job_id: JobId,
    state: ChannelState,
    inbound: Option<mpsc::Receiver<Inbound>>,
    reader: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for JobChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobChannel")
            .field("job_id", &self.job_id)
            .field("state", &self.state)
            .finish()
    }
}

impl JobChannel {
    /// Start connecting to the channel for `job_id`.
    ///
    /// Never fails at call time; connection failures arrive as
    /// [`ChannelUpdate::Failed`] from [`JobChannel::next`]. Must be called
    /// within a Tokio runtime.
    pub fn open(transport: Arc<dyn StatusTransport>, job_id: JobId) -> Self {
        let (tx, rx) = mpsc::channel(FRAME_BUFFER);
        let reader = tokio::spawn(read_frames(transport, job_id.clone(), tx));
        debug!("Opening status channel for job {job_id}");

        Self {
            job_id,
            state: ChannelState::Connecting,
            inbound: Some(rx),
            reader: Some(reader),
        }
    }

    /// The job this channel is bound to.
    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Check if the channel has been released.
    pub fn is_closed(&self) -> bool {
        self.state == ChannelState::Closed
    }

    /// Wait for the next update. Returns `None` once the channel is closed.
    ///
    /// A `done` event closes the channel before it is returned.
    pub async fn next(&mut self) -> Option<ChannelUpdate> {
        loop {
            let inbound = self.inbound.as_mut()?;
            let message = match inbound.recv().await {
                Some(message) => message,
                None => Inbound::Failed(ChannelError::ClosedBeforeDone),
            };

            match message {
                Inbound::Connected => {
                    self.state = ChannelState::Open;
                    debug!("Status channel for job {} open", self.job_id);
                }
                Inbound::Frame(frame) => {
                    return Some(match JobStatusEvent::decode(&frame) {
                        Ok(event) => {
                            if event.is_terminal() {
                                self.close();
                            }
                            ChannelUpdate::Event(event)
                        }
                        Err(err) => {
                            warn!("Job {}: {err}", self.job_id);
                            ChannelUpdate::Malformed(err)
                        }
                    });
                }
                Inbound::Failed(err) => {
                    self.close();
                    return Some(ChannelUpdate::Failed(err));
                }
            }
        }
    }

    /// Deliver every update to `handler` in arrival order until the channel closes.
    pub async fn on_event<F>(&mut self, mut handler: F)
    where
        F: FnMut(ChannelUpdate),
    {
        while let Some(update) = self.next().await {
            handler(update);
        }
    }

    /// Release the connection. Idempotent.
    pub fn close(&mut self) {
        if self.state == ChannelState::Closed {
            return;
        }
        self.state = ChannelState::Closed;
        self.inbound = None;
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
        debug!("Status channel for job {} closed", self.job_id);
    }
}

impl Drop for JobChannel {
    fn drop(&mut self) {
        self.close();
    }
}

/// Pump frames from the transport into the queue until it ends or the consumer goes away.
async fn read_frames(
    transport: Arc<dyn StatusTransport>,
    job_id: JobId,
    tx: mpsc::Sender<Inbound>,
) {
    let mut frames = match transport.connect(&job_id).await {
        Ok(frames) => frames,
        Err(err) => {
            let _ = tx.send(Inbound::Failed(err)).await;
            return;
        }
    };
    if tx.send(Inbound::Connected).await.is_err() {
        return;
    }

    while let Some(frame) = frames.next().await {
        let message = match frame {
            Ok(text) => Inbound::Frame(text),
            Err(err) => {
                let _ = tx.send(Inbound::Failed(err)).await;
                return;
            }
        };
        if tx.send(message).await.is_err() {
            return;
        }
    }

    let _ = tx.send(Inbound::Failed(ChannelError::ClosedBeforeDone)).await;
}
