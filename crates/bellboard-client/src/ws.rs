//! WebSocket transport for the per-job status channel.
//!
//! Connects to `{status_base}/ws/{task_id}`. Text and binary frames are passed
//! through as text; ping/pong frames are skipped and a close frame ends the
//! stream. `wss://` connects over rustls with the webpki root set.

use async_trait::async_trait;
use futures::{StreamExt, future};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::debug;

use bellboard_core::{ChannelError, FrameStream, JobId, StatusTransport};

use crate::config::ClientConfig;

/// tokio-tungstenite implementation of [`StatusTransport`].
#[derive(Debug, Clone)]
pub struct WsStatusTransport {
    base: String,
}

impl WsStatusTransport {
    /// Create a transport for a `ws://` or `wss://` base URL.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a transport from the client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.status_base())
    }

    /// URL of the channel for `job_id`.
    pub fn url_for(&self, job_id: &JobId) -> String {
        format!("{}/ws/{}", self.base, job_id)
    }
}

fn frame_text(message: Message) -> Option<Result<String, ChannelError>> {
    match message {
        Message::Text(text) => Some(Ok(text.as_str().to_owned())),
        Message::Binary(bytes) => Some(Ok(String::from_utf8_lossy(&bytes).into_owned())),
        _ => None,
    }
}

#[async_trait]
impl StatusTransport for WsStatusTransport {
    async fn connect(&self, job_id: &JobId) -> Result<FrameStream, ChannelError> {
        let url = self.url_for(job_id);
        let (stream, _response) = connect_async(url.as_str())
            .await
            .map_err(|e| ChannelError::Connect(e.to_string()))?;
        debug!("Status channel connected: {url}");

        let frames = stream
            .take_while(|message| future::ready(!matches!(message, Ok(Message::Close(_)))))
            .filter_map(|message| {
                future::ready(match message {
                    Ok(message) => frame_text(message),
                    Err(e) => Some(Err(ChannelError::Transport(e.to_string()))),
                })
            });

        Ok(frames.boxed())
    }
}
