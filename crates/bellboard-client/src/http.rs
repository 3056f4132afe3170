//! HTTP adapter for the submission and leaderboard endpoints.
//!
//! - `POST {endpoint}/submit` with `{username, q1, q2}` → `{task_id}`
//! - `GET {endpoint}/leaderboard` → `[{username, q1, q2, result}]`

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde::Deserialize;
use tracing::debug;

use bellboard_core::{
    FetchError, JobId, LeaderboardRecord, LeaderboardSource, SubmissionError, SubmissionRequest,
    SubmissionService,
};

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// User-Agent sent with requests.
const USER_AGENT: &str = concat!("bellboard/", env!("CARGO_PKG_VERSION"));

/// Body returned by a successful submission.
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    task_id: String,
}

/// reqwest-backed client for the Bellboard backend.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    endpoint: String,
}

impl fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBackend")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl HttpBackend {
    /// Build a client from a validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Read an error body, falling back to the status reason.
async fn error_body(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        _ => status
            .canonical_reason()
            .unwrap_or("no body")
            .to_string(),
    }
}

#[async_trait]
impl SubmissionService for HttpBackend {
    async fn submit(&self, request: &SubmissionRequest) -> Result<JobId, SubmissionError> {
        let url = format!("{}/submit", self.endpoint);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| SubmissionError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(SubmissionError::Rejected {
                status,
                message: error_body(response).await,
            });
        }

        let body: SubmitResponse = response
            .json()
            .await
            .map_err(|e| SubmissionError::MalformedResponse(e.to_string()))?;

        if body.task_id.trim().is_empty() {
            return Err(SubmissionError::MalformedResponse(
                "empty task_id".to_string(),
            ));
        }
        Ok(JobId::new(body.task_id))
    }
}

#[async_trait]
impl LeaderboardSource for HttpBackend {
    async fn list(&self) -> Result<Vec<LeaderboardRecord>, FetchError> {
        let url = format!("{}/leaderboard", self.endpoint);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(FetchError::Status {
                status,
                message: error_body(response).await,
            });
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }
}
