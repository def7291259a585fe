//! HTTP community backend.
//!
//! JSON over HTTP against the community service.
//!
//! ```ignore
//! let config = HttpBackendConfig::new("https://api.aquaveda.org")
//!     .with_api_token(token)
//!     .with_max_retries(2);
//! let backend = HttpCommunityBackend::new(config)?;
//! ```
//!
//! # Routes
//!
//! | Operation | Route |
//! |-----------|-------|
//! | vote | `POST /v1/votes` |
//! | follow / unfollow | `PUT` / `DELETE /v1/questions/{id}/follow` |
//! | accept / withdraw | `PUT` / `DELETE /v1/questions/{id}/accepted-answer/{answer_id}` |
//! | comment | `POST /v1/answers/{id}/comments` |
//! | ask | `POST /v1/questions` |
//!
//! Retryable failures (network, timeout, 429, 5xx) are retried with
//! exponential backoff starting at `retry_base_delay`.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::drafts::QuestionSubmission;
use crate::domain::foundation::{AnswerId, QuestionId, UserId};
use crate::domain::qna::{Author, Privacy, Question};
use crate::domain::voting::{UserVote, VotableItem};
use crate::ports::{BackendError, CommunityBackend};

/// Retry-after used when a 429 carries no usable header.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Service root, without trailing slash.
    pub base_url: String,
    /// Bearer token, if the service requires one.
    api_token: Option<Secret<String>>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub retry_base_delay: Duration,
}

impl HttpBackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
            timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(250),
        }
    }

    pub fn with_api_token(mut self, token: Secret<String>) -> Self {
        self.api_token = Some(token);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    fn api_token(&self) -> Option<&str> {
        self.api_token.as_ref().map(|t| t.expose_secret().as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct VoteRequest {
    item: VotableItem,
    vote: UserVote,
}

#[derive(Debug, Deserialize)]
struct VoteResponse {
    vote_count: i64,
}

#[derive(Debug, Deserialize)]
struct FollowResponse {
    follower_count: u32,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CommentResponse {
    comment_count: u32,
}

#[derive(Debug, Serialize)]
struct NewQuestionRequest<'a> {
    title: String,
    description: String,
    tags: Vec<String>,
    privacy: Privacy,
    author_id: &'a UserId,
    author: &'a Author,
}

// ─────────────────────────────────────────────────────────────────────────────
// Adapter
// ─────────────────────────────────────────────────────────────────────────────

/// Community backend reached over HTTP.
pub struct HttpCommunityBackend {
    config: HttpBackendConfig,
    client: Client,
}

impl HttpCommunityBackend {
    /// # Errors
    ///
    /// - `Network` if the HTTP client cannot be built
    pub fn new(config: HttpBackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Delay before retry number `attempt` (0-based).
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.config
            .retry_base_delay
            .saturating_mul(1u32 << attempt.min(16))
    }

    async fn send_once(
        &self,
        method: &Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, BackendError> {
        let mut request = self.client.request(method.clone(), self.url(path));
        if let Some(token) = self.config.api_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::timeout(self.config.timeout.as_secs())
            } else if e.is_connect() {
                BackendError::network(format!("connection failed: {}", e))
            } else {
                BackendError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body, retry_after))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, BackendError> {
        let mut attempt = 0;
        loop {
            match self.send_once(&method, path, body.as_ref()).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    let delay = self.backoff_delay(attempt);
                    tracing::warn!(
                        %method,
                        path,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying community backend request"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(%method, path, error = %err, "community backend request failed");
                    return Err(err);
                }
            }
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, BackendError> {
        let response = self.send(method, path, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::parse(e.to_string()))
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<serde_json::Value, BackendError> {
    serde_json::to_value(value).map_err(|e| BackendError::parse(e.to_string()))
}

/// Maps a non-success status to a backend error.
fn status_error(status: StatusCode, body: &str, retry_after: Option<u32>) -> BackendError {
    let detail = if body.is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, body)
    };

    match status.as_u16() {
        401 | 403 => BackendError::permission_denied(detail),
        404 => BackendError::not_found(detail),
        409 => BackendError::conflict(detail),
        400 | 422 => BackendError::validation(detail),
        429 => BackendError::rate_limited(retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS)),
        500..=599 => BackendError::unavailable(detail),
        _ => BackendError::network(format!("unexpected status {}", detail)),
    }
}

#[async_trait]
impl CommunityBackend for HttpCommunityBackend {
    async fn submit_vote(&self, item: VotableItem, vote: UserVote) -> Result<i64, BackendError> {
        let body = to_body(&VoteRequest { item, vote })?;
        let response: VoteResponse = self.send_json(Method::POST, "/v1/votes", Some(body)).await?;
        Ok(response.vote_count)
    }

    async fn submit_follow(
        &self,
        question_id: QuestionId,
        follow: bool,
    ) -> Result<u32, BackendError> {
        let method = if follow { Method::PUT } else { Method::DELETE };
        let path = format!("/v1/questions/{}/follow", question_id);
        let response: FollowResponse = self.send_json(method, &path, None).await?;
        Ok(response.follower_count)
    }

    async fn submit_accepted_answer(
        &self,
        question_id: QuestionId,
        answer_id: AnswerId,
    ) -> Result<(), BackendError> {
        let path = format!("/v1/questions/{}/accepted-answer/{}", question_id, answer_id);
        self.send(Method::PUT, &path, None).await?;
        Ok(())
    }

    async fn withdraw_accepted_answer(
        &self,
        question_id: QuestionId,
        answer_id: AnswerId,
    ) -> Result<(), BackendError> {
        let path = format!("/v1/questions/{}/accepted-answer/{}", question_id, answer_id);
        self.send(Method::DELETE, &path, None).await?;
        Ok(())
    }

    async fn submit_comment(&self, answer_id: AnswerId, text: &str) -> Result<u32, BackendError> {
        let path = format!("/v1/answers/{}/comments", answer_id);
        let body = to_body(&CommentRequest { text })?;
        let response: CommentResponse = self.send_json(Method::POST, &path, Some(body)).await?;
        Ok(response.comment_count)
    }

    async fn submit_new_question(
        &self,
        submission: QuestionSubmission,
        author_id: &UserId,
        author: &Author,
    ) -> Result<Question, BackendError> {
        let body = to_body(&NewQuestionRequest {
            title: submission.title,
            description: submission.description,
            tags: submission.tags,
            privacy: submission.privacy,
            author_id,
            author,
        })?;
        self.send_json(Method::POST, "/v1/questions", Some(body)).await
    }
}
