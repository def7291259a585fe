//! CommunityBackend port - the authoritative store behind the board.
//!
//! Every user interaction that changes shared state (votes, follows,
//! acceptance, comments, new questions) is sent through this port. The
//! backend replies with the authoritative counter so the board can
//! reconcile its optimistic copy.

use async_trait::async_trait;

use crate::domain::drafts::QuestionSubmission;
use crate::domain::foundation::{AnswerId, ErrorCode, QuestionId, UserId};
use crate::domain::qna::{Author, Question};
use crate::domain::voting::{UserVote, VotableItem};

/// Port for the remote community service.
#[async_trait]
pub trait CommunityBackend: Send + Sync {
    /// Records the user's resulting vote (`None` clears it).
    ///
    /// Returns the authoritative net vote count.
    async fn submit_vote(&self, item: VotableItem, vote: UserVote) -> Result<i64, BackendError>;

    /// Follows or unfollows a question.
    ///
    /// Returns the authoritative follower count.
    async fn submit_follow(&self, question_id: QuestionId, follow: bool)
        -> Result<u32, BackendError>;

    /// Marks `answer_id` as the accepted answer of `question_id`.
    async fn submit_accepted_answer(
        &self,
        question_id: QuestionId,
        answer_id: AnswerId,
    ) -> Result<(), BackendError>;

    /// Clears the accepted answer of `question_id`.
    async fn withdraw_accepted_answer(
        &self,
        question_id: QuestionId,
        answer_id: AnswerId,
    ) -> Result<(), BackendError>;

    /// Posts a comment on an answer.
    ///
    /// Returns the authoritative comment count for the answer.
    async fn submit_comment(&self, answer_id: AnswerId, text: &str) -> Result<u32, BackendError>;

    /// Posts a new question and returns the stored record.
    async fn submit_new_question(
        &self,
        submission: QuestionSubmission,
        author_id: &UserId,
        author: &Author,
    ) -> Result<Question, BackendError>;
}

/// Community backend errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Connection failed or was reset.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Caller is not allowed to perform the action.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Backend rejected the payload.
    #[error("rejected: {0}")]
    Validation(String),

    /// Request conflicts with current backend state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Target record does not exist on the backend.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Backend is down or returned a server error.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Failed to parse the backend response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl BackendError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BackendError::Network(_)
                | BackendError::Timeout { .. }
                | BackendError::RateLimited { .. }
                | BackendError::Unavailable(_)
        )
    }

    /// Maps to the shared error vocabulary.
    pub fn code(&self) -> ErrorCode {
        match self {
            BackendError::PermissionDenied(_) => ErrorCode::Forbidden,
            BackendError::Validation(_) => ErrorCode::ValidationFailed,
            BackendError::Conflict(_) => ErrorCode::AcceptanceConflict,
            BackendError::NotFound(_) => ErrorCode::QuestionNotFound,
            BackendError::RateLimited { .. } => ErrorCode::RateLimited,
            BackendError::Network(_)
            | BackendError::Timeout { .. }
            | BackendError::Unavailable(_) => ErrorCode::BackendUnavailable,
            BackendError::Parse(_) => ErrorCode::InternalError,
        }
    }
}
