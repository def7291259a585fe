//! Q&A-specific error types.

use crate::domain::foundation::{AnswerId, DomainError, ErrorCode, QuestionId};
use crate::ports::BackendError;

/// Errors raised by question/answer interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QnaError {
    /// Question was not found on the board.
    QuestionNotFound(QuestionId),
    /// Answer was not found in the thread.
    AnswerNotFound(AnswerId),
    /// The caller lacks the capability for this action.
    Forbidden(String),
    /// Invalid state for operation.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Records disagree (e.g. two accepted answers).
    Conflict(String),
    /// The community backend rejected or failed the call.
    Backend(BackendError),
    /// Local storage error.
    Infrastructure(String),
}

impl QnaError {
    pub fn question_not_found(id: QuestionId) -> Self {
        QnaError::QuestionNotFound(id)
    }
    pub fn answer_not_found(id: AnswerId) -> Self {
        QnaError::AnswerNotFound(id)
    }
    pub fn forbidden(reason: impl Into<String>) -> Self {
        QnaError::Forbidden(reason.into())
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        QnaError::InvalidState(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        QnaError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        QnaError::Conflict(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        QnaError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            QnaError::QuestionNotFound(_) => ErrorCode::QuestionNotFound,
            QnaError::AnswerNotFound(_) => ErrorCode::AnswerNotFound,
            QnaError::Forbidden(_) => ErrorCode::Forbidden,
            QnaError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            QnaError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            QnaError::Conflict(_) => ErrorCode::AcceptanceConflict,
            QnaError::Backend(err) => err.code(),
            QnaError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            QnaError::QuestionNotFound(id) => format!("Question not found: {}", id),
            QnaError::AnswerNotFound(id) => format!("Answer not found: {}", id),
            QnaError::Forbidden(reason) => format!("Permission denied: {}", reason),
            QnaError::InvalidState(msg) => format!("Invalid state: {}", msg),
            QnaError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            QnaError::Conflict(msg) => format!("Conflict: {}", msg),
            QnaError::Backend(err) => format!("Backend error: {}", err),
            QnaError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
    /// True when the user can simply try again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, QnaError::Backend(err) if err.is_retryable())
    }
}

impl std::fmt::Display for QnaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for QnaError {}

impl From<DomainError> for QnaError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => QnaError::Forbidden(err.message),
            ErrorCode::InvalidStateTransition => QnaError::InvalidState(err.message),
            ErrorCode::AcceptanceConflict => QnaError::Conflict(err.message),
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                QnaError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => QnaError::Infrastructure(err.to_string()),
        }
    }
}

impl From<BackendError> for QnaError {
    fn from(err: BackendError) -> Self {
        QnaError::Backend(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_domain_error_keeps_field() {
        let err: QnaError = DomainError::validation("title", "Title cannot be empty").into();
        assert_eq!(
            err,
            QnaError::validation("title", "Title cannot be empty")
        );
    }

    #[test]
    fn storage_domain_error_becomes_infrastructure() {
        let err: QnaError = DomainError::new(ErrorCode::StorageError, "lock poisoned").into();
        assert!(matches!(err, QnaError::Infrastructure(_)));
        assert_eq!(err.code(), ErrorCode::StorageError);
    }

    #[test]
    fn backend_errors_keep_retryability() {
        let err: QnaError = BackendError::network("connection reset").into();
        assert!(err.is_retryable());
        let err: QnaError = BackendError::permission_denied("not the author").into();
        assert!(!err.is_retryable());
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[test]
    fn messages_name_the_missing_record() {
        let id = AnswerId::new();
        assert_eq!(
            QnaError::answer_not_found(id).to_string(),
            format!("Answer not found: {}", id)
        );
    }
}
