//! Draft error types.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::qna::QnaError;

/// Errors raised when a draft is driven through an illegal step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// The status machine refused the transition.
    #[error("invalid draft transition: {0}")]
    InvalidTransition(#[from] ValidationError),

    /// The operation needs an open form.
    #[error("draft is not open")]
    NotOpen,

    /// A required field is blank.
    #[error("field '{0}' cannot be empty")]
    EmptyField(&'static str),
}

impl From<DraftError> for QnaError {
    fn from(err: DraftError) -> Self {
        match err {
            DraftError::EmptyField(field) => QnaError::validation(field, err.to_string()),
            DraftError::InvalidTransition(_) | DraftError::NotOpen => {
                QnaError::invalid_state(err.to_string())
            }
        }
    }
}
