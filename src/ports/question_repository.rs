//! QuestionRepository port - the board's local record store.
//!
//! Holds question threads as the user sees them, including optimistic
//! counter changes that the backend has not confirmed yet.

use async_trait::async_trait;

use crate::domain::foundation::{AnswerId, DomainError, QuestionId};
use crate::domain::qna::{Question, QuestionThread};

/// Repository port for question threads.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Find a thread by question ID.
    ///
    /// Returns `None` if not found.
    async fn find_thread(&self, id: &QuestionId) -> Result<Option<QuestionThread>, DomainError>;

    /// Find the thread that contains an answer.
    async fn find_thread_by_answer(
        &self,
        answer_id: &AnswerId,
    ) -> Result<Option<QuestionThread>, DomainError>;

    /// All questions on the board, newest first.
    async fn list_questions(&self) -> Result<Vec<Question>, DomainError>;

    /// Insert or replace a thread.
    async fn save_thread(&self, thread: &QuestionThread) -> Result<(), DomainError>;
}
