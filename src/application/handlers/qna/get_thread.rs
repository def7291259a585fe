//! GetThreadHandler - Query handler for a question page.

use std::sync::Arc;

use crate::domain::foundation::QuestionId;
use crate::domain::qna::{QnaError, QuestionThread};
use crate::ports::QuestionRepository;

/// Query to open a question page.
#[derive(Debug, Clone)]
pub struct GetThreadQuery {
    pub question_id: QuestionId,
    /// Count this load as a page view.
    pub record_view: bool,
}

/// Handler for loading a question with its answers.
pub struct GetThreadHandler {
    repository: Arc<dyn QuestionRepository>,
}

impl GetThreadHandler {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetThreadQuery) -> Result<QuestionThread, QnaError> {
        let mut thread = self
            .repository
            .find_thread(&query.question_id)
            .await?
            .ok_or_else(|| QnaError::question_not_found(query.question_id))?;

        if query.record_view {
            thread.question_mut().record_view();
            self.repository.save_thread(&thread).await?;
        }
        Ok(thread)
    }
}
