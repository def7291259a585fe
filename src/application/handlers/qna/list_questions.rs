//! ListQuestionsHandler - Query handler for the question board tabs.

use std::sync::Arc;

use crate::domain::catalog::{filter_questions, QuestionFeed};
use crate::domain::qna::{QnaError, Question};
use crate::ports::QuestionRepository;

/// Query for one board tab with an optional search string.
#[derive(Debug, Clone, Default)]
pub struct ListQuestionsQuery {
    pub feed: QuestionFeed,
    pub search: String,
}

/// Handler for listing questions.
pub struct ListQuestionsHandler {
    repository: Arc<dyn QuestionRepository>,
}

impl ListQuestionsHandler {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListQuestionsQuery) -> Result<Vec<Question>, QnaError> {
        let questions = self.repository.list_questions().await?;
        Ok(filter_questions(&questions, query.feed, &query.search)
            .into_iter()
            .cloned()
            .collect())
    }
}
