//! In-memory question board.
//!
//! Owns every question thread shown on the page. Insertion order is kept
//! so that newly asked questions appear first.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{AnswerId, DomainError, QuestionId};
use crate::domain::qna::{Question, QuestionThread};
use crate::ports::QuestionRepository;

/// Question threads held in memory, newest first.
#[derive(Debug, Default)]
pub struct InMemoryQuestionRepository {
    threads: RwLock<Vec<QuestionThread>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A board pre-filled with `threads`, kept in the given order.
    pub fn with_threads(threads: Vec<QuestionThread>) -> Self {
        Self {
            threads: RwLock::new(threads),
        }
    }

    pub async fn len(&self) -> usize {
        self.threads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.threads.read().await.is_empty()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_thread(&self, id: &QuestionId) -> Result<Option<QuestionThread>, DomainError> {
        Ok(self
            .threads
            .read()
            .await
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }

    async fn find_thread_by_answer(
        &self,
        answer_id: &AnswerId,
    ) -> Result<Option<QuestionThread>, DomainError> {
        Ok(self
            .threads
            .read()
            .await
            .iter()
            .find(|t| t.contains_answer(answer_id))
            .cloned())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, DomainError> {
        Ok(self
            .threads
            .read()
            .await
            .iter()
            .map(|t| t.question().clone())
            .collect())
    }

    async fn save_thread(&self, thread: &QuestionThread) -> Result<(), DomainError> {
        let mut threads = self.threads.write().await;
        match threads.iter_mut().find(|t| t.id() == thread.id()) {
            Some(existing) => *existing = thread.clone(),
            None => threads.insert(0, thread.clone()),
        }
        Ok(())
    }
}
