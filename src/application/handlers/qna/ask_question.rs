//! AskQuestionHandler - Command handler for posting a new question.

use std::sync::Arc;

use crate::domain::drafts::NewQuestionDraft;
use crate::domain::foundation::{CommandMetadata, EventEnvelope, EventId, Timestamp};
use crate::domain::qna::{Author, QnaError, Question, QuestionAsked, QuestionThread};
use crate::ports::{CommunityBackend, EventPublisher, QuestionRepository};

/// Who is asking. The user id comes from the command metadata.
#[derive(Debug, Clone)]
pub struct AskQuestionCommand {
    pub author: Author,
}

/// Result of a posted question.
#[derive(Debug, Clone)]
pub struct AskQuestionResult {
    pub question: Question,
    pub event: QuestionAsked,
}

/// Handler for posting questions.
///
/// The draft is cleared on success and restored on failure.
pub struct AskQuestionHandler {
    repository: Arc<dyn QuestionRepository>,
    backend: Arc<dyn CommunityBackend>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AskQuestionHandler {
    pub fn new(
        repository: Arc<dyn QuestionRepository>,
        backend: Arc<dyn CommunityBackend>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            backend,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        draft: &mut NewQuestionDraft,
        cmd: AskQuestionCommand,
        metadata: CommandMetadata,
    ) -> Result<AskQuestionResult, QnaError> {
        let snapshot = draft.clone();
        let submission = draft.submit()?;

        let question = match self
            .backend
            .submit_new_question(submission, &metadata.user_id, &cmd.author)
            .await
        {
            Ok(question) => question,
            Err(err) => {
                tracing::warn!(error = %err, "question rejected, restoring draft");
                *draft = snapshot;
                return Err(err.into());
            }
        };

        self.repository
            .save_thread(&QuestionThread::new(question.clone()))
            .await?;
        tracing::info!(question_id = %question.id(), title = question.title(), "question posted");

        let event = QuestionAsked {
            event_id: EventId::new(),
            question_id: *question.id(),
            author_id: metadata.user_id.clone(),
            title: question.title().to_string(),
            tags: question.tags().to_vec(),
            privacy: question.privacy(),
            asked_at: Timestamp::now(),
        };
        let envelope = metadata.stamp(EventEnvelope::from_event(&event)?);
        self.event_publisher.publish(envelope).await?;

        Ok(AskQuestionResult { question, event })
    }
}
