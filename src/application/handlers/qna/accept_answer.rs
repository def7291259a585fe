//! AcceptAnswerHandler - Command handler for marking the accepted answer.

use std::sync::Arc;

use crate::domain::foundation::{
    AnswerId, CommandMetadata, EventEnvelope, EventId, QuestionId, Timestamp,
};
use crate::domain::qna::{AcceptanceChange, AnswerAccepted, QnaError};
use crate::ports::{AcceptancePolicy, CommunityBackend, EventPublisher, QuestionRepository};

/// Command to accept an answer on a question.
#[derive(Debug, Clone)]
pub struct AcceptAnswerCommand {
    pub question_id: QuestionId,
    pub answer_id: AnswerId,
}

/// Result of an accept.
#[derive(Debug, Clone)]
pub struct AcceptAnswerResult {
    pub change: AcceptanceChange,
    /// `None` when the answer was already accepted.
    pub event: Option<AnswerAccepted>,
}

/// Handler for accepting answers.
///
/// The previous acceptance is cleared in the same step, so a thread never
/// shows two accepted answers.
pub struct AcceptAnswerHandler {
    repository: Arc<dyn QuestionRepository>,
    backend: Arc<dyn CommunityBackend>,
    policy: Arc<dyn AcceptancePolicy>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AcceptAnswerHandler {
    pub fn new(
        repository: Arc<dyn QuestionRepository>,
        backend: Arc<dyn CommunityBackend>,
        policy: Arc<dyn AcceptancePolicy>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            backend,
            policy,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: AcceptAnswerCommand,
        metadata: CommandMetadata,
    ) -> Result<AcceptAnswerResult, QnaError> {
        // 1. Load thread
        let mut thread = self
            .repository
            .find_thread(&cmd.question_id)
            .await?
            .ok_or_else(|| QnaError::question_not_found(cmd.question_id))?;
        let snapshot = thread.clone();

        // 2. Authorize and apply
        let capability = self.policy.capability(&metadata.user_id, thread.question());
        let change = thread.accept_answer(cmd.answer_id, capability)?;
        if change.is_noop() {
            return Ok(AcceptAnswerResult { change, event: None });
        }
        self.repository.save_thread(&thread).await?;

        // 3. Confirm with the backend, restoring the previous acceptance on failure
        if let Err(err) = self
            .backend
            .submit_accepted_answer(cmd.question_id, cmd.answer_id)
            .await
        {
            tracing::warn!(
                question_id = %cmd.question_id,
                answer_id = %cmd.answer_id,
                error = %err,
                "accept rejected, reverting"
            );
            self.repository.save_thread(&snapshot).await?;
            return Err(err.into());
        }

        tracing::info!(
            question_id = %cmd.question_id,
            answer_id = %cmd.answer_id,
            previously_accepted = ?change.previously_accepted,
            "answer accepted"
        );

        // 4. Publish event
        let event = AnswerAccepted {
            event_id: EventId::new(),
            question_id: cmd.question_id,
            answer_id: cmd.answer_id,
            previously_accepted: change.previously_accepted,
            accepted_by: metadata.user_id.clone(),
            accepted_at: Timestamp::now(),
        };
        let envelope = metadata.stamp(EventEnvelope::from_event(&event)?);
        self.event_publisher.publish(envelope).await?;

        Ok(AcceptAnswerResult {
            change,
            event: Some(event),
        })
    }
}
