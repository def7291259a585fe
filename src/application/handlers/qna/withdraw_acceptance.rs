//! WithdrawAcceptanceHandler - Command handler for un-accepting an answer.

use std::sync::Arc;

use crate::domain::foundation::{
    AnswerId, CommandMetadata, EventEnvelope, EventId, QuestionId, Timestamp,
};
use crate::domain::qna::{AcceptanceWithdrawn, QnaError};
use crate::ports::{AcceptancePolicy, CommunityBackend, EventPublisher, QuestionRepository};

/// Command to withdraw acceptance from an answer.
#[derive(Debug, Clone)]
pub struct WithdrawAcceptanceCommand {
    pub question_id: QuestionId,
    pub answer_id: AnswerId,
}

/// Handler for withdrawing acceptance.
///
/// Only reachable when the policy grants `can_unaccept`.
pub struct WithdrawAcceptanceHandler {
    repository: Arc<dyn QuestionRepository>,
    backend: Arc<dyn CommunityBackend>,
    policy: Arc<dyn AcceptancePolicy>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl WithdrawAcceptanceHandler {
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

    /// Returns `None` when the answer was not accepted to begin with.
    pub async fn handle(
        &self,
        cmd: WithdrawAcceptanceCommand,
        metadata: CommandMetadata,
    ) -> Result<Option<AcceptanceWithdrawn>, QnaError> {
        let mut thread = self
            .repository
            .find_thread(&cmd.question_id)
            .await?
            .ok_or_else(|| QnaError::question_not_found(cmd.question_id))?;
        let snapshot = thread.clone();

        let capability = self.policy.capability(&metadata.user_id, thread.question());
        if !thread.withdraw_acceptance(cmd.answer_id, capability)? {
            return Ok(None);
        }
        self.repository.save_thread(&thread).await?;

        if let Err(err) = self
            .backend
            .withdraw_accepted_answer(cmd.question_id, cmd.answer_id)
            .await
        {
            tracing::warn!(
                question_id = %cmd.question_id,
                answer_id = %cmd.answer_id,
                error = %err,
                "withdrawal rejected, reverting"
            );
            self.repository.save_thread(&snapshot).await?;
            return Err(err.into());
        }

        tracing::info!(question_id = %cmd.question_id, answer_id = %cmd.answer_id, "acceptance withdrawn");

        let event = AcceptanceWithdrawn {
            event_id: EventId::new(),
            question_id: cmd.question_id,
            answer_id: cmd.answer_id,
            withdrawn_by: metadata.user_id.clone(),
            withdrawn_at: Timestamp::now(),
        };
        let envelope = metadata.stamp(EventEnvelope::from_event(&event)?);
        self.event_publisher.publish(envelope).await?;

        Ok(Some(event))
    }
}
