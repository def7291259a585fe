//! SubmitCommentHandler - Command handler for finishing a comment draft.

use std::sync::Arc;

use crate::domain::drafts::CommentDraft;
use crate::domain::foundation::{AnswerId, CommandMetadata, EventEnvelope, EventId, Timestamp};
use crate::domain::qna::{CommentSubmitted, QnaError};
use crate::ports::{CommunityBackend, EventPublisher, QuestionRepository};

/// Result of a confirmed comment.
#[derive(Debug, Clone)]
pub struct SubmitCommentResult {
    pub answer_id: AnswerId,
    pub comment_count: u32,
    pub event: CommentSubmitted,
}

/// Handler for comment submission.
///
/// Works on the caller's draft so a failed call can hand the text back.
pub struct SubmitCommentHandler {
    repository: Arc<dyn QuestionRepository>,
    backend: Arc<dyn CommunityBackend>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SubmitCommentHandler {
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

    /// Returns `Ok(None)` when the draft text is blank; the draft stays open.
    pub async fn handle(
        &self,
        draft: &mut CommentDraft,
        metadata: CommandMetadata,
    ) -> Result<Option<SubmitCommentResult>, QnaError> {
        let draft_snapshot = draft.clone();
        let Some(comment) = draft.submit()? else {
            return Ok(None);
        };
        let answer_id = comment.answer_id;

        let mut thread = match self.repository.find_thread_by_answer(&answer_id).await? {
            Some(thread) => thread,
            None => {
                *draft = draft_snapshot;
                return Err(QnaError::answer_not_found(answer_id));
            }
        };
        let thread_snapshot = thread.clone();

        let answer = thread.answer_mut(&answer_id)?;
        let optimistic = answer.comment_count().saturating_add(1);
        answer.reconcile_comments(optimistic);
        self.repository.save_thread(&thread).await?;

        let comment_count = match self.backend.submit_comment(answer_id, &comment.text).await {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(answer_id = %answer_id, error = %err, "comment rejected, restoring draft");
                self.repository.save_thread(&thread_snapshot).await?;
                *draft = draft_snapshot;
                return Err(err.into());
            }
        };

        thread.answer_mut(&answer_id)?.reconcile_comments(comment_count);
        self.repository.save_thread(&thread).await?;
        tracing::info!(answer_id = %answer_id, comment_count, "comment submitted");

        let event = CommentSubmitted {
            event_id: EventId::new(),
            question_id: *thread.id(),
            answer_id,
            text: comment.text,
            comment_count,
            submitted_at: Timestamp::now(),
        };
        let envelope = metadata.stamp(EventEnvelope::from_event(&event)?);
        self.event_publisher.publish(envelope).await?;

        Ok(Some(SubmitCommentResult {
            answer_id,
            comment_count,
            event,
        }))
    }
}
