//! StartDiscussionHandler - Command handler for the forum's new-post form.

use std::sync::Arc;

use crate::domain::drafts::NewPostDraft;
use crate::domain::foundation::{CommandMetadata, DiscussionId, EventEnvelope, EventId, Timestamp};
use crate::domain::qna::{DiscussionStarted, QnaError};
use crate::ports::EventPublisher;

/// Result of a posted discussion.
#[derive(Debug, Clone)]
pub struct StartDiscussionResult {
    pub discussion_id: DiscussionId,
    pub event: DiscussionStarted,
}

/// Handler for new forum posts.
///
/// Forum threads are not stored on the board; the post is logged and
/// published. The draft is restored if publishing fails.
pub struct StartDiscussionHandler {
    event_publisher: Arc<dyn EventPublisher>,
}

impl StartDiscussionHandler {
    pub fn new(event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self { event_publisher }
    }

    pub async fn handle(
        &self,
        draft: &mut NewPostDraft,
        metadata: CommandMetadata,
    ) -> Result<StartDiscussionResult, QnaError> {
        let snapshot = draft.clone();
        let post = draft.submit()?;

        let discussion_id = DiscussionId::new();
        tracing::info!(
            discussion_id = %discussion_id,
            author = %metadata.user_id,
            title = %post.title,
            "discussion posted"
        );

        let event = DiscussionStarted {
            event_id: EventId::new(),
            discussion_id,
            author_id: metadata.user_id.clone(),
            title: post.title,
            content: post.content,
            started_at: Timestamp::now(),
        };
        let envelope = metadata.stamp(EventEnvelope::from_event(&event)?);
        if let Err(err) = self.event_publisher.publish(envelope).await {
            tracing::warn!(error = %err, "discussion not published, restoring draft");
            *draft = snapshot;
            return Err(err.into());
        }

        Ok(StartDiscussionResult {
            discussion_id,
            event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{metadata, RecordingPublisher};
    use super::*;
    use crate::domain::drafts::DraftStatus;
    use crate::domain::foundation::ErrorCode;

    fn open_draft(title: &str, content: &str) -> NewPostDraft {
        let mut draft = NewPostDraft::new();
        draft.toggle();
        draft.set_title(title).unwrap();
        draft.set_content(content).unwrap();
        draft
    }

    #[tokio::test]
    async fn posts_trimmed_discussion_and_clears_form() {
        let publisher = Arc::new(RecordingPublisher::new());
        let mut draft = open_draft(
            "  Community rain garden workday ",
            " Looking for volunteers in the Eastside watershed. ",
        );

        let result = StartDiscussionHandler::new(publisher.clone())
            .handle(&mut draft, metadata("sarah-chen"))
            .await
            .unwrap();

        assert_eq!(result.event.title, "Community rain garden workday");
        assert_eq!(result.event.content, "Looking for volunteers in the Eastside watershed.");
        assert_eq!(draft, NewPostDraft::new());

        let events = publisher.events();
        assert_eq!(publisher.event_types(), vec!["qna.discussion_started.v1"]);
        assert_eq!(events[0].aggregate_id, result.discussion_id.to_string());
        assert_eq!(events[0].metadata.user_id.as_deref(), Some("sarah-chen"));
    }

    #[tokio::test]
    async fn blank_title_publishes_nothing() {
        let publisher = Arc::new(RecordingPublisher::new());
        let mut draft = open_draft("   ", "Body text");

        let err = StartDiscussionHandler::new(publisher.clone())
            .handle(&mut draft, metadata("sarah-chen"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(draft.is_open());
        assert_eq!(draft.content(), "Body text");
        assert!(publisher.events().is_empty());
    }

    #[tokio::test]
    async fn blank_content_publishes_nothing() {
        let publisher = Arc::new(RecordingPublisher::new());
        let mut draft = open_draft("Greywater reuse rules", "");

        let err = StartDiscussionHandler::new(publisher.clone())
            .handle(&mut draft, metadata("sarah-chen"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(draft.title(), "Greywater reuse rules");
        assert!(publisher.events().is_empty());
    }

    #[tokio::test]
    async fn hidden_form_is_invalid_state() {
        let publisher = Arc::new(RecordingPublisher::new());
        let mut draft = NewPostDraft::new();

        let err = StartDiscussionHandler::new(publisher)
            .handle(&mut draft, metadata("sarah-chen"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[tokio::test]
    async fn publish_failure_restores_draft() {
        let mut draft = open_draft("Well testing co-op", "Splitting lab costs with neighbours.");
        let snapshot = draft.clone();

        let result = StartDiscussionHandler::new(Arc::new(RecordingPublisher::failing()))
            .handle(&mut draft, metadata("sarah-chen"))
            .await;

        assert!(result.is_err());
        assert_eq!(draft, snapshot);
        assert_eq!(draft.status(), DraftStatus::Open);
    }
}
