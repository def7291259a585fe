//! ToggleFollowHandler and ToggleBookmarkHandler.
//!
//! Following is shared state confirmed by the backend. Bookmarks are a
//! local flag and never leave the board.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventEnvelope, EventId, QuestionId, Timestamp};
use crate::domain::qna::{FollowToggled, QnaError};
use crate::ports::{CommunityBackend, EventPublisher, QuestionRepository};

/// Command to press the follow button on a question.
#[derive(Debug, Clone)]
pub struct ToggleFollowCommand {
    pub question_id: QuestionId,
}

/// Result of a confirmed follow toggle.
#[derive(Debug, Clone)]
pub struct ToggleFollowResult {
    pub following: bool,
    pub follower_count: u32,
    pub event: FollowToggled,
}

/// Handler for follow toggles.
pub struct ToggleFollowHandler {
    repository: Arc<dyn QuestionRepository>,
    backend: Arc<dyn CommunityBackend>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ToggleFollowHandler {
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
        cmd: ToggleFollowCommand,
        metadata: CommandMetadata,
    ) -> Result<ToggleFollowResult, QnaError> {
        let mut thread = self
            .repository
            .find_thread(&cmd.question_id)
            .await?
            .ok_or_else(|| QnaError::question_not_found(cmd.question_id))?;

        let following = thread.question_mut().toggle_follow();
        self.repository.save_thread(&thread).await?;

        let follower_count = match self.backend.submit_follow(cmd.question_id, following).await {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(question_id = %cmd.question_id, error = %err, "follow rejected, reverting");
                // A second toggle restores both flag and count.
                thread.question_mut().toggle_follow();
                self.repository.save_thread(&thread).await?;
                return Err(err.into());
            }
        };

        thread.question_mut().reconcile_followers(follower_count);
        self.repository.save_thread(&thread).await?;
        tracing::info!(question_id = %cmd.question_id, following, follower_count, "follow toggled");

        let event = FollowToggled {
            event_id: EventId::new(),
            question_id: cmd.question_id,
            following,
            follower_count,
            toggled_at: Timestamp::now(),
        };
        let envelope = metadata.stamp(EventEnvelope::from_event(&event)?);
        self.event_publisher.publish(envelope).await?;

        Ok(ToggleFollowResult {
            following,
            follower_count,
            event,
        })
    }
}

/// Command to flip the local bookmark flag.
#[derive(Debug, Clone)]
pub struct ToggleBookmarkCommand {
    pub question_id: QuestionId,
}

/// Handler for bookmark toggles.
pub struct ToggleBookmarkHandler {
    repository: Arc<dyn QuestionRepository>,
}

impl ToggleBookmarkHandler {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    /// Returns the new bookmark state.
    pub async fn handle(&self, cmd: ToggleBookmarkCommand) -> Result<bool, QnaError> {
        let mut thread = self
            .repository
            .find_thread(&cmd.question_id)
            .await?
            .ok_or_else(|| QnaError::question_not_found(cmd.question_id))?;

        let bookmarked = thread.question_mut().toggle_bookmark();
        self.repository.save_thread(&thread).await?;
        tracing::debug!(question_id = %cmd.question_id, bookmarked, "bookmark toggled");
        Ok(bookmarked)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{metadata, seeded_board, RecordingPublisher, StubBackend};
    use super::*;
    use crate::ports::BackendError;

    #[tokio::test]
    async fn follow_reconciles_with_backend_count() {
        let (repo, catalog) = seeded_board();
        let qid = *catalog.threads[0].id();
        let backend = Arc::new(StubBackend::ok().with_follower_count(14));
        let publisher = Arc::new(RecordingPublisher::new());

        let result = ToggleFollowHandler::new(repo.clone(), backend.clone(), publisher.clone())
            .handle(ToggleFollowCommand { question_id: qid }, metadata("sarah-chen"))
            .await
            .unwrap();

        assert!(result.following);
        assert_eq!(result.follower_count, 14);
        assert_eq!(backend.calls(), vec![format!("follow {} true", qid)]);
        let stored = repo.find_thread(&qid).await.unwrap().unwrap();
        assert!(stored.question().is_following());
        assert_eq!(stored.question().follower_count(), 14);
        assert_eq!(publisher.event_types(), vec!["qna.follow_toggled.v1"]);
    }

    #[tokio::test]
    async fn unfollow_sends_false() {
        let (repo, catalog) = seeded_board();
        // Seeded as followed with 28 followers.
        let qid = *catalog.threads[1].id();
        let backend = Arc::new(StubBackend::ok().with_follower_count(27));
        let publisher = Arc::new(RecordingPublisher::new());

        let result = ToggleFollowHandler::new(repo, backend.clone(), publisher)
            .handle(ToggleFollowCommand { question_id: qid }, metadata("sarah-chen"))
            .await
            .unwrap();

        assert!(!result.following);
        assert_eq!(backend.calls(), vec![format!("follow {} false", qid)]);
    }

    #[tokio::test]
    async fn backend_failure_restores_follow_state() {
        let (repo, catalog) = seeded_board();
        let qid = *catalog.threads[0].id();
        let backend = Arc::new(StubBackend::failing(BackendError::timeout(10)));
        let publisher = Arc::new(RecordingPublisher::new());

        let err = ToggleFollowHandler::new(repo.clone(), backend, publisher.clone())
            .handle(ToggleFollowCommand { question_id: qid }, metadata("sarah-chen"))
            .await
            .unwrap_err();

        assert!(matches!(err, QnaError::Backend(BackendError::Timeout { .. })));
        let stored = repo.find_thread(&qid).await.unwrap().unwrap();
        assert!(!stored.question().is_following());
        assert_eq!(stored.question().follower_count(), 12);
        assert!(publisher.events().is_empty());
    }

    #[tokio::test]
    async fn bookmark_is_local_and_toggles() {
        let (repo, catalog) = seeded_board();
        let qid = *catalog.threads[2].id();
        let handler = ToggleBookmarkHandler::new(repo.clone());

        assert!(handler.handle(ToggleBookmarkCommand { question_id: qid }).await.unwrap());
        assert!(!handler.handle(ToggleBookmarkCommand { question_id: qid }).await.unwrap());
        assert!(!repo.find_thread(&qid).await.unwrap().unwrap().question().is_bookmarked());
    }

    #[tokio::test]
    async fn missing_question_is_not_found() {
        let (repo, _) = seeded_board();
        let missing = QuestionId::new();
        let err = ToggleBookmarkHandler::new(repo)
            .handle(ToggleBookmarkCommand { question_id: missing })
            .await
            .unwrap_err();
        assert_eq!(err, QnaError::question_not_found(missing));
    }
}
