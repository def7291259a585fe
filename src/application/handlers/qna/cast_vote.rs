//! CastVoteHandler - Command handler for voting on questions and answers.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventEnvelope, EventId, Timestamp};
use crate::domain::qna::{QnaError, QuestionThread, VoteCast};
use crate::domain::voting::{Votable, VotableItem, VoteDirection, VoteTally};
use crate::ports::{CommunityBackend, EventPublisher, QuestionRepository};

/// Command to press an up or down arrow.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    pub item: VotableItem,
    pub direction: VoteDirection,
}

/// Result of a confirmed vote.
#[derive(Debug, Clone)]
pub struct CastVoteResult {
    /// Backend-confirmed tally.
    pub tally: VoteTally,
    pub event: VoteCast,
}

/// Handler for vote presses.
///
/// With optimistic updates on, the new tally is saved before the backend
/// is called and rolled back if the call fails.
pub struct CastVoteHandler {
    repository: Arc<dyn QuestionRepository>,
    backend: Arc<dyn CommunityBackend>,
    event_publisher: Arc<dyn EventPublisher>,
    optimistic: bool,
}

impl CastVoteHandler {
    pub fn new(
        repository: Arc<dyn QuestionRepository>,
        backend: Arc<dyn CommunityBackend>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            backend,
            event_publisher,
            optimistic: true,
        }
    }

    pub fn with_optimistic_updates(mut self, optimistic: bool) -> Self {
        self.optimistic = optimistic;
        self
    }

    pub async fn handle(
        &self,
        cmd: CastVoteCommand,
        metadata: CommandMetadata,
    ) -> Result<CastVoteResult, QnaError> {
        // 1. Load the thread holding the item
        let mut thread = load_thread_for(self.repository.as_ref(), cmd.item).await?;

        // 2. Apply the press locally
        let previous = thread.votable_mut(cmd.item)?.tally();
        let next = previous.applied(cmd.direction);
        if self.optimistic {
            thread.votable_mut(cmd.item)?.set_tally(next);
            self.repository.save_thread(&thread).await?;
        }

        // 3. Confirm with the backend, reverting on failure
        let vote_count = match self.backend.submit_vote(cmd.item, next.user_vote).await {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(item = %cmd.item, error = %err, "vote rejected, reverting");
                if self.optimistic {
                    thread.votable_mut(cmd.item)?.set_tally(previous);
                    self.repository.save_thread(&thread).await?;
                }
                return Err(err.into());
            }
        };

        // 4. Reconcile with the authoritative count
        let confirmed = next.reconcile(vote_count);
        thread.votable_mut(cmd.item)?.set_tally(confirmed);
        self.repository.save_thread(&thread).await?;

        tracing::info!(
            item = %cmd.item,
            vote = confirmed.user_vote.as_str(),
            vote_count = confirmed.count,
            "vote cast"
        );

        // 5. Publish event
        let event = VoteCast {
            event_id: EventId::new(),
            question_id: *thread.id(),
            item: cmd.item,
            vote: confirmed.user_vote,
            vote_count: confirmed.count,
            cast_at: Timestamp::now(),
        };
        let envelope = metadata.stamp(EventEnvelope::from_event(&event)?);
        self.event_publisher.publish(envelope).await?;

        Ok(CastVoteResult {
            tally: confirmed,
            event,
        })
    }
}

/// Finds the thread that owns a votable item.
pub(crate) async fn load_thread_for(
    repository: &dyn QuestionRepository,
    item: VotableItem,
) -> Result<QuestionThread, QnaError> {
    match item {
        VotableItem::Question(id) => repository
            .find_thread(&id)
            .await?
            .ok_or_else(|| QnaError::question_not_found(id)),
        VotableItem::Answer(id) => repository
            .find_thread_by_answer(&id)
            .await?
            .ok_or_else(|| QnaError::answer_not_found(id)),
    }
}
