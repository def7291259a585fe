//! In-process community backend.
//!
//! Keeps authoritative counters for one user's session, seeded from a
//! sample catalog. Every call is logged. Switching it offline makes every
//! call fail with a network error, which is how the optimistic-revert
//! paths are exercised without a server.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::adapters::seed::SampleCatalog;
use crate::domain::drafts::QuestionSubmission;
use crate::domain::foundation::{AnswerId, QuestionId, UserId};
use crate::domain::qna::{Author, Question};
use crate::domain::voting::{UserVote, Votable, VotableItem};
use crate::ports::{BackendError, CommunityBackend};

#[derive(Debug, Default)]
struct BackendState {
    votes: HashMap<VotableItem, (i64, UserVote)>,
    followers: HashMap<QuestionId, (u32, bool)>,
    answers_by_question: HashMap<QuestionId, HashSet<AnswerId>>,
    accepted: HashMap<QuestionId, AnswerId>,
    comments: HashMap<AnswerId, u32>,
}

/// Community backend held in memory.
#[derive(Debug, Default)]
pub struct InMemoryCommunityBackend {
    state: RwLock<BackendState>,
    offline: AtomicBool,
}

impl InMemoryCommunityBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds authoritative counters from a catalog.
    pub fn from_catalog(catalog: &SampleCatalog) -> Self {
        let mut state = BackendState::default();
        for thread in &catalog.threads {
            let question = thread.question();
            let qid = *question.id();
            let tally = question.tally();
            state
                .votes
                .insert(question.votable_item(), (tally.count, tally.user_vote));
            state
                .followers
                .insert(qid, (question.follower_count(), question.is_following()));

            let ids = state.answers_by_question.entry(qid).or_default();
            for answer in thread.answers() {
                ids.insert(*answer.id());
            }
            for answer in thread.answers() {
                let tally = answer.tally();
                state
                    .votes
                    .insert(answer.votable_item(), (tally.count, tally.user_vote));
                state.comments.insert(*answer.id(), answer.comment_count());
                if answer.is_accepted() {
                    state.accepted.insert(qid, *answer.id());
                }
            }
        }

        Self {
            state: RwLock::new(state),
            offline: AtomicBool::new(false),
        }
    }

    /// While offline every call fails with `BackendError::Network`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
        tracing::info!(offline, "community backend connectivity changed");
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    /// Authoritative accepted answer for a question.
    pub async fn accepted_answer(&self, question_id: &QuestionId) -> Option<AnswerId> {
        self.state.read().await.accepted.get(question_id).copied()
    }

    /// Authoritative vote count for an item.
    pub async fn vote_count(&self, item: &VotableItem) -> Option<i64> {
        self.state.read().await.votes.get(item).map(|(count, _)| *count)
    }

    fn ensure_online(&self, operation: &'static str) -> Result<(), BackendError> {
        if self.is_offline() {
            tracing::warn!(operation, "community backend offline");
            return Err(BackendError::network("community backend is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl CommunityBackend for InMemoryCommunityBackend {
    async fn submit_vote(&self, item: VotableItem, vote: UserVote) -> Result<i64, BackendError> {
        self.ensure_online("submit_vote")?;
        let mut state = self.state.write().await;
        let entry = state.votes.entry(item).or_insert((0, UserVote::None));
        entry.0 += vote.weight() - entry.1.weight();
        entry.1 = vote;
        tracing::info!(%item, vote = vote.as_str(), vote_count = entry.0, "vote recorded");
        Ok(entry.0)
    }

    async fn submit_follow(
        &self,
        question_id: QuestionId,
        follow: bool,
    ) -> Result<u32, BackendError> {
        self.ensure_online("submit_follow")?;
        let mut state = self.state.write().await;
        let entry = state.followers.entry(question_id).or_insert((0, false));
        if entry.1 != follow {
            entry.0 = if follow {
                entry.0.saturating_add(1)
            } else {
                entry.0.saturating_sub(1)
            };
            entry.1 = follow;
        }
        tracing::info!(%question_id, follow, follower_count = entry.0, "follow recorded");
        Ok(entry.0)
    }

    async fn submit_accepted_answer(
        &self,
        question_id: QuestionId,
        answer_id: AnswerId,
    ) -> Result<(), BackendError> {
        self.ensure_online("submit_accepted_answer")?;
        let mut state = self.state.write().await;
        let belongs = state
            .answers_by_question
            .get(&question_id)
            .is_some_and(|ids| ids.contains(&answer_id));
        if !belongs {
            return Err(BackendError::not_found(format!(
                "answer {} on question {}",
                answer_id, question_id
            )));
        }
        state.accepted.insert(question_id, answer_id);
        tracing::info!(%question_id, %answer_id, "accepted answer recorded");
        Ok(())
    }

    async fn withdraw_accepted_answer(
        &self,
        question_id: QuestionId,
        answer_id: AnswerId,
    ) -> Result<(), BackendError> {
        self.ensure_online("withdraw_accepted_answer")?;
        let mut state = self.state.write().await;
        match state.accepted.get(&question_id) {
            Some(current) if *current == answer_id => {
                state.accepted.remove(&question_id);
                tracing::info!(%question_id, %answer_id, "accepted answer withdrawn");
                Ok(())
            }
            _ => Err(BackendError::conflict(format!(
                "answer {} is not the accepted answer",
                answer_id
            ))),
        }
    }

    async fn submit_comment(&self, answer_id: AnswerId, text: &str) -> Result<u32, BackendError> {
        self.ensure_online("submit_comment")?;
        if text.trim().is_empty() {
            return Err(BackendError::validation("comment text is empty"));
        }
        let mut state = self.state.write().await;
        let count = state.comments.entry(answer_id).or_insert(0);
        *count = count.saturating_add(1);
        tracing::info!(%answer_id, comment_count = *count, chars = text.len(), "comment recorded");
        Ok(*count)
    }

    async fn submit_new_question(
        &self,
        submission: QuestionSubmission,
        author_id: &UserId,
        author: &Author,
    ) -> Result<Question, BackendError> {
        self.ensure_online("submit_new_question")?;
        let question = Question::new(
            QuestionId::new(),
            author_id.clone(),
            author.clone(),
            submission.title,
            submission.description,
            submission.tags,
            submission.privacy,
        )
        .map_err(|e| BackendError::validation(e.message))?;

        let mut state = self.state.write().await;
        let qid = *question.id();
        state.votes.insert(question.votable_item(), (0, UserVote::None));
        state.followers.insert(qid, (0, false));
        state.answers_by_question.insert(qid, HashSet::new());
        tracing::info!(
            question_id = %qid,
            author_id = %author_id,
            title = %question.title(),
            "question recorded"
        );
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::qna::Privacy;

    fn seeded() -> (InMemoryCommunityBackend, SampleCatalog) {
        let catalog = SampleCatalog::builtin().unwrap();
        (InMemoryCommunityBackend::from_catalog(&catalog), catalog)
    }

    #[tokio::test]
    async fn vote_changes_are_relative_to_previous_vote() {
        let (backend, catalog) = seeded();
        // Seeded at 67 with the user's up vote.
        let item = catalog.threads[1].question().votable_item();

        assert_eq!(backend.submit_vote(item, UserVote::None).await.unwrap(), 66);
        assert_eq!(backend.submit_vote(item, UserVote::Down).await.unwrap(), 65);
        assert_eq!(backend.submit_vote(item, UserVote::Up).await.unwrap(), 67);
    }

    #[tokio::test]
    async fn repeated_follow_is_idempotent() {
        let (backend, catalog) = seeded();
        let qid = *catalog.threads[0].id();

        assert_eq!(backend.submit_follow(qid, true).await.unwrap(), 13);
        assert_eq!(backend.submit_follow(qid, true).await.unwrap(), 13);
        assert_eq!(backend.submit_follow(qid, false).await.unwrap(), 12);
    }

    #[tokio::test]
    async fn accepting_foreign_answer_is_not_found() {
        let (backend, catalog) = seeded();
        let roi = *catalog.threads[0].id();
        let foreign = *catalog.threads[1].answers()[0].id();

        let err = backend.submit_accepted_answer(roi, foreign).await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound(_)));
    }

    #[tokio::test]
    async fn accept_then_withdraw() {
        let (backend, catalog) = seeded();
        let thread = &catalog.threads[0];
        let answer = *thread.answers()[0].id();

        backend.submit_accepted_answer(*thread.id(), answer).await.unwrap();
        assert_eq!(backend.accepted_answer(thread.id()).await, Some(answer));

        backend.withdraw_accepted_answer(*thread.id(), answer).await.unwrap();
        assert_eq!(backend.accepted_answer(thread.id()).await, None);

        let err = backend
            .withdraw_accepted_answer(*thread.id(), answer)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Conflict(_)));
    }

    #[tokio::test]
    async fn comment_increments_count() {
        let (backend, catalog) = seeded();
        let answer = *catalog.threads[0].answers()[0].id();
        assert_eq!(backend.submit_comment(answer, "Useful, thanks").await.unwrap(), 4);
    }

    #[tokio::test]
    async fn offline_backend_fails_with_network_error() {
        let (backend, catalog) = seeded();
        backend.set_offline(true);

        let err = backend
            .submit_follow(*catalog.threads[0].id(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Network(_)));
        assert!(err.is_retryable());

        backend.set_offline(false);
        assert!(backend.submit_follow(*catalog.threads[0].id(), true).await.is_ok());
    }

    #[tokio::test]
    async fn new_question_gets_fresh_id_and_zero_counters() {
        let backend = InMemoryCommunityBackend::new();
        let submission = QuestionSubmission {
            title: "Cistern overflow routing?".to_string(),
            description: String::new(),
            tags: vec!["Rainwater Harvesting".to_string()],
            privacy: Privacy::Community,
        };
        let author_id = UserId::new("sarah-chen").unwrap();
        let author = Author::new("Dr. Sarah Chen", "Water Systems Engineer");

        let question = backend
            .submit_new_question(submission, &author_id, &author)
            .await
            .unwrap();

        assert_eq!(question.title(), "Cistern overflow routing?");
        assert_eq!(question.tally().count, 0);
        assert_eq!(question.privacy(), Privacy::Community);
        assert_eq!(backend.vote_count(&question.votable_item()).await, Some(0));
    }
}
