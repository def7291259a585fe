//! Shared fakes for handler tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::adapters::{InMemoryQuestionRepository, SampleCatalog};
use crate::domain::drafts::QuestionSubmission;
use crate::domain::foundation::{
    AnswerId, CommandMetadata, DomainError, ErrorCode, EventEnvelope, QuestionId, UserId,
};
use crate::domain::qna::{Author, Question};
use crate::domain::voting::{UserVote, VotableItem};
use crate::ports::{BackendError, CommunityBackend, EventPublisher};

/// Backend that answers every call with canned values or a canned error.
pub struct StubBackend {
    pub vote_count: i64,
    pub follower_count: u32,
    pub comment_count: u32,
    failure: Option<BackendError>,
    calls: Mutex<Vec<String>>,
}

impl StubBackend {
    pub fn ok() -> Self {
        Self {
            vote_count: 0,
            follower_count: 0,
            comment_count: 0,
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: BackendError) -> Self {
        Self {
            failure: Some(err),
            ..Self::ok()
        }
    }

    pub fn with_vote_count(mut self, count: i64) -> Self {
        self.vote_count = count;
        self
    }

    pub fn with_follower_count(mut self, count: u32) -> Self {
        self.follower_count = count;
        self
    }

    pub fn with_comment_count(mut self, count: u32) -> Self {
        self.comment_count = count;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CommunityBackend for StubBackend {
    async fn submit_vote(&self, item: VotableItem, vote: UserVote) -> Result<i64, BackendError> {
        self.record(format!("vote {} {}", item, vote.as_str()))?;
        Ok(self.vote_count)
    }

    async fn submit_follow(&self, question_id: QuestionId, follow: bool) -> Result<u32, BackendError> {
        self.record(format!("follow {} {}", question_id, follow))?;
        Ok(self.follower_count)
    }

    async fn submit_accepted_answer(
        &self,
        question_id: QuestionId,
        answer_id: AnswerId,
    ) -> Result<(), BackendError> {
        self.record(format!("accept {} {}", question_id, answer_id))
    }

    async fn withdraw_accepted_answer(
        &self,
        question_id: QuestionId,
        answer_id: AnswerId,
    ) -> Result<(), BackendError> {
        self.record(format!("withdraw {} {}", question_id, answer_id))
    }

    async fn submit_comment(&self, answer_id: AnswerId, text: &str) -> Result<u32, BackendError> {
        self.record(format!("comment {} {}", answer_id, text))?;
        Ok(self.comment_count)
    }

    async fn submit_new_question(
        &self,
        submission: QuestionSubmission,
        author_id: &UserId,
        author: &Author,
    ) -> Result<Question, BackendError> {
        self.record(format!("ask {}", submission.title))?;
        Question::new(
            QuestionId::new(),
            author_id.clone(),
            author.clone(),
            submission.title,
            submission.description,
            submission.tags,
            submission.privacy,
        )
        .map_err(|e| BackendError::validation(e.message))
    }
}

/// Publisher that records envelopes, optionally failing.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<EventEnvelope>>,
    fail: bool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<EventEnvelope> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_types(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.event_type).collect()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::new(ErrorCode::InternalError, "publish failed"));
        }
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// A repository loaded with the built-in catalog.
pub fn seeded_board() -> (Arc<InMemoryQuestionRepository>, SampleCatalog) {
    let catalog = SampleCatalog::builtin().unwrap();
    let repo = Arc::new(InMemoryQuestionRepository::with_threads(catalog.threads.clone()));
    (repo, catalog)
}

pub fn metadata(user: &str) -> CommandMetadata {
    CommandMetadata::new(UserId::new(user).unwrap()).with_correlation_id("test-correlation")
}
