//! Answer record.

use serde::{Deserialize, Serialize};

use super::Author;
use crate::domain::foundation::{AnswerId, DomainError, QuestionId, Timestamp, ValidationError};
use crate::domain::voting::{Votable, VotableItem, VoteTally};

/// An answer to a question.
///
/// Owned by exactly one question (`question_id`). The accepted flag is only
/// changed through `QuestionThread`, which keeps at most one answer accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    id: AnswerId,
    question_id: QuestionId,
    author: Author,
    content: String,
    #[serde(default)]
    tally: VoteTally,
    #[serde(default)]
    is_accepted: bool,
    #[serde(default)]
    comment_count: u32,
    #[serde(default)]
    is_authored_by_current_user: bool,
    created_at: Timestamp,
}

impl Answer {
    /// Creates a new, unaccepted answer.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is blank
    pub fn new(
        id: AnswerId,
        question_id: QuestionId,
        author: Author,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content").into());
        }

        Ok(Self {
            id,
            question_id,
            author,
            content,
            tally: VoteTally::default(),
            is_accepted: false,
            comment_count: 0,
            is_authored_by_current_user: false,
            created_at: Timestamp::now(),
        })
    }

    /// Builder: seed vote tally and comment count.
    pub fn with_counters(mut self, tally: VoteTally, comments: u32) -> Self {
        self.tally = tally;
        self.comment_count = comments;
        self
    }

    /// Builder: set the creation time.
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builder: mark as the accepted solution. `QuestionThread::from_parts`
    /// still enforces that at most one answer carries the flag.
    pub fn accepted(mut self, accepted: bool) -> Self {
        self.is_accepted = accepted;
        self
    }

    /// Builder: mark as written by the current user.
    pub fn authored_by_current_user(mut self) -> Self {
        self.is_authored_by_current_user = true;
        self
    }

    pub fn id(&self) -> &AnswerId {
        &self.id
    }

    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_accepted(&self) -> bool {
        self.is_accepted
    }

    pub fn comment_count(&self) -> u32 {
        self.comment_count
    }

    pub fn is_authored_by_current_user(&self) -> bool {
        self.is_authored_by_current_user
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Replaces the comment count with a backend-confirmed value.
    pub fn reconcile_comments(&mut self, comment_count: u32) {
        self.comment_count = comment_count;
    }

    pub(crate) fn set_accepted(&mut self, accepted: bool) {
        self.is_accepted = accepted;
    }
}

impl Votable for Answer {
    fn votable_item(&self) -> VotableItem {
        VotableItem::Answer(self.id)
    }

    fn tally(&self) -> VoteTally {
        self.tally
    }

    fn set_tally(&mut self, tally: VoteTally) {
        self.tally = tally;
    }
}
