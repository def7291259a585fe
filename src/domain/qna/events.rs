//! Q&A domain events.
//!
//! Published after a handler has applied a change locally and the
//! backend confirmed it. Events use the question as aggregate, except
//! `DiscussionStarted` which belongs to the new forum discussion.

use serde::{Deserialize, Serialize};

use super::Privacy;
use crate::domain::foundation::{
    domain_event, AnswerId, DiscussionId, EventId, QuestionId, Timestamp, UserId,
};
use crate::domain::voting::{UserVote, VotableItem};

// ════════════════════════════════════════════════════════════════════════════
// VoteCast
// ════════════════════════════════════════════════════════════════════════════

/// Published when the user's vote on a question or answer changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteCast {
    pub event_id: EventId,
    pub question_id: QuestionId,
    pub item: VotableItem,
    /// The vote now held (`none` when cleared).
    pub vote: UserVote,
    /// Backend-confirmed count.
    pub vote_count: i64,
    pub cast_at: Timestamp,
}

domain_event!(
    VoteCast,
    event_type = "qna.vote_cast.v1",
    aggregate_id = question_id,
    aggregate_type = "Question",
    occurred_at = cast_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// FollowToggled
// ════════════════════════════════════════════════════════════════════════════

/// Published when the user follows or unfollows a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowToggled {
    pub event_id: EventId,
    pub question_id: QuestionId,
    pub following: bool,
    pub follower_count: u32,
    pub toggled_at: Timestamp,
}

domain_event!(
    FollowToggled,
    event_type = "qna.follow_toggled.v1",
    aggregate_id = question_id,
    aggregate_type = "Question",
    occurred_at = toggled_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AnswerAccepted / AcceptanceWithdrawn
// ════════════════════════════════════════════════════════════════════════════

/// Published when an answer becomes the accepted solution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerAccepted {
    pub event_id: EventId,
    pub question_id: QuestionId,
    pub answer_id: AnswerId,
    pub previously_accepted: Option<AnswerId>,
    pub accepted_by: UserId,
    pub accepted_at: Timestamp,
}

domain_event!(
    AnswerAccepted,
    event_type = "qna.answer_accepted.v1",
    aggregate_id = question_id,
    aggregate_type = "Question",
    occurred_at = accepted_at,
    event_id = event_id
);

/// Published when the asker withdraws acceptance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptanceWithdrawn {
    pub event_id: EventId,
    pub question_id: QuestionId,
    pub answer_id: AnswerId,
    pub withdrawn_by: UserId,
    pub withdrawn_at: Timestamp,
}

domain_event!(
    AcceptanceWithdrawn,
    event_type = "qna.acceptance_withdrawn.v1",
    aggregate_id = question_id,
    aggregate_type = "Question",
    occurred_at = withdrawn_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// CommentSubmitted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a comment on an answer is accepted by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentSubmitted {
    pub event_id: EventId,
    pub question_id: QuestionId,
    pub answer_id: AnswerId,
    pub text: String,
    pub comment_count: u32,
    pub submitted_at: Timestamp,
}

domain_event!(
    CommentSubmitted,
    event_type = "qna.comment_submitted.v1",
    aggregate_id = question_id,
    aggregate_type = "Question",
    occurred_at = submitted_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// QuestionAsked
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new question lands on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionAsked {
    pub event_id: EventId,
    pub question_id: QuestionId,
    pub author_id: UserId,
    pub title: String,
    pub tags: Vec<String>,
    pub privacy: Privacy,
    pub asked_at: Timestamp,
}

domain_event!(
    QuestionAsked,
    event_type = "qna.question_asked.v1",
    aggregate_id = question_id,
    aggregate_type = "Question",
    occurred_at = asked_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// DiscussionStarted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new forum discussion is posted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionStarted {
    pub event_id: EventId,
    pub discussion_id: DiscussionId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub started_at: Timestamp,
}

domain_event!(
    DiscussionStarted,
    event_type = "qna.discussion_started.v1",
    aggregate_id = discussion_id,
    aggregate_type = "Discussion",
    occurred_at = started_at,
    event_id = event_id
);
