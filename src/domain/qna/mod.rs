//! Q&A domain module.
//!
//! Questions, answers, and the thread aggregate that owns the
//! single-accepted-answer rule.
//!
//! # Events
//!
//! - `VoteCast` - The user's vote on a question or answer changed
//! - `FollowToggled` - The user followed or unfollowed a question
//! - `AnswerAccepted` - An answer became the accepted solution
//! - `AcceptanceWithdrawn` - The asker withdrew acceptance
//! - `CommentSubmitted` - A comment was added to an answer
//! - `QuestionAsked` - A new question was posted
//! - `DiscussionStarted` - A new forum discussion was posted

mod acceptance;
mod answer;
mod author;
mod errors;
mod events;
mod question;
mod thread;

pub use acceptance::{accept_in, accepted_in, withdraw_in, AcceptanceCapability, AcceptanceChange};
pub use answer::Answer;
pub use author::Author;
pub use errors::QnaError;
pub use events::{
    AcceptanceWithdrawn, AnswerAccepted, CommentSubmitted, DiscussionStarted, FollowToggled,
    QuestionAsked, VoteCast,
};
pub use question::{Privacy, Question, MAX_TAGS};
pub use thread::QuestionThread;
