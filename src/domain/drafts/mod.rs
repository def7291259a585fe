//! Draft domain module.
//!
//! Transient form state that exists only while its panel is open: the
//! inline comment box on an answer, the ask-question modal, and the
//! new-discussion form on the forum.

mod comment_draft;
mod errors;
mod post_draft;
mod question_draft;

pub use comment_draft::{CommentDraft, DraftStatus, FinalizedComment};
pub use errors::DraftError;
pub use post_draft::{ForumPost, NewPostDraft};
pub use question_draft::{
    NewQuestionDraft, QuestionSubmission, MAX_VISIBLE_SUGGESTIONS, SUGGESTED_TAGS,
};
