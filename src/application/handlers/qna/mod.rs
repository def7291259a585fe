//! Question board command and query handlers.

mod accept_answer;
mod ask_question;
mod browse_articles;
mod cast_vote;
mod get_thread;
mod list_questions;
mod start_discussion;
mod submit_comment;
mod toggle_follow;
mod withdraw_acceptance;

#[cfg(test)]
mod test_support;

pub use accept_answer::{AcceptAnswerCommand, AcceptAnswerHandler, AcceptAnswerResult};
pub use ask_question::{AskQuestionCommand, AskQuestionHandler, AskQuestionResult};
pub use browse_articles::{BrowseArticlesHandler, BrowseArticlesQuery};
pub use cast_vote::{CastVoteCommand, CastVoteHandler, CastVoteResult};
pub use get_thread::{GetThreadHandler, GetThreadQuery};
pub use list_questions::{ListQuestionsHandler, ListQuestionsQuery};
pub use start_discussion::{StartDiscussionHandler, StartDiscussionResult};
pub use submit_comment::{SubmitCommentHandler, SubmitCommentResult};
pub use toggle_follow::{
    ToggleBookmarkCommand, ToggleBookmarkHandler, ToggleFollowCommand, ToggleFollowHandler,
    ToggleFollowResult,
};
pub use withdraw_acceptance::{WithdrawAcceptanceCommand, WithdrawAcceptanceHandler};
