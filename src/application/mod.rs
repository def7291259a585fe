//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers apply changes optimistically and reconcile with the
//! community backend; query handlers only read the board.

pub mod handlers;

pub use handlers::{
    AcceptAnswerCommand, AcceptAnswerHandler, AcceptAnswerResult, AskQuestionCommand,
    AskQuestionHandler, AskQuestionResult, BrowseArticlesHandler, BrowseArticlesQuery,
    CastVoteCommand, CastVoteHandler, CastVoteResult, GetThreadHandler, GetThreadQuery,
    ListQuestionsHandler, ListQuestionsQuery, StartDiscussionHandler, StartDiscussionResult,
    SubmitCommentHandler, SubmitCommentResult,
    ToggleBookmarkCommand, ToggleBookmarkHandler, ToggleFollowCommand, ToggleFollowHandler,
    ToggleFollowResult, WithdrawAcceptanceCommand, WithdrawAcceptanceHandler,
};
