//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, events, and error types
//! that form the vocabulary of the community domain.

mod command;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{AnswerId, ArticleId, CommentId, DiscussionId, QuestionId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
