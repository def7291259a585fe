//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `voting` - Vote direction and the displayed tally
//! - `qna` - Questions, answers, and the single-accepted-answer rule
//! - `drafts` - Comment box and ask-question form state
//! - `profile` - Member profile card with view/edit modes
//! - `catalog` - Knowledge-hub articles, categories, and search filters

pub mod catalog;
pub mod drafts;
pub mod foundation;
pub mod profile;
pub mod qna;
pub mod voting;
