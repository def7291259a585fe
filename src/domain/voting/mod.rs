//! Voting domain module.
//!
//! Tracks a single user's vote on questions and answers and the count
//! shown next to the arrows.

mod vote;

pub use vote::{UserVote, Votable, VotableItem, VotableKind, VoteDirection, VoteTally};
