//! Vote direction, the current user's vote, and the displayed tally.
//!
//! Voting is a pure reducer over `VoteTally`: the caller applies a
//! direction, gets a new tally back, and decides what to persist.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{AnswerId, QuestionId, ValidationError};

/// A direction the user can vote in.
///
/// "No vote" is deliberately not a direction; clearing happens by
/// voting the same direction twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Returns the string form used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VoteDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(VoteDirection::Up),
            "down" => Ok(VoteDirection::Down),
            other => Err(ValidationError::invalid_format(
                "direction",
                format!("expected 'up' or 'down', got '{}'", other),
            )),
        }
    }
}

/// The current user's vote on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserVote {
    Up,
    Down,
    #[default]
    None,
}

impl UserVote {
    /// Contribution of this vote to the item's count.
    pub fn weight(&self) -> i64 {
        match self {
            UserVote::Up => 1,
            UserVote::Down => -1,
            UserVote::None => 0,
        }
    }

    /// Returns true if the user has voted in any direction.
    pub fn is_cast(&self) -> bool {
        !matches!(self, UserVote::None)
    }

    /// The vote that results from pressing `direction` while holding `self`.
    pub fn toggled(self, direction: VoteDirection) -> UserVote {
        let pressed = UserVote::from(direction);
        if self == pressed {
            UserVote::None
        } else {
            pressed
        }
    }

    /// Returns the string form used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserVote::Up => "up",
            UserVote::Down => "down",
            UserVote::None => "none",
        }
    }
}

impl From<VoteDirection> for UserVote {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => UserVote::Up,
            VoteDirection::Down => UserVote::Down,
        }
    }
}

impl fmt::Display for UserVote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Displayed vote count together with the current user's vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    /// Net votes shown on the card.
    pub count: i64,

    /// What the current user has cast.
    #[serde(default)]
    pub user_vote: UserVote,
}

impl VoteTally {
    pub fn new(count: i64, user_vote: UserVote) -> Self {
        Self { count, user_vote }
    }

    /// Applies a vote press and returns the resulting tally.
    ///
    /// Pressing the held direction clears the vote and removes its weight;
    /// pressing the other direction moves the count by the net delta.
    pub fn applied(self, direction: VoteDirection) -> Self {
        let next = self.user_vote.toggled(direction);
        Self {
            count: self.count + next.weight() - self.user_vote.weight(),
            user_vote: next,
        }
    }

    /// Replaces the count with a backend-confirmed value, keeping the vote.
    pub fn reconcile(self, authoritative_count: i64) -> Self {
        Self {
            count: authoritative_count,
            user_vote: self.user_vote,
        }
    }
}

/// Which kind of record a vote targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VotableKind {
    Question,
    Answer,
}

/// Reference to a votable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "item_type", content = "item_id", rename_all = "lowercase")]
pub enum VotableItem {
    Question(QuestionId),
    Answer(AnswerId),
}

impl VotableItem {
    pub fn kind(&self) -> VotableKind {
        match self {
            VotableItem::Question(_) => VotableKind::Question,
            VotableItem::Answer(_) => VotableKind::Answer,
        }
    }
}

impl fmt::Display for VotableItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VotableItem::Question(id) => write!(f, "question:{}", id),
            VotableItem::Answer(id) => write!(f, "answer:{}", id),
        }
    }
}

/// A record that carries a vote tally.
pub trait Votable {
    /// Identifies the record to the backend.
    fn votable_item(&self) -> VotableItem;

    fn tally(&self) -> VoteTally;

    fn set_tally(&mut self, tally: VoteTally);

    /// Applies a vote press to the record in place and returns the new tally.
    fn apply_vote(&mut self, direction: VoteDirection) -> VoteTally {
        let next = self.tally().applied(direction);
        self.set_tally(next);
        next
    }
}
