//! Question record.
//!
//! A question is votable, followable and bookmarkable. Follow and bookmark
//! are explicit boolean fields flipped by pure reducers; the follow reducer
//! also moves the follower count.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Author;
use crate::domain::foundation::{DomainError, QuestionId, Timestamp, UserId, ValidationError};
use crate::domain::voting::{Votable, VotableItem, VoteTally};

/// Maximum number of topic tags on a question.
pub const MAX_TAGS: usize = 5;

/// Who can see a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    /// Visible to everyone.
    #[default]
    Public,
    /// Visible to signed-in community members.
    Community,
    /// Visible only to the author and invited experts.
    Private,
}

impl Privacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Privacy::Public => "public",
            Privacy::Community => "community",
            Privacy::Private => "private",
        }
    }
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Privacy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Privacy::Public),
            "community" => Ok(Privacy::Community),
            "private" => Ok(Privacy::Private),
            other => Err(ValidationError::invalid_format(
                "privacy",
                format!("unknown privacy level '{}'", other),
            )),
        }
    }
}

/// A community question.
///
/// # Invariants
///
/// - `title` is non-empty
/// - `tags` are unique, non-empty, at most `MAX_TAGS`
/// - `has_accepted_answer` mirrors the owning thread (maintained by `QuestionThread`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    author_id: UserId,
    author: Author,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    privacy: Privacy,
    #[serde(default)]
    tally: VoteTally,
    #[serde(default)]
    answer_count: u32,
    #[serde(default)]
    view_count: u32,
    #[serde(default)]
    follower_count: u32,
    #[serde(default)]
    has_accepted_answer: bool,
    #[serde(default)]
    is_following: bool,
    #[serde(default)]
    is_bookmarked: bool,
    created_at: Timestamp,
}

impl Question {
    /// Creates a freshly asked question with zeroed counters.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is empty or tags are invalid
    pub fn new(
        id: QuestionId,
        author_id: UserId,
        author: Author,
        title: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
        privacy: Privacy,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title").into());
        }

        Ok(Self {
            id,
            author_id,
            author,
            title: title.trim().to_string(),
            description: description.into(),
            tags: normalize_tags(tags)?,
            privacy,
            tally: VoteTally::default(),
            answer_count: 0,
            view_count: 0,
            follower_count: 0,
            has_accepted_answer: false,
            is_following: false,
            is_bookmarked: false,
            created_at: Timestamp::now(),
        })
    }

    /// Builder: seed display counters (sample data, backend responses).
    pub fn with_counters(mut self, tally: VoteTally, answers: u32, views: u32, followers: u32) -> Self {
        self.tally = tally;
        self.answer_count = answers;
        self.view_count = views;
        self.follower_count = followers;
        self
    }

    /// Builder: set the creation time.
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builder: whether the current user already follows the question.
    /// Does not touch the follower count.
    pub fn followed(mut self, following: bool) -> Self {
        self.is_following = following;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn privacy(&self) -> Privacy {
        self.privacy
    }

    pub fn answer_count(&self) -> u32 {
        self.answer_count
    }

    pub fn view_count(&self) -> u32 {
        self.view_count
    }

    pub fn follower_count(&self) -> u32 {
        self.follower_count
    }

    pub fn has_accepted_answer(&self) -> bool {
        self.has_accepted_answer
    }

    pub fn is_following(&self) -> bool {
        self.is_following
    }

    pub fn is_bookmarked(&self) -> bool {
        self.is_bookmarked
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Checks if the given user asked this question.
    pub fn is_asked_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reducers
    // ─────────────────────────────────────────────────────────────────────────

    /// Flips the follow flag and moves the follower count by one.
    ///
    /// Returns the new follow state.
    pub fn toggle_follow(&mut self) -> bool {
        self.is_following = !self.is_following;
        self.follower_count = if self.is_following {
            self.follower_count.saturating_add(1)
        } else {
            self.follower_count.saturating_sub(1)
        };
        self.is_following
    }

    /// Replaces the follower count with a backend-confirmed value.
    pub fn reconcile_followers(&mut self, follower_count: u32) {
        self.follower_count = follower_count;
    }

    /// Flips the local bookmark flag. Returns the new state.
    pub fn toggle_bookmark(&mut self) -> bool {
        self.is_bookmarked = !self.is_bookmarked;
        self.is_bookmarked
    }

    /// Counts a view of the question page.
    pub fn record_view(&mut self) {
        self.view_count = self.view_count.saturating_add(1);
    }

    pub(crate) fn set_has_accepted_answer(&mut self, accepted: bool) {
        self.has_accepted_answer = accepted;
    }

    pub(crate) fn set_answer_count(&mut self, count: u32) {
        self.answer_count = count;
    }
}

impl Votable for Question {
    fn votable_item(&self) -> VotableItem {
        VotableItem::Question(self.id)
    }

    fn tally(&self) -> VoteTally {
        self.tally
    }

    fn set_tally(&mut self, tally: VoteTally) {
        self.tally = tally;
    }
}

/// Trims tags, drops blanks and duplicates (first occurrence wins), and
/// enforces the tag limit.
pub(crate) fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>, ValidationError> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }

    if normalized.len() > MAX_TAGS {
        return Err(ValidationError::out_of_range(
            "tags",
            0,
            MAX_TAGS as i32,
            normalized.len() as i32,
        ));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voting::{UserVote, VoteDirection};

    fn asker() -> UserId {
        UserId::new("mike-thompson").unwrap()
    }

    fn test_question() -> Question {
        Question::new(
            QuestionId::new(),
            asker(),
            Author::new("Mike Thompson", "Project Manager"),
            "How to calculate ROI for greywater recycling?",
            "50-unit apartment complex",
            vec!["Greywater".into(), "ROI".into()],
            Privacy::Public,
        )
        .unwrap()
    }

    #[test]
    fn new_question_starts_with_zero_counters() {
        let q = test_question();
        assert_eq!(q.tally(), VoteTally::default());
        assert_eq!(q.answer_count(), 0);
        assert_eq!(q.follower_count(), 0);
        assert!(!q.has_accepted_answer());
        assert!(!q.is_following());
    }

    #[test]
    fn new_question_rejects_blank_title() {
        let result = Question::new(
            QuestionId::new(),
            asker(),
            Author::new("x", "y"),
            "   ",
            "",
            vec![],
            Privacy::Public,
        );
        assert!(result.is_err());
    }

    #[test]
    fn tags_are_deduplicated_in_order() {
        let tags = normalize_tags(vec![
            "Policy".into(),
            " Research ".into(),
            "Policy".into(),
            "".into(),
        ])
        .unwrap();
        assert_eq!(tags, vec!["Policy".to_string(), "Research".to_string()]);
    }

    #[test]
    fn more_than_five_tags_is_rejected() {
        let tags = (0..6).map(|i| format!("tag-{}", i)).collect();
        assert!(normalize_tags(tags).is_err());
    }

    #[test]
    fn toggle_follow_adjusts_followers() {
        let mut q = test_question().with_counters(VoteTally::default(), 0, 0, 12);
        assert!(q.toggle_follow());
        assert_eq!(q.follower_count(), 13);
        assert!(!q.toggle_follow());
        assert_eq!(q.follower_count(), 12);
    }

    #[test]
    fn unfollow_never_underflows() {
        let mut q = test_question();
        q.is_following = true;
        q.toggle_follow();
        assert_eq!(q.follower_count(), 0);
    }

    #[test]
    fn toggle_bookmark_is_local_flip() {
        let mut q = test_question();
        assert!(q.toggle_bookmark());
        assert!(!q.toggle_bookmark());
    }

    #[test]
    fn apply_vote_updates_question_tally() {
        let mut q = test_question().with_counters(VoteTally::new(67, UserVote::Up), 0, 0, 0);
        let tally = q.apply_vote(VoteDirection::Up);
        assert_eq!(tally, VoteTally::new(66, UserVote::None));
        assert_eq!(q.tally(), tally);
    }

    #[test]
    fn privacy_parses_and_displays() {
        assert_eq!("Community".parse::<Privacy>().unwrap(), Privacy::Community);
        assert!("friends".parse::<Privacy>().is_err());
        assert_eq!(Privacy::Private.to_string(), "private");
    }

    #[test]
    fn is_asked_by_matches_author() {
        let q = test_question();
        assert!(q.is_asked_by(&asker()));
        assert!(!q.is_asked_by(&UserId::new("someone-else").unwrap()));
    }
}
