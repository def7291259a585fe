//! "Ask a Question" form state, including the tag editor.

use serde::{Deserialize, Serialize};

use super::DraftError;
use crate::domain::qna::{Privacy, MAX_TAGS};

/// Topic suggestions offered under the tag input.
pub const SUGGESTED_TAGS: [&str; 10] = [
    "Water Conservation",
    "Rainwater Harvesting",
    "Greywater Systems",
    "Smart Irrigation",
    "Industrial Water",
    "Community Projects",
    "Technology",
    "Policy",
    "Research",
    "Implementation",
];

/// How many unchosen suggestions are shown at once.
pub const MAX_VISIBLE_SUGGESTIONS: usize = 6;

/// What the form hands to the backend on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSubmission {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub privacy: Privacy,
}

/// Transient state of the ask-question modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestionDraft {
    title: String,
    description: String,
    tags: Vec<String>,
    privacy: Privacy,
    /// Contents of the tag input box.
    pending_tag: String,
}

impl NewQuestionDraft {
    pub fn new() -> Self {
        Self::default()
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

    pub fn pending_tag(&self) -> &str {
        &self.pending_tag
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_privacy(&mut self, privacy: Privacy) {
        self.privacy = privacy;
    }

    pub fn set_pending_tag(&mut self, tag: impl Into<String>) {
        self.pending_tag = tag.into();
    }

    /// Whether `tag` could be added right now (the "+" button state).
    pub fn can_add_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        !tag.is_empty() && self.tags.len() < MAX_TAGS && !self.tags.iter().any(|t| t == tag)
    }

    /// Adds a tag. Empty, duplicate, or over-limit tags are ignored.
    ///
    /// Returns true if the tag was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if !self.can_add_tag(tag) {
            return false;
        }
        self.tags.push(tag.trim().to_string());
        true
    }

    /// Removes a tag if present. Returns true if something was removed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Adds the tag typed into the input box and clears the box
    /// (Enter key or "+" button).
    pub fn commit_pending_tag(&mut self) -> bool {
        let pending = std::mem::take(&mut self.pending_tag);
        self.add_tag(&pending)
    }

    /// The first few suggestions that are not already chosen.
    pub fn available_suggestions(&self) -> Vec<&'static str> {
        SUGGESTED_TAGS
            .iter()
            .copied()
            .filter(|s| !self.tags.iter().any(|t| t == s))
            .take(MAX_VISIBLE_SUGGESTIONS)
            .collect()
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Produces the submission and resets the form.
    ///
    /// # Errors
    ///
    /// - `EmptyField("title")` if the title is blank; the draft is left intact
    pub fn submit(&mut self) -> Result<QuestionSubmission, DraftError> {
        if !self.can_submit() {
            return Err(DraftError::EmptyField("title"));
        }

        let draft = std::mem::take(self);
        Ok(QuestionSubmission {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            tags: draft.tags,
            privacy: draft.privacy,
        })
    }
}
