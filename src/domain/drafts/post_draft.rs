//! "Start New Discussion" form on the community forum.
//!
//! Rides the same `Closed <-> Open` machine as the comment box. Hiding the
//! form keeps whatever was typed; only a successful post clears it.

use serde::{Deserialize, Serialize};

use super::{DraftError, DraftStatus};
use crate::domain::foundation::StateMachine;

/// A forum post ready to be published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    pub title: String,
    pub content: String,
}

/// Transient state of the new-discussion form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPostDraft {
    status: DraftStatus,
    title: String,
    content: String,
}

impl NewPostDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> DraftStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == DraftStatus::Open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The "Start New Discussion" button: shows the form if hidden and
    /// hides it if showing.
    pub fn toggle(&mut self) {
        self.status = match self.status {
            DraftStatus::Closed => DraftStatus::Open,
            DraftStatus::Open => DraftStatus::Closed,
        };
    }

    /// Shows the form.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if already open
    pub fn open(&mut self) -> Result<(), DraftError> {
        self.status = self.status.transition_to(DraftStatus::Open)?;
        Ok(())
    }

    /// Hides the form. Typed fields are kept.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if already closed
    pub fn cancel(&mut self) -> Result<(), DraftError> {
        self.status = self.status.transition_to(DraftStatus::Closed)?;
        Ok(())
    }

    /// # Errors
    ///
    /// - `NotOpen` if the form is hidden
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), DraftError> {
        if !self.is_open() {
            return Err(DraftError::NotOpen);
        }
        self.title = title.into();
        Ok(())
    }

    /// # Errors
    ///
    /// - `NotOpen` if the form is hidden
    pub fn set_content(&mut self, content: impl Into<String>) -> Result<(), DraftError> {
        if !self.is_open() {
            return Err(DraftError::NotOpen);
        }
        self.content = content.into();
        Ok(())
    }

    /// Whether the Post button does anything.
    pub fn can_submit(&self) -> bool {
        self.is_open() && !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }

    /// Produces the post, clears both fields and hides the form.
    ///
    /// # Errors
    ///
    /// - `NotOpen` if the form is hidden
    /// - `EmptyField("title")` or `EmptyField("content")` if blank; the
    ///   form stays open with its text
    pub fn submit(&mut self) -> Result<ForumPost, DraftError> {
        if !self.is_open() {
            return Err(DraftError::NotOpen);
        }
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyField("title"));
        }
        if self.content.trim().is_empty() {
            return Err(DraftError::EmptyField("content"));
        }

        self.status = self.status.transition_to(DraftStatus::Closed)?;
        let title = std::mem::take(&mut self.title);
        let content = std::mem::take(&mut self.content);
        Ok(ForumPost {
            title: title.trim().to_string(),
            content: content.trim().to_string(),
        })
    }
}
