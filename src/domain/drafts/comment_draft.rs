//! Inline comment form on an answer card.
//!
//! `Closed -> Open -> Closed`. Cancel discards the text; submit hands the
//! trimmed text back to the caller and closes the form. Submitting blank
//! text does nothing and leaves the form open.

use serde::{Deserialize, Serialize};

use super::DraftError;
use crate::domain::foundation::{AnswerId, StateMachine};

/// Whether a draft panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    #[default]
    Closed,
    Open,
}

impl StateMachine for DraftStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DraftStatus::*;
        matches!((self, target), (Closed, Open) | (Open, Closed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            DraftStatus::Closed => vec![DraftStatus::Open],
            DraftStatus::Open => vec![DraftStatus::Closed],
        }
    }
}

/// A comment ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedComment {
    pub answer_id: AnswerId,
    pub text: String,
}

/// Transient comment-entry state for one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDraft {
    target: AnswerId,
    status: DraftStatus,
    text: String,
}

impl CommentDraft {
    /// A closed draft targeting `answer_id`.
    pub fn new(answer_id: AnswerId) -> Self {
        Self {
            target: answer_id,
            status: DraftStatus::Closed,
            text: String::new(),
        }
    }

    pub fn target(&self) -> &AnswerId {
        &self.target
    }

    pub fn status(&self) -> DraftStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == DraftStatus::Open
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        self.is_open() && !self.text.trim().is_empty()
    }

    /// Shows the form with empty text.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if already open
    pub fn open(&mut self) -> Result<(), DraftError> {
        self.status = self.status.transition_to(DraftStatus::Open)?;
        self.text.clear();
        Ok(())
    }

    /// Replaces the draft text.
    ///
    /// # Errors
    ///
    /// - `NotOpen` if the form is closed
    pub fn edit(&mut self, text: impl Into<String>) -> Result<(), DraftError> {
        if !self.is_open() {
            return Err(DraftError::NotOpen);
        }
        self.text = text.into();
        Ok(())
    }

    /// Hides the form and discards the text.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if already closed
    pub fn cancel(&mut self) -> Result<(), DraftError> {
        self.status = self.status.transition_to(DraftStatus::Closed)?;
        self.text.clear();
        Ok(())
    }

    /// Finalizes the comment.
    ///
    /// Returns `None` (and stays open) when the text is blank.
    ///
    /// # Errors
    ///
    /// - `NotOpen` if the form is closed
    pub fn submit(&mut self) -> Result<Option<FinalizedComment>, DraftError> {
        if !self.is_open() {
            return Err(DraftError::NotOpen);
        }

        let text = self.text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let comment = FinalizedComment {
            answer_id: self.target,
            text: text.to_string(),
        };
        self.status = self.status.transition_to(DraftStatus::Closed)?;
        self.text.clear();
        Ok(Some(comment))
    }
}
