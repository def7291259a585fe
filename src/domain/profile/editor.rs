//! Profile edit panel.
//!
//! `Viewing -> Editing -> Viewing`. Edits go to a working copy; `save`
//! commits it and `cancel` throws it away.

use serde::{Deserialize, Serialize};

use crate::domain::drafts::DraftError;
use crate::domain::foundation::StateMachine;

/// Whether the profile card is showing read-only details or the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

impl StateMachine for EditMode {
    fn can_transition_to(&self, target: &Self) -> bool {
        use EditMode::*;
        matches!((self, target), (Viewing, Editing) | (Editing, Viewing))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            EditMode::Viewing => vec![EditMode::Editing],
            EditMode::Editing => vec![EditMode::Viewing],
        }
    }
}

/// Editable public profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetails {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub specialties: Vec<String>,
}

impl ProfileDetails {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Profile card state: saved details plus a working copy while editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEditor {
    mode: EditMode,
    saved: ProfileDetails,
    working: ProfileDetails,
}

impl ProfileEditor {
    pub fn new(saved: ProfileDetails) -> Self {
        Self {
            mode: EditMode::Viewing,
            working: saved.clone(),
            saved,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn saved(&self) -> &ProfileDetails {
        &self.saved
    }

    /// What the card currently shows.
    pub fn displayed(&self) -> &ProfileDetails {
        match self.mode {
            EditMode::Viewing => &self.saved,
            EditMode::Editing => &self.working,
        }
    }

    /// Opens the edit form seeded from the saved details.
    pub fn begin_edit(&mut self) -> Result<(), DraftError> {
        self.mode = self.mode.transition_to(EditMode::Editing)?;
        self.working = self.saved.clone();
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DraftError> {
        self.working_mut()?.name = name.into();
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), DraftError> {
        self.working_mut()?.title = title.into();
        Ok(())
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) -> Result<(), DraftError> {
        self.working_mut()?.bio = bio.into();
        Ok(())
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> Result<(), DraftError> {
        self.working_mut()?.location = location.into();
        Ok(())
    }

    pub fn set_website(&mut self, website: impl Into<String>) -> Result<(), DraftError> {
        self.working_mut()?.website = website.into();
        Ok(())
    }

    pub fn set_specialties(&mut self, specialties: Vec<String>) -> Result<(), DraftError> {
        self.working_mut()?.specialties = specialties
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(())
    }

    /// Commits the working copy and returns to viewing.
    ///
    /// # Errors
    ///
    /// - `NotOpen` if not editing
    /// - `EmptyField("name")` if the name is blank; the form stays open
    pub fn save(&mut self) -> Result<&ProfileDetails, DraftError> {
        if !self.is_editing() {
            return Err(DraftError::NotOpen);
        }
        if self.working.name.trim().is_empty() {
            return Err(DraftError::EmptyField("name"));
        }

        self.mode = self.mode.transition_to(EditMode::Viewing)?;
        self.working.name = self.working.name.trim().to_string();
        self.saved = self.working.clone();
        Ok(&self.saved)
    }

    /// Discards the working copy and returns to viewing.
    pub fn cancel(&mut self) -> Result<(), DraftError> {
        self.mode = self.mode.transition_to(EditMode::Viewing)?;
        self.working = self.saved.clone();
        Ok(())
    }

    fn working_mut(&mut self) -> Result<&mut ProfileDetails, DraftError> {
        if !self.is_editing() {
            return Err(DraftError::NotOpen);
        }
        Ok(&mut self.working)
    }
}
