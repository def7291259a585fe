//! Signed-in user configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::UserId;
use crate::domain::qna::Author;

/// Who the local session acts as
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_user_id")]
    pub current_user_id: String,

    #[serde(default = "default_display_name")]
    pub display_name: String,

    #[serde(default = "default_title")]
    pub title: String,
}

impl SessionConfig {
    pub fn user_id(&self) -> Result<UserId, ValidationError> {
        UserId::new(self.current_user_id.clone()).map_err(|_| ValidationError::InvalidUserId)
    }

    /// Byline used on questions the session posts
    pub fn author(&self) -> Author {
        Author::new(self.display_name.clone(), self.title.clone())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.user_id()?;
        if self.display_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SESSION__DISPLAY_NAME"));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            current_user_id: default_user_id(),
            display_name: default_display_name(),
            title: default_title(),
        }
    }
}

fn default_user_id() -> String {
    "sarah-chen".to_string()
}

fn default_display_name() -> String {
    "Dr. Sarah Chen".to_string()
}

fn default_title() -> String {
    "Water Systems Engineer".to_string()
}
