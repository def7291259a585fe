//! Command metadata carried through every handler.
//!
//! Handlers accept a single `CommandMetadata` instead of loose
//! `user_id` / `correlation_id` parameters, and stamp it onto the
//! events they publish.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EventEnvelope, UserId};

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user performing the interaction.
    pub user_id: UserId,

    /// Links related operations across a single user interaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for the given user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, generating one if absent.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Stamps correlation and user context onto an outgoing event.
    pub fn stamp(&self, envelope: EventEnvelope) -> EventEnvelope {
        envelope
            .with_correlation_id(self.correlation_id())
            .with_user_id(self.user_id.to_string())
    }
}
