//! Acceptance policy adapters.

use crate::domain::foundation::UserId;
use crate::domain::qna::{AcceptanceCapability, Question};
use crate::ports::AcceptancePolicy;

/// Only the asker may accept. Withdrawal is granted to the asker when
/// `allow_withdrawal` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorAcceptancePolicy {
    allow_withdrawal: bool,
}

impl AuthorAcceptancePolicy {
    pub fn new(allow_withdrawal: bool) -> Self {
        Self { allow_withdrawal }
    }
}

impl AcceptancePolicy for AuthorAcceptancePolicy {
    fn capability(&self, user_id: &UserId, question: &Question) -> AcceptanceCapability {
        if !question.is_asked_by(user_id) {
            return AcceptanceCapability::none();
        }
        if self.allow_withdrawal {
            AcceptanceCapability::full()
        } else {
            AcceptanceCapability::accept_only()
        }
    }
}
