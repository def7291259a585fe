//! AcceptancePolicy port - who may accept or withdraw an answer.

use crate::domain::foundation::UserId;
use crate::domain::qna::{AcceptanceCapability, Question};

/// Decides the acceptance capability a user has on a question.
pub trait AcceptancePolicy: Send + Sync {
    fn capability(&self, user_id: &UserId, question: &Question) -> AcceptanceCapability;
}
