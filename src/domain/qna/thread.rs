//! Question thread aggregate.
//!
//! A thread is a question plus the answers it owns. It is the only place
//! the accepted-answer invariant is enforced, and it keeps the question's
//! `has_accepted_answer` flag in step with the answers.

use serde::{Deserialize, Serialize};

use super::acceptance::{accept_in, accepted_in, withdraw_in};
use super::{AcceptanceCapability, AcceptanceChange, Answer, QnaError, Question};
use crate::domain::foundation::{AnswerId, QuestionId};
use crate::domain::voting::{Votable, VotableItem};

/// A question together with its answers.
///
/// # Invariants
///
/// - every answer's `question_id` equals the question's id
/// - at most one answer is accepted
/// - `question.has_accepted_answer()` iff an answer is accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionThread {
    question: Question,
    answers: Vec<Answer>,
}

impl QuestionThread {
    /// A thread with no answers yet.
    pub fn new(mut question: Question) -> Self {
        question.set_has_accepted_answer(false);
        Self {
            question,
            answers: Vec::new(),
        }
    }

    /// Assembles a thread from stored records, checking the invariants.
    ///
    /// The question's accepted flag is re-derived from the answers, and its
    /// answer count is raised to at least the number of loaded answers.
    ///
    /// # Errors
    ///
    /// - `Conflict` if more than one answer is accepted
    /// - `ValidationFailed` if an answer belongs to another question
    pub fn from_parts(mut question: Question, answers: Vec<Answer>) -> Result<Self, QnaError> {
        if let Some(stray) = answers.iter().find(|a| a.question_id() != question.id()) {
            return Err(QnaError::validation(
                "answers",
                format!("answer {} belongs to question {}", stray.id(), stray.question_id()),
            ));
        }

        let accepted = answers.iter().filter(|a| a.is_accepted()).count();
        if accepted > 1 {
            return Err(QnaError::conflict(format!(
                "question {} has {} accepted answers",
                question.id(),
                accepted
            )));
        }

        question.set_has_accepted_answer(accepted == 1);
        let loaded = answers.len() as u32;
        if question.answer_count() < loaded {
            question.set_answer_count(loaded);
        }
        Ok(Self { question, answers })
    }

    pub fn id(&self) -> &QuestionId {
        self.question.id()
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Mutable access for question-level reducers (follow, bookmark, vote).
    pub fn question_mut(&mut self) -> &mut Question {
        &mut self.question
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn answer(&self, answer_id: &AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id() == answer_id)
    }

    /// Mutable access to one answer.
    ///
    /// # Errors
    ///
    /// - `AnswerNotFound` if the answer is not in this thread
    pub fn answer_mut(&mut self, answer_id: &AnswerId) -> Result<&mut Answer, QnaError> {
        self.answers
            .iter_mut()
            .find(|a| a.id() == answer_id)
            .ok_or_else(|| QnaError::answer_not_found(*answer_id))
    }

    pub fn contains_answer(&self, answer_id: &AnswerId) -> bool {
        self.answer(answer_id).is_some()
    }

    pub fn accepted_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_accepted())
    }

    /// Resolves a votable reference to the record in this thread.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` / `AnswerNotFound` if the item is not in this thread
    pub fn votable_mut(&mut self, item: VotableItem) -> Result<&mut dyn Votable, QnaError> {
        match item {
            VotableItem::Question(id) if &id == self.question.id() => Ok(&mut self.question),
            VotableItem::Question(id) => Err(QnaError::question_not_found(id)),
            VotableItem::Answer(id) => Ok(self.answer_mut(&id)?),
        }
    }

    /// Adds a posted answer to the thread.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the answer belongs to another question
    /// - `Conflict` if the answer id is already present
    #[cfg(test)]
    pub(crate) fn add_answer(&mut self, mut answer: Answer) -> Result<(), QnaError> {
        if answer.question_id() != self.question.id() {
            return Err(QnaError::validation(
                "question_id",
                "answer belongs to a different question",
            ));
        }
        if self.contains_answer(answer.id()) {
            return Err(QnaError::conflict(format!("answer {} already posted", answer.id())));
        }

        answer.set_accepted(false);
        self.answers.push(answer);
        let count = self.question.answer_count().saturating_add(1);
        self.question.set_answer_count(count);
        Ok(())
    }

    /// Marks an answer as the accepted solution.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the capability does not allow accepting
    /// - `AnswerNotFound` if the answer is not in this thread
    pub fn accept_answer(
        &mut self,
        answer_id: AnswerId,
        capability: AcceptanceCapability,
    ) -> Result<AcceptanceChange, QnaError> {
        if !capability.can_accept {
            return Err(QnaError::forbidden("only the asker can accept an answer"));
        }

        let change = accept_in(&mut self.answers, answer_id)?;
        self.sync_accepted_flag();
        Ok(change)
    }

    /// Withdraws acceptance from an answer.
    ///
    /// Returns false when the answer was not accepted.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the capability does not allow withdrawing
    /// - `AnswerNotFound` if the answer is not in this thread
    pub fn withdraw_acceptance(
        &mut self,
        answer_id: AnswerId,
        capability: AcceptanceCapability,
    ) -> Result<bool, QnaError> {
        if !capability.can_unaccept {
            return Err(QnaError::forbidden("withdrawing an accepted answer is not allowed"));
        }

        let changed = withdraw_in(&mut self.answers, answer_id)?;
        self.sync_accepted_flag();
        Ok(changed)
    }

    fn sync_accepted_flag(&mut self) {
        let accepted = accepted_in(&self.answers).is_some();
        self.question.set_has_accepted_answer(accepted);
    }
}
