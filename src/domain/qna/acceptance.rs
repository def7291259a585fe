//! Accepted-answer rules over a question's answer list.
//!
//! At most one answer per question is accepted. Accepting one clears the
//! flag on every other answer in the same list.

use serde::{Deserialize, Serialize};

use super::{Answer, QnaError};
use crate::domain::foundation::AnswerId;

/// What the current user may do about acceptance on a question.
///
/// Produced by an external policy; the domain only checks the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AcceptanceCapability {
    pub can_accept: bool,
    pub can_unaccept: bool,
}

impl AcceptanceCapability {
    /// No acceptance rights (anyone but the asker).
    pub fn none() -> Self {
        Self::default()
    }

    /// May accept but never withdraw.
    pub fn accept_only() -> Self {
        Self {
            can_accept: true,
            can_unaccept: false,
        }
    }

    /// May accept and withdraw.
    pub fn full() -> Self {
        Self {
            can_accept: true,
            can_unaccept: true,
        }
    }
}

/// Outcome of an accept operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceChange {
    pub accepted: AnswerId,
    pub previously_accepted: Option<AnswerId>,
}

impl AcceptanceChange {
    /// True when the answer was already the accepted one.
    pub fn is_noop(&self) -> bool {
        self.previously_accepted == Some(self.accepted)
    }
}

/// Returns the id of the accepted answer, if any.
pub fn accepted_in(answers: &[Answer]) -> Option<AnswerId> {
    answers.iter().find(|a| a.is_accepted()).map(|a| *a.id())
}

/// Marks `answer_id` accepted and every other answer unaccepted.
///
/// Idempotent for the already-accepted answer. An unknown id leaves the
/// list untouched.
///
/// # Errors
///
/// - `AnswerNotFound` if no answer in the list has `answer_id`
pub fn accept_in(answers: &mut [Answer], answer_id: AnswerId) -> Result<AcceptanceChange, QnaError> {
    if !answers.iter().any(|a| a.id() == &answer_id) {
        return Err(QnaError::answer_not_found(answer_id));
    }

    let previously_accepted = accepted_in(answers);
    for answer in answers.iter_mut() {
        let accept = answer.id() == &answer_id;
        answer.set_accepted(accept);
    }

    Ok(AcceptanceChange {
        accepted: answer_id,
        previously_accepted,
    })
}

/// Clears the accepted flag on `answer_id`.
///
/// Returns false when that answer was not accepted (nothing changed).
///
/// # Errors
///
/// - `AnswerNotFound` if no answer in the list has `answer_id`
pub fn withdraw_in(answers: &mut [Answer], answer_id: AnswerId) -> Result<bool, QnaError> {
    let answer = answers
        .iter_mut()
        .find(|a| a.id() == &answer_id)
        .ok_or_else(|| QnaError::answer_not_found(answer_id))?;

    if !answer.is_accepted() {
        return Ok(false);
    }
    answer.set_accepted(false);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::QuestionId;
    use crate::domain::qna::Author;
    use proptest::prelude::*;

    fn answers(n: usize) -> Vec<Answer> {
        let question_id = QuestionId::new();
        (0..n)
            .map(|i| {
                Answer::new(
                    AnswerId::new(),
                    question_id,
                    Author::new(format!("Expert {}", i), "Engineer"),
                    format!("Answer {}", i),
                )
                .unwrap()
            })
            .collect()
    }

    fn accepted_count(answers: &[Answer]) -> usize {
        answers.iter().filter(|a| a.is_accepted()).count()
    }

    #[test]
    fn accept_marks_only_target() {
        let mut list = answers(3);
        let target = *list[1].id();
        let change = accept_in(&mut list, target).unwrap();

        assert_eq!(change.accepted, target);
        assert_eq!(change.previously_accepted, None);
        assert!(list[1].is_accepted());
        assert_eq!(accepted_count(&list), 1);
    }

    #[test]
    fn accepting_another_moves_the_flag() {
        let mut list = answers(3);
        let first = *list[0].id();
        let second = *list[2].id();
        accept_in(&mut list, first).unwrap();
        let change = accept_in(&mut list, second).unwrap();

        assert_eq!(change.previously_accepted, Some(first));
        assert!(!list[0].is_accepted());
        assert!(list[2].is_accepted());
        assert_eq!(accepted_count(&list), 1);
    }

    #[test]
    fn reaccepting_is_idempotent() {
        let mut list = answers(2);
        let id = *list[0].id();
        accept_in(&mut list, id).unwrap();
        let change = accept_in(&mut list, id).unwrap();

        assert!(change.is_noop());
        assert_eq!(accepted_in(&list), Some(id));
    }

    #[test]
    fn unknown_answer_leaves_list_unchanged() {
        let mut list = answers(2);
        let id = *list[0].id();
        accept_in(&mut list, id).unwrap();
        let before = list.clone();

        let result = accept_in(&mut list, AnswerId::new());

        assert!(matches!(result, Err(QnaError::AnswerNotFound(_))));
        assert_eq!(list, before);
    }

    #[test]
    fn withdraw_clears_accepted_answer() {
        let mut list = answers(2);
        let id = *list[1].id();
        accept_in(&mut list, id).unwrap();

        assert!(withdraw_in(&mut list, id).unwrap());
        assert_eq!(accepted_in(&list), None);
    }

    #[test]
    fn withdraw_of_unaccepted_answer_is_noop() {
        let mut list = answers(2);
        let id = *list[0].id();
        assert!(!withdraw_in(&mut list, id).unwrap());
    }

    proptest! {
        #[test]
        fn any_accept_sequence_leaves_exactly_one(picks in proptest::collection::vec(0usize..5, 1..12)) {
            let mut list = answers(5);
            let ids: Vec<AnswerId> = list.iter().map(|a| *a.id()).collect();
            for pick in &picks {
                accept_in(&mut list, ids[*pick]).unwrap();
            }
            prop_assert_eq!(accepted_count(&list), 1);
            prop_assert_eq!(accepted_in(&list), Some(ids[*picks.last().unwrap()]));
        }
    }
}
