//! Answer verification for the two question kinds.
//!
//! Verification is pure with respect to session state: it checks a
//! response against a question and reports the outcome; the session
//! engine applies score and mistake-list side effects.

use thiserror::Error;

use crate::model::{Question, QuestionBody, QuestionKind};

/// A raw user response, already resolved by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserResponse {
    /// Index of the selected option, in the original presented order.
    Choice(usize),
    /// One fill value per blank group, in left-to-right text order.
    Blanks(Vec<String>),
}

/// Outcome of checking a single response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub is_correct: bool,
    pub message: String,
}

impl Verdict {
    fn correct() -> Self {
        Self {
            is_correct: true,
            message: "Correct!".to_string(),
        }
    }

    fn incorrect(message: String) -> Self {
        Self {
            is_correct: false,
            message,
        }
    }
}

/// Caller-contract violations. The presentation layer blocks incomplete
/// submissions before verification, so these never reach a user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VerifyError {
    #[error("response shape does not match a {kind:?} question")]
    ResponseKindMismatch { kind: QuestionKind },

    #[error("{got} fill values for {expected} blank groups")]
    BlankCountMismatch { expected: usize, got: usize },
}

/// Check a response against a question.
///
/// Multiple-choice compares the selected index to the answer letter's
/// index. Fill-blank compares the trimmed fill values element-wise,
/// case-sensitively. Incorrect verdicts carry a message naming the
/// correct answer.
///
/// # Errors
///
/// Returns `VerifyError` when the response shape does not fit the
/// question; no verdict is produced in that case.
pub fn verify(question: &Question, response: &UserResponse) -> Result<Verdict, VerifyError> {
    match (question.body(), response) {
        (QuestionBody::MultipleChoice(mc), UserResponse::Choice(selected)) => {
            let answer = mc.answer();
            if *selected == answer.index() {
                Ok(Verdict::correct())
            } else {
                let correct_text = &mc.options()[answer.index()];
                Ok(Verdict::incorrect(format!(
                    "Incorrect. The right answer was {answer}) {correct_text}"
                )))
            }
        }
        (QuestionBody::FillBlank(fb), UserResponse::Blanks(values)) => {
            if values.len() != fb.answers().len() {
                return Err(VerifyError::BlankCountMismatch {
                    expected: fb.answers().len(),
                    got: values.len(),
                });
            }
            let all_match = fb
                .answers()
                .iter()
                .zip(values)
                .all(|(expected, got)| expected.trim() == got.trim());
            if all_match {
                Ok(Verdict::correct())
            } else {
                Ok(Verdict::incorrect(format!(
                    "Incorrect. Solution: {}",
                    fb.answers().join(", ")
                )))
            }
        }
        (_, _) => Err(VerifyError::ResponseKindMismatch {
            kind: question.kind(),
        }),
    }
}
