//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::verify::VerifyError;

/// Errors emitted by the exam session engine.
///
/// The first three variants are caller-contract violations (a stale
/// view invoking a transition out of turn); rejecting them leaves every
/// counter untouched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no question is currently being asked")]
    NotInProgress,

    #[error("an answer is already awaiting acknowledgement")]
    AlreadyAnswered,

    #[error("no answer has been submitted for the current question")]
    NothingToAcknowledge,

    #[error(transparent)]
    Verify(#[from] VerifyError),
}
