use chrono::{DateTime, Utc};
use rand::rng;
use rand::seq::SliceRandom;

use exam_core::model::Question;
use exam_core::verify::{UserResponse, Verdict, verify};

use crate::error::SessionError;
use super::progress::SessionProgress;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle phase of an exam session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamPhase {
    /// No active run; the menu is showing.
    Idle,
    /// A question set is being worked through.
    InProgress,
    /// Every question in the active set has been answered.
    Finished,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One continuous run through a shuffled question set.
///
/// All mutable exam state lives here; the presentation layer reads it
/// and invokes the transitions, nothing else. A fresh `default()` is the
/// idle state.
#[derive(Debug, Clone, Default)]
pub struct ExamSession {
    started: bool,
    active_set: Vec<Question>,
    position: usize,
    correct_count: usize,
    failed: Vec<Question>,
    last_result: Option<Verdict>,
    awaiting_result: bool,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl ExamSession {
    #[must_use]
    pub fn phase(&self) -> ExamPhase {
        if !self.started {
            ExamPhase::Idle
        } else if self.position >= self.active_set.len() {
            ExamPhase::Finished
        } else {
            ExamPhase::InProgress
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase() == ExamPhase::Finished
    }

    /// The shuffled question sequence, fixed for the run's duration.
    #[must_use]
    pub fn active_set(&self) -> &[Question] {
        &self.active_set
    }

    /// Zero-based index of the question currently being asked.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.active_set.len()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// Questions answered incorrectly, in the order they were missed.
    /// Survives menu returns so a retry run can be seeded from it.
    #[must_use]
    pub fn failed(&self) -> &[Question] {
        &self.failed
    }

    /// The verification outcome pending acknowledgement, if any.
    #[must_use]
    pub fn last_result(&self) -> Option<&Verdict> {
        self.last_result.as_ref()
    }

    /// True between a submitted answer and the advance acknowledging it.
    #[must_use]
    pub fn awaiting_result(&self) -> bool {
        self.awaiting_result
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.started {
            self.active_set.get(self.position)
        } else {
            None
        }
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.position + usize::from(self.awaiting_result);
        SessionProgress {
            total: self.total(),
            answered,
            remaining: self.total().saturating_sub(answered),
            is_complete: self.is_finished(),
        }
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Begin a new run over `pool`, shuffled uniformly.
    ///
    /// Position, score and the pending result reset; the failed list is
    /// deliberately left alone so callers can seed a retry run from it
    /// before or after starting. An empty pool yields a run that is
    /// immediately finished.
    pub fn start(&mut self, pool: Vec<Question>, now: DateTime<Utc>) {
        let mut active_set = pool;
        active_set.shuffle(&mut rng());

        self.started = true;
        self.active_set = active_set;
        self.position = 0;
        self.correct_count = 0;
        self.last_result = None;
        self.awaiting_result = false;
        self.started_at = Some(now);
        self.completed_at = self.active_set.is_empty().then_some(now);
    }

    /// Check the response against the current question and record the
    /// outcome: a correct answer bumps the score, an incorrect one
    /// appends the question to the failed list. Exactly one of the two
    /// happens per accepted call.
    ///
    /// # Errors
    ///
    /// Returns `NotInProgress` while idle or finished and
    /// `AlreadyAnswered` while a result is pending; response-shape
    /// violations pass through as `Verify`. No error path changes any
    /// counter.
    pub fn submit_answer(&mut self, response: &UserResponse) -> Result<&Verdict, SessionError> {
        if self.awaiting_result {
            return Err(SessionError::AlreadyAnswered);
        }
        if self.phase() != ExamPhase::InProgress {
            return Err(SessionError::NotInProgress);
        }

        let question = &self.active_set[self.position];
        let verdict = verify(question, response)?;
        if verdict.is_correct {
            self.correct_count += 1;
        } else {
            let missed = question.clone();
            self.failed.push(missed);
        }

        self.awaiting_result = true;
        Ok(self.last_result.insert(verdict))
    }

    /// Acknowledge the pending result and move to the next question.
    /// May finish the run.
    ///
    /// # Errors
    ///
    /// Returns `NothingToAcknowledge` when no answer is pending.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if !self.awaiting_result {
            return Err(SessionError::NothingToAcknowledge);
        }

        self.position += 1;
        self.awaiting_result = false;
        self.last_result = None;
        if self.position >= self.active_set.len() {
            self.completed_at = Some(now);
        }
        Ok(())
    }

    /// Drop the active run and go back to the menu.
    ///
    /// The failed list survives so the menu can offer a retry of this
    /// session's mistakes; everything else resets to the idle default.
    pub fn return_to_menu(&mut self) {
        let failed = std::mem::take(&mut self.failed);
        *self = Self {
            failed,
            ..Self::default()
        };
    }

    /// Forget the accumulated mistakes (a brand-new run from the menu).
    pub(crate) fn reset_failed(&mut self) {
        self.failed.clear();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
