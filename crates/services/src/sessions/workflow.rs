use std::sync::Arc;

use tracing::debug;

use exam_core::Clock;
use exam_core::model::Topic;
use exam_core::verify::{UserResponse, Verdict};
use storage::QuestionRepository;

use crate::error::SessionError;
use super::engine::ExamSession;

/// Orchestrates session starts and turn-taking over a question catalog.
///
/// Owns the clock and the repository so views never touch either
/// directly; the session value itself is owned by the caller.
#[derive(Clone)]
pub struct ExamFlowService {
    clock: Clock,
    catalog: Arc<dyn QuestionRepository>,
}

impl ExamFlowService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<dyn QuestionRepository>) -> Self {
        Self { clock, catalog }
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.catalog.len()
    }

    /// Distinct topics available for a filtered start.
    #[must_use]
    pub fn topics(&self) -> Vec<Topic> {
        self.catalog.topics()
    }

    /// Start a run over the whole catalog.
    ///
    /// A brand-new run from the menu forgets the previous run's
    /// mistakes.
    pub fn start_full(&self, session: &mut ExamSession) {
        let pool = self.catalog.all();
        debug!(pool_len = pool.len(), "starting full exam run");
        session.reset_failed();
        session.start(pool, self.clock.now());
    }

    /// Start a run over a single topic.
    pub fn start_topic(&self, session: &mut ExamSession, topic: &Topic) {
        let pool = self.catalog.by_topic(topic);
        debug!(%topic, pool_len = pool.len(), "starting topic exam run");
        session.reset_failed();
        session.start(pool, self.clock.now());
    }

    /// Start a retry run seeded from the questions missed so far.
    ///
    /// The mistake list stays in place: missing a question again during
    /// the retry appends it once more.
    pub fn start_retry(&self, session: &mut ExamSession) {
        let pool = session.failed().to_vec();
        debug!(pool_len = pool.len(), "starting retry exam run");
        session.start(pool, self.clock.now());
    }

    /// Check a response against the current question.
    ///
    /// # Errors
    ///
    /// See [`ExamSession::submit_answer`].
    pub fn submit_answer<'s>(
        &self,
        session: &'s mut ExamSession,
        response: &UserResponse,
    ) -> Result<&'s Verdict, SessionError> {
        session.submit_answer(response)
    }

    /// Acknowledge the pending result and move on.
    ///
    /// # Errors
    ///
    /// See [`ExamSession::advance`].
    pub fn advance(&self, session: &mut ExamSession) -> Result<(), SessionError> {
        session.advance(self.clock.now())
    }

    /// Abandon the run and return to the menu, keeping the mistake list.
    pub fn return_to_menu(&self, session: &mut ExamSession) {
        session.return_to_menu();
    }
}
