//! Read-only access to the question catalog.

use std::collections::BTreeSet;

use exam_core::model::{Question, Topic};

/// Read-only queries over an immutable question catalog.
///
/// Implementations load their content once; repeated calls observe the
/// same logical content for the life of the process.
pub trait QuestionRepository: Send + Sync {
    /// Every question in the catalog, in source order.
    fn all(&self) -> Vec<Question>;

    /// Distinct topic keys present, sorted, including the sentinel for
    /// questions that did not declare one.
    fn topics(&self) -> Vec<Topic>;

    /// All questions whose topic equals `topic`, in source order.
    fn by_topic(&self, topic: &Topic) -> Vec<Question>;

    /// Number of questions in the catalog.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) fn distinct_topics(questions: &[Question]) -> Vec<Topic> {
    questions
        .iter()
        .map(|question| question.topic().clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub(crate) fn filter_by_topic(questions: &[Question], topic: &Topic) -> Vec<Question> {
    questions
        .iter()
        .filter(|question| question.topic() == topic)
        .cloned()
        .collect()
}

/// In-memory catalog for tests and seeded setups.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    questions: Vec<Question>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

impl QuestionRepository for InMemoryCatalog {
    fn all(&self) -> Vec<Question> {
        self.questions.clone()
    }

    fn topics(&self) -> Vec<Topic> {
        distinct_topics(&self.questions)
    }

    fn by_topic(&self, topic: &Topic) -> Vec<Question> {
        filter_by_topic(&self.questions, topic)
    }

    fn len(&self) -> usize {
        self.questions.len()
    }
}
