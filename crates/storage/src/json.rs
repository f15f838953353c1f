//! JSON-file-backed question catalog.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use exam_core::model::{Question, QuestionRecord, Topic};

use crate::repository::{self, QuestionRepository};

/// Errors opening a question source.
///
/// Both variants are non-fatal for the application: callers degrade to
/// an empty catalog and surface a warning (the menu stays usable with
/// zero questions).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("question source {path} is unavailable: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("question source {path} is not a JSON array of records: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Question catalog parsed from a JSON file.
///
/// The file is read exactly once, at `open`; queries are served from
/// memory for the rest of the process lifetime. Records that fail to
/// decode or validate are skipped with a warning instead of failing the
/// load.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    questions: Vec<Question>,
    skipped: usize,
}

impl JsonCatalog {
    /// Read and validate the question source at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SourceUnavailable` when the file cannot be read and
    /// `Malformed` when it is not a JSON array. Individual bad records
    /// are not errors; they are skipped and logged.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw =
            std::fs::read_to_string(path).map_err(|source| CatalogError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        let values: Vec<serde_json::Value> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        let total = values.len();
        let mut questions = Vec::with_capacity(total);
        for (index, value) in values.into_iter().enumerate() {
            let record = match serde_json::from_value::<QuestionRecord>(value) {
                Ok(record) => record,
                Err(err) => {
                    warn!(index, %err, "skipping undecodable question record");
                    continue;
                }
            };
            match record.validate() {
                Ok(question) => questions.push(question),
                Err(err) => warn!(index, %err, "skipping invalid question record"),
            }
        }

        let skipped = total - questions.len();
        Ok(Self { questions, skipped })
    }

    /// Number of records rejected at load time.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl QuestionRepository for JsonCatalog {
    fn all(&self) -> Vec<Question> {
        self.questions.clone()
    }

    fn topics(&self) -> Vec<Topic> {
        repository::distinct_topics(&self.questions)
    }

    fn by_topic(&self, topic: &Topic) -> Vec<Question> {
        repository::filter_by_topic(&self.questions, topic)
    }

    fn len(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_source(name: &str, contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("exam-catalog-{}-{name}.json", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn opens_a_valid_source() {
        let path = write_source(
            "valid",
            r#"[
                {"texto": "Capital of France?", "tipo": "test",
                 "opciones": ["Madrid", "Paris"], "respuesta": "b", "tema": 1},
                {"texto": "The [cat|dog] sat", "tipo": "corchetes",
                 "respuesta": ["cat"], "tema": 2}
            ]"#,
        );
        let catalog = JsonCatalog::open(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.skipped(), 0);
        assert_eq!(catalog.topics(), vec![Topic::Number(1), Topic::Number(2)]);
        assert_eq!(catalog.by_topic(&Topic::Number(2)).len(), 1);
    }

    #[test]
    fn skips_invalid_records_and_keeps_the_rest() {
        let path = write_source(
            "partial",
            r#"[
                {"texto": "Fine", "tipo": "test",
                 "opciones": ["yes", "no"], "respuesta": "a"},
                {"texto": "Letter out of range", "tipo": "test",
                 "opciones": ["yes", "no"], "respuesta": "z"},
                {"texto": "The [cat|dog] sat", "tipo": "corchetes",
                 "respuesta": ["cat", "extra"]},
                {"texto": 42, "tipo": "test", "opciones": [], "respuesta": "a"}
            ]"#,
        );
        let catalog = JsonCatalog::open(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.skipped(), 3);
        assert_eq!(catalog.all()[0].text(), "Fine");
    }

    #[test]
    fn missing_source_is_unavailable() {
        let mut path = std::env::temp_dir();
        path.push("exam-catalog-definitely-missing.json");
        let err = JsonCatalog::open(&path).unwrap_err();
        assert!(matches!(err, CatalogError::SourceUnavailable { .. }));
    }

    #[test]
    fn corrupt_source_is_malformed() {
        let path = write_source("corrupt", "{ not json");
        let err = JsonCatalog::open(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }

    #[test]
    fn empty_array_yields_an_empty_catalog() {
        let path = write_source("empty", "[]");
        let catalog = JsonCatalog::open(&path).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.topics().is_empty());
    }
}
