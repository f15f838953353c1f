use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::model::Topic;

static BLANK_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").expect("blank group pattern is valid"));

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// The two supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice,
    FillBlank,
}

/// Single-letter key identifying the correct option by position
/// (`a` → 0, `b` → 1, …). Range-checked against the option count at
/// validation time, so `index` is always a valid option index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerLetter {
    letter: char,
    index: usize,
}

impl AnswerLetter {
    /// Parse a letter key and check it against the option count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAnswerLetter` for anything that is not a single
    /// ASCII letter, and `AnswerLetterOutOfRange` when the derived index
    /// does not name an existing option.
    pub fn parse(raw: &str, option_count: usize) -> Result<Self, QuestionValidationError> {
        let mut chars = raw.trim().chars();
        let (Some(first), None) = (chars.next(), chars.next()) else {
            return Err(QuestionValidationError::InvalidAnswerLetter {
                raw: raw.to_string(),
            });
        };
        let letter = first.to_ascii_lowercase();
        if !letter.is_ascii_lowercase() {
            return Err(QuestionValidationError::InvalidAnswerLetter {
                raw: raw.to_string(),
            });
        }

        let index = (letter as usize) - ('a' as usize);
        if index >= option_count {
            return Err(QuestionValidationError::AnswerLetterOutOfRange {
                letter,
                option_count,
            });
        }

        Ok(Self { letter, index })
    }

    #[must_use]
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Zero-based index of the correct option.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)
    }
}

/// Display letter for an option index (`0` → `a`, `1` → `b`, …).
#[must_use]
pub fn option_letter(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'a' + i))
}

/// One bracketed placeholder group: the trimmed pipe-separated
/// candidates offered for a single gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankGroup {
    candidates: Vec<String>,
}

impl BlankGroup {
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleChoice {
    options: Vec<String>,
    answer: AnswerLetter,
}

impl MultipleChoice {
    /// The displayed answer choices, in their original order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> AnswerLetter {
        self.answer
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillBlank {
    // segments.len() == groups.len() + 1; groups.len() == answers.len()
    segments: Vec<String>,
    groups: Vec<BlankGroup>,
    answers: Vec<String>,
}

impl FillBlank {
    /// Prompt text split around the gaps: `segments()[i]` precedes gap
    /// `i`, the final element trails the last gap.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn groups(&self) -> &[BlankGroup] {
        &self.groups
    }

    /// The correct fill values, trimmed, one per group in text order.
    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionBody {
    MultipleChoice(MultipleChoice),
    FillBlank(FillBlank),
}

/// A validated, immutable question.
///
/// Construction goes through `QuestionRecord::validate`, so every value
/// of this type upholds the invariants checked there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    topic: Topic,
    body: QuestionBody,
}

impl Question {
    /// The prompt as it appears in the source, including any bracket
    /// groups for fill-blank questions.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    #[must_use]
    pub fn body(&self) -> &QuestionBody {
        &self.body
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        match self.body {
            QuestionBody::MultipleChoice(_) => QuestionKind::MultipleChoice,
            QuestionBody::FillBlank(_) => QuestionKind::FillBlank,
        }
    }
}

//
// ─── SOURCE RECORDS ────────────────────────────────────────────────────────────
//

/// Raw question record as it appears in the JSON source.
///
/// Field names follow the source file format (`texto`, `tipo`,
/// `opciones`, `respuesta`, `tema`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "texto")]
    pub text: String,
    #[serde(rename = "tipo")]
    pub kind: RecordKind,
    #[serde(rename = "opciones", default)]
    pub options: Vec<String>,
    #[serde(rename = "respuesta")]
    pub answer: RecordAnswer,
    #[serde(rename = "tema", default)]
    pub topic: Topic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "test")]
    MultipleChoice,
    #[serde(rename = "corchetes")]
    FillBlank,
}

/// `respuesta` is a single letter for multiple-choice records and an
/// ordered list of fill values for fill-blank records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecordAnswer {
    Letter(String),
    Fills(Vec<String>),
}

impl QuestionRecord {
    /// Validate the record into a `Question`.
    ///
    /// # Errors
    ///
    /// Rejects empty prompts, answer letters outside the option range,
    /// fill-blank prompts without bracket groups, and group/answer count
    /// mismatches. Catalog loaders skip rejected records instead of
    /// failing the whole load.
    pub fn validate(self) -> Result<Question, QuestionValidationError> {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return Err(QuestionValidationError::EmptyText);
        }

        let body = match self.kind {
            RecordKind::MultipleChoice => {
                if self.options.is_empty() {
                    return Err(QuestionValidationError::NoOptions);
                }
                let RecordAnswer::Letter(raw) = self.answer else {
                    return Err(QuestionValidationError::AnswerShapeMismatch {
                        kind: QuestionKind::MultipleChoice,
                    });
                };
                let answer = AnswerLetter::parse(&raw, self.options.len())?;
                QuestionBody::MultipleChoice(MultipleChoice {
                    options: self.options,
                    answer,
                })
            }
            RecordKind::FillBlank => {
                let (segments, groups) = parse_blank_groups(&text);
                if groups.is_empty() {
                    return Err(QuestionValidationError::NoBlankGroups);
                }
                if groups
                    .iter()
                    .any(|group| group.candidates.iter().any(String::is_empty))
                {
                    return Err(QuestionValidationError::EmptyCandidate);
                }
                let RecordAnswer::Fills(raw) = self.answer else {
                    return Err(QuestionValidationError::AnswerShapeMismatch {
                        kind: QuestionKind::FillBlank,
                    });
                };
                let answers: Vec<String> =
                    raw.iter().map(|answer| answer.trim().to_string()).collect();
                if answers.len() != groups.len() {
                    return Err(QuestionValidationError::BlankCountMismatch {
                        groups: groups.len(),
                        answers: answers.len(),
                    });
                }
                QuestionBody::FillBlank(FillBlank {
                    segments,
                    groups,
                    answers,
                })
            }
        };

        Ok(Question {
            text,
            topic: self.topic,
            body,
        })
    }
}

/// Split a fill-blank prompt into the text segments around the gaps and
/// the candidate groups inside them.
///
/// Groups are parsed once here, at validation time; display and
/// verification both work from the structured form afterwards.
fn parse_blank_groups(text: &str) -> (Vec<String>, Vec<BlankGroup>) {
    let mut segments = Vec::new();
    let mut groups = Vec::new();
    let mut cursor = 0;

    for caps in BLANK_GROUP_RE.captures_iter(text) {
        let whole = caps.get(0).expect("group 0 always matches");
        segments.push(text[cursor..whole.start()].to_string());
        groups.push(BlankGroup {
            candidates: caps[1]
                .split('|')
                .map(|candidate| candidate.trim().to_string())
                .collect(),
        });
        cursor = whole.end();
    }
    segments.push(text[cursor..].to_string());

    (segments, groups)
}

//
// ─── VALIDATION ERRORS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionValidationError {
    #[error("question text is empty")]
    EmptyText,

    #[error("multiple-choice question has no options")]
    NoOptions,

    #[error("answer letter {raw:?} is not a single letter")]
    InvalidAnswerLetter { raw: String },

    #[error("answer letter {letter:?} is out of range for {option_count} options")]
    AnswerLetterOutOfRange { letter: char, option_count: usize },

    #[error("answer shape does not match a {kind:?} question")]
    AnswerShapeMismatch { kind: QuestionKind },

    #[error("fill-blank text contains no bracket groups")]
    NoBlankGroups,

    #[error("blank group contains an empty candidate")]
    EmptyCandidate,

    #[error("{answers} answers for {groups} blank groups")]
    BlankCountMismatch { groups: usize, answers: usize },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
