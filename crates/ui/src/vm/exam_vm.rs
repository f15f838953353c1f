//! View-models mapping the question at a session position into render
//! data. No pre-formatted prose and no styling decisions here; views
//! own those.

use exam_core::model::{Question, QuestionBody, option_letter};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// One multiple-choice option with its display letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceVm {
    pub letter: char,
    pub text: String,
}

/// One fill-blank gap: its 1-based display number, the prompt text that
/// precedes it, and its candidates in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankGroupVm {
    pub number: usize,
    pub leading: String,
    pub candidates: Vec<String>,
}

/// Render data for the question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionVm {
    MultipleChoice {
        choices: Vec<ChoiceVm>,
    },
    FillBlank {
        groups: Vec<BlankGroupVm>,
        trailing: String,
    },
}

/// Mixes the session position and gap index into a shuffle seed.
///
/// The shuffle is purely cosmetic: the same unanswered question keeps
/// the same candidate order across re-renders, while distinct questions
/// and gaps still get distinct orders.
#[must_use]
pub fn blank_candidates_seed(position: usize, group: usize) -> u64 {
    (position as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ (group as u64 + 1)
}

impl QuestionVm {
    /// Build render data for `question` as shown at `position`.
    ///
    /// Multiple-choice options keep their original order; fill-blank
    /// candidates are shuffled with a seed stable per (position, gap).
    #[must_use]
    pub fn for_question(question: &Question, position: usize) -> Self {
        match question.body() {
            QuestionBody::MultipleChoice(mc) => QuestionVm::MultipleChoice {
                choices: mc
                    .options()
                    .iter()
                    .enumerate()
                    .map(|(index, text)| ChoiceVm {
                        letter: option_letter(index).unwrap_or('?'),
                        text: text.clone(),
                    })
                    .collect(),
            },
            QuestionBody::FillBlank(fb) => {
                let segments = fb.segments();
                let groups = fb
                    .groups()
                    .iter()
                    .enumerate()
                    .map(|(index, group)| {
                        let mut candidates = group.candidates().to_vec();
                        let mut rng =
                            StdRng::seed_from_u64(blank_candidates_seed(position, index));
                        candidates.shuffle(&mut rng);
                        BlankGroupVm {
                            number: index + 1,
                            leading: segments[index].clone(),
                            candidates,
                        }
                    })
                    .collect();
                QuestionVm::FillBlank {
                    groups,
                    trailing: segments.last().cloned().unwrap_or_default(),
                }
            }
        }
    }
}
