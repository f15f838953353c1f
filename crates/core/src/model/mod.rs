mod question;
mod topic;

pub use question::{
    AnswerLetter, BlankGroup, FillBlank, MultipleChoice, Question, QuestionBody, QuestionKind,
    QuestionRecord, QuestionValidationError, RecordAnswer, RecordKind, option_letter,
};
pub use topic::Topic;
