mod exam_vm;

pub use exam_vm::{BlankGroupVm, ChoiceVm, QuestionVm, blank_candidates_seed};
