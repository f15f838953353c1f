#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use exam_core::Clock;

pub use error::SessionError;
pub use sessions::{ExamFlowService, ExamPhase, ExamSession, SessionProgress};
