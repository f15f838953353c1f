mod engine;
mod progress;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use engine::{ExamPhase, ExamSession};
pub use progress::SessionProgress;
pub use workflow::ExamFlowService;
