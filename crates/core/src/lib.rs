#![forbid(unsafe_code)]

pub mod model;
pub mod time;
pub mod verify;

pub use time::Clock;
pub use verify::{UserResponse, Verdict, VerifyError, verify};
