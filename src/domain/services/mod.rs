//! Domain services containing core business logic.

mod prompt;

pub use prompt::*;
