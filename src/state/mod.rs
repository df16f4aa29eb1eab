/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Preview handles and their release (preview.rs)
/// - The upload/submit/result state machine (session.rs)
/// - The result handed to the output screen (output.rs)

pub mod data;
pub mod output;
pub mod preview;
pub mod session;

pub use data::{FileCandidate, Role};
pub use session::{Phase, Session};
