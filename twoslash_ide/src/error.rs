use thiserror::Error;

/// Errors of edit application. Everything else in a pass degrades silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdeError {
    #[error("invalid edit range {start}..{end}")]
    InvalidEditRange { start: u32, end: u32 },
    #[error("overlapping edits")]
    OverlappingEdits,
    #[error("host editor error: {0}")]
    Host(String),
}
