//! Editor-side driver of the twoslash comment filler.
//!
//! Coordinates are UTF-8 byte offsets (`[start, end)`), matching `twoslash`.
//! The language service and the editor model are collaborators behind [`LanguageService`] and
//! [`EditorModel`]; passes are single-threaded and await the service marker by marker.

mod apply;
mod error;
mod memory;
mod model;
mod pass;
mod resolve;
mod schedule;
mod service;
mod text_edit;

pub use apply::{ApplyMode, UndoGroup, apply_with_mode};
pub use error::IdeError;
pub use memory::MemoryDocument;
pub use model::{ContentChange, EditorModel};
pub use pass::{DEFAULT_PROBE_LIMIT, PassConfig, PassOutcome, fill_queries};
pub use resolve::left_most_quick_info;
pub use schedule::{DEFAULT_DEBOUNCE, Scheduler, Trigger};
pub use service::LanguageService;
pub use text_edit::apply_text_edits;

#[cfg(test)]
mod tests;
