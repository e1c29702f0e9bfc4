use serde::{Deserialize, Serialize};
use twoslash::TextEdit;

use crate::IdeError;

/// Host editor model collaborator.
///
/// Line and position queries are answered by a [`twoslash::SourceMap`] built over [`text`].
///
/// [`text`]: EditorModel::text
pub trait EditorModel {
    /// Document identifier handed to the language service.
    fn uri(&self) -> &str;

    fn text(&self) -> String;

    /// Line-ending sequence of the document.
    fn eol(&self) -> String;

    /// Monotonic content version; bumps on every change.
    fn version(&self) -> u64;

    /// Applies edits atomically without touching the undo stack.
    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<(), IdeError>;

    /// Applies edits atomically as an undoable user edit attributed to `source`.
    fn execute_edits(&mut self, source: &str, edits: &[TextEdit]) -> Result<(), IdeError>;

    /// Closes the current undo element.
    fn push_stack_element(&mut self);

    /// Reopens the last undo element so following edits amend it.
    fn pop_stack_element(&mut self);
}

/// Content-change notification from the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentChange {
    pub version_id: u64,
    #[serde(default)]
    pub is_undoing: bool,
    #[serde(default)]
    pub is_redoing: bool,
}

impl ContentChange {
    pub fn is_undo_redo(&self) -> bool {
        self.is_undoing || self.is_redoing
    }
}
