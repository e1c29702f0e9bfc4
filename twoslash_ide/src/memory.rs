//! In-memory [`EditorModel`] with an undo stack shaped like Monaco's.
//!
//! Undoable edits land in the last undo element while it is open and start a new element
//! otherwise. `push_stack_element` closes the last element, `pop_stack_element` reopens it.
//! Every change is recorded as a [`ContentChange`] that hosts drain with
//! [`MemoryDocument::take_changes`].

use twoslash::{TextEdit, detect_eol};

use crate::text_edit::apply_text_edits;
use crate::{ContentChange, EditorModel, IdeError};

#[derive(Debug, Clone, PartialEq, Eq)]
struct UndoElement {
    before: String,
    after: String,
    open: bool,
}

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    uri: String,
    text: String,
    eol: String,
    version: u64,
    undo: Vec<UndoElement>,
    redo: Vec<UndoElement>,
    changes: Vec<ContentChange>,
}

impl MemoryDocument {
    pub fn new(uri: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let eol = detect_eol(&text).to_string();
        Self {
            uri: uri.into(),
            text,
            eol,
            version: 1,
            undo: Vec::new(),
            redo: Vec::new(),
            changes: Vec::new(),
        }
    }

    /// A user edit: one closed undo element of its own.
    pub fn edit(&mut self, edits: &[TextEdit]) -> Result<ContentChange, IdeError> {
        self.execute_edits("user", edits)?;
        self.push_stack_element();
        Ok(self.last_change())
    }

    /// Reverts the last undo element. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<ContentChange> {
        let mut element = self.undo.pop()?;
        element.open = false;
        self.text = element.before.clone();
        self.redo.push(element);
        Some(self.record(true, false))
    }

    /// Re-applies the last undone element. `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<ContentChange> {
        let element = self.redo.pop()?;
        self.text = element.after.clone();
        self.undo.push(element);
        Some(self.record(false, true))
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Drains the change notifications recorded since the last call.
    pub fn take_changes(&mut self) -> Vec<ContentChange> {
        std::mem::take(&mut self.changes)
    }

    fn last_change(&self) -> ContentChange {
        self.changes.last().copied().unwrap_or(ContentChange {
            version_id: self.version,
            ..ContentChange::default()
        })
    }

    fn record(&mut self, is_undoing: bool, is_redoing: bool) -> ContentChange {
        self.version += 1;
        let change = ContentChange {
            version_id: self.version,
            is_undoing,
            is_redoing,
        };
        self.changes.push(change);
        change
    }
}

impl EditorModel for MemoryDocument {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn eol(&self) -> String {
        self.eol.clone()
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<(), IdeError> {
        self.text = apply_text_edits(&self.text, edits)?;
        self.record(false, false);
        Ok(())
    }

    fn execute_edits(&mut self, source: &str, edits: &[TextEdit]) -> Result<(), IdeError> {
        let before = self.text.clone();
        let after = apply_text_edits(&before, edits)?;
        tracing::trace!(source, edits = edits.len(), "executing undoable edits");

        match self.undo.last_mut() {
            Some(element) if element.open => element.after = after.clone(),
            _ => self.undo.push(UndoElement {
                before,
                after: after.clone(),
                open: true,
            }),
        }
        self.redo.clear();
        self.text = after;
        self.record(false, false);
        Ok(())
    }

    fn push_stack_element(&mut self) {
        if let Some(element) = self.undo.last_mut() {
            element.open = false;
        }
    }

    fn pop_stack_element(&mut self) {
        if let Some(element) = self.undo.last_mut() {
            element.open = true;
        }
    }
}
