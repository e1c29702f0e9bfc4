//! The two ways a pass writes its edits back to the editor.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use twoslash::{PLUGIN_ID, TextEdit};

use crate::{EditorModel, IdeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplyMode {
    /// User-triggered pass: edits join the user's last undo element, then the element is closed.
    UndoGroup,
    /// Undo/redo replay: edits go straight to the model, the undo stack is left alone.
    Replay,
}

/// Reopens the model's last undo element on creation and closes it again on drop, even when
/// the edits in between fail.
pub struct UndoGroup<'a, M: EditorModel + ?Sized> {
    model: &'a mut M,
}

impl<'a, M: EditorModel + ?Sized> UndoGroup<'a, M> {
    pub fn open(model: &'a mut M) -> Self {
        model.pop_stack_element();
        Self { model }
    }
}

impl<M: EditorModel + ?Sized> Deref for UndoGroup<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.model
    }
}

impl<M: EditorModel + ?Sized> DerefMut for UndoGroup<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.model
    }
}

impl<M: EditorModel + ?Sized> Drop for UndoGroup<'_, M> {
    fn drop(&mut self) {
        self.model.push_stack_element();
    }
}

/// Writes `edits` to the model in the given mode.
pub fn apply_with_mode<M: EditorModel + ?Sized>(
    model: &mut M,
    edits: &[TextEdit],
    mode: ApplyMode,
) -> Result<(), IdeError> {
    match mode {
        ApplyMode::Replay => model.apply_edits(edits),
        ApplyMode::UndoGroup => {
            let mut group = UndoGroup::open(model);
            group.execute_edits(PLUGIN_ID, edits)
        }
    }
}
