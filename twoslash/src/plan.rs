//! Edit planning: compare a freshly formatted comment against the generated block already
//! following its marker and emit a whole-line replacement only when they differ.

use crate::marker::Marker;
use crate::source_map::SourceMap;
use crate::span::{LineCol, Span};
use crate::text_edit::TextEdit;

/// The generated comment block currently in the document for a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousComment {
    /// Block lines joined with the document's line ending.
    pub text: String,
    pub first_line: usize,
    pub last_line: usize,
}

/// Collects the marker's line plus every directly following continuation line, as delimited by
/// [`Marker::block_last_line`].
pub fn previous_comment(marker: &Marker, sm: &SourceMap<'_>, eol: &str) -> PreviousComment {
    let last_line = marker.block_last_line(sm);
    let lines: Vec<&str> = (marker.line..=last_line)
        .map(|line| sm.line_text(line).unwrap_or_default())
        .collect();

    PreviousComment {
        text: lines.join(eol),
        first_line: marker.line,
        last_line,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEdit {
    pub edit: TextEdit,
    pub start: LineCol,
    pub end: LineCol,
}

/// Plans the replacement of a marker's generated block with `comment`.
///
/// Returns `None` when the block already reads `comment`. The range runs from the start of the
/// marker line to the end of the block's last line, line terminator excluded.
pub fn plan_edit(
    marker: &Marker,
    comment: &str,
    sm: &SourceMap<'_>,
    eol: &str,
) -> Option<PlannedEdit> {
    let previous = previous_comment(marker, sm, eol);
    if previous.text == comment {
        tracing::trace!(line = marker.line, "generated comment is up to date");
        return None;
    }

    let start = sm.line_start(previous.first_line)?;
    let end = sm.line_end(previous.last_line)?;
    Some(PlannedEdit {
        edit: TextEdit {
            range: Span::new(start, end),
            new_text: comment.to_string(),
        },
        start: LineCol::new(previous.first_line, 1),
        end: LineCol::new(previous.last_line, end - sm.line_start(previous.last_line)? + 1),
    })
}

/// Edits of one pass, kept sorted and non-overlapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPlan {
    edits: Vec<PlannedEdit>,
}

impl EditPlan {
    /// Adds an edit. An edit overlapping one already planned is dropped and `false` returned.
    pub fn push(&mut self, planned: PlannedEdit) -> bool {
        let range = planned.edit.range;
        if self
            .edits
            .iter()
            .any(|existing| existing.edit.range.overlaps(&range) || existing.edit.range == range)
        {
            tracing::debug!(?range, "dropping overlapping edit");
            return false;
        }
        let idx = self
            .edits
            .partition_point(|existing| existing.edit.range.start < range.start);
        self.edits.insert(idx, planned);
        true
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn edits(&self) -> &[PlannedEdit] {
        &self.edits
    }

    pub fn into_text_edits(self) -> Vec<TextEdit> {
        self.edits.into_iter().map(|planned| planned.edit).collect()
    }
}
