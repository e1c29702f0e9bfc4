//! Apply byte-based text edits to a string.

use twoslash::TextEdit;

use crate::IdeError;

/// Applies edits to `source` as one atomic change.
///
/// Edits may come in any order; they are sorted by `(start, end)` and must not overlap.
/// Every range is validated before anything is written, so on error `source` is untouched.
pub fn apply_text_edits(source: &str, edits: &[TextEdit]) -> Result<String, IdeError> {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then(a.range.end.cmp(&b.range.end))
    });
    validate_sorted_non_overlapping_edits(source, &sorted)?;

    let mut updated = source.to_string();
    // Back to front, so earlier offsets stay valid.
    for edit in sorted.iter().rev() {
        updated.replace_range(edit.range.range(), &edit.new_text);
    }
    Ok(updated)
}

fn validate_sorted_non_overlapping_edits(
    source: &str,
    edits: &[&TextEdit],
) -> Result<(), IdeError> {
    let source_len = u32::try_from(source.len()).map_err(|_| IdeError::InvalidEditRange {
        start: 0,
        end: u32::MAX,
    })?;
    let mut prev_end = 0u32;

    for (index, edit) in edits.iter().enumerate() {
        let range = edit.range;
        if range.end < range.start
            || range.end > source_len
            || !source.is_char_boundary(range.start as usize)
            || !source.is_char_boundary(range.end as usize)
        {
            return Err(IdeError::InvalidEditRange {
                start: range.start,
                end: range.end,
            });
        }

        if index > 0 && range.start < prev_end {
            return Err(IdeError::OverlappingEdits);
        }

        prev_end = range.end;
    }

    Ok(())
}
