use serde::{Deserialize, Serialize};

use crate::marker::{Marker, MarkerKind};
use crate::source_map::SourceMap;

/// Document position whose quick info a marker asks for. Probing starts here and moves right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInfo {
    pub line: usize,
    pub column: usize,
}

/// Computes where a marker's info must be resolved.
///
/// Returns `None` for markers that have nothing to point at (a caret or own-line arrow on the
/// first line).
pub fn query_info(marker: &Marker, sm: &SourceMap<'_>) -> Option<QueryInfo> {
    match marker.kind {
        MarkerKind::Caret => caret_query(marker, sm),
        MarkerKind::Arrow => arrow_query(marker, sm),
    }
}

/// The caret points at the character in the same character column on the line above. Columns
/// are byte based, so the character count in front of the caret is mapped onto that line.
fn caret_query(marker: &Marker, sm: &SourceMap<'_>) -> Option<QueryInfo> {
    // `^` is the second to last character of the match.
    let caret_offset = marker.end().checked_sub(2)?;
    let caret = sm.line_col(caret_offset);
    let chars_before = sm.line_text(caret.line)?.get(..caret.col - 1)?.chars().count();

    let line = caret.line.checked_sub(1).filter(|line| *line >= 1)?;
    let above = sm.line_text(line)?;
    let byte = match above.char_indices().nth(chars_before) {
        Some((idx, _)) => idx,
        // Past the end of the line: keep the overshoot so nothing is found there.
        None => above.len() + chars_before - above.chars().count(),
    };

    Some(QueryInfo {
        line,
        column: byte + 1,
    })
}

fn arrow_query(marker: &Marker, sm: &SourceMap<'_>) -> Option<QueryInfo> {
    let leading = marker.leading_text();
    let meaningful = leading.trim_end_matches(|c: char| c.is_whitespace() || c == ';' || c == ',');

    if meaningful.is_empty() {
        return Some(QueryInfo {
            line: marker.line.checked_sub(1).filter(|line| *line >= 1)?,
            column: 1,
        });
    }

    // Start of the trailing word, or the last character when it is not part of a word.
    let word_start = meaningful
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_char(*c))
        .last()
        .map(|(idx, _)| idx);
    let column = match word_start {
        Some(idx) => idx,
        None => meaningful.char_indices().last().map(|(idx, _)| idx)?,
    };

    Some(QueryInfo {
        line: marker.line,
        column: column + 1,
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
