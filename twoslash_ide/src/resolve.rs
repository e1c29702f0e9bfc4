//! Left-most quick-info probing.

use twoslash::{DisplayPart, QueryInfo, SourceMap};

use crate::LanguageService;

/// Probes the query line from the query column rightwards and returns the display parts of the
/// first position the service has info for.
///
/// At most `probe_limit` positions (character boundaries) are tried; the end of the line is
/// never probed. `None` means no info.
pub async fn left_most_quick_info<S: LanguageService + ?Sized>(
    service: &S,
    file: &str,
    sm: &SourceMap<'_>,
    query: QueryInfo,
    probe_limit: usize,
) -> Option<Vec<DisplayPart>> {
    let line_start = sm.line_start(query.line)?;
    let line_text = sm.line_text(query.line)?;
    let from = query.column.checked_sub(1)?;

    let probes = line_text
        .char_indices()
        .map(|(idx, _)| idx)
        .skip_while(|idx| *idx < from)
        .take(probe_limit);

    for idx in probes {
        let offset = line_start + idx;
        tracing::trace!(line = query.line, offset, "probing quick info");
        let Some(info) = service.quick_info(file, offset).await else {
            continue;
        };
        if !info.display_parts.is_empty() {
            return Some(info.display_parts);
        }
    }

    None
}
