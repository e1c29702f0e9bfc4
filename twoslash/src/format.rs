//! Comment synthesis: quick info → marker comment text.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::display::{DisplayPart, display_text, kind};
use crate::marker::Marker;
use crate::options::Options;

/// Maximum length (in characters) of a single-line info body unless truncation is disabled.
pub const TRUNCATE_LEN: usize = 100;

pub const ELLIPSIS: char = '…';

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").expect("valid pattern"));

static LINE_BREAK_AND_INDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n\s*").expect("valid pattern"));

/// Builds the full comment for a marker: the marker text, a space when there is info, and the
/// info laid out according to `options`.
pub fn format_comment(
    marker: &Marker,
    parts: &[DisplayPart],
    options: &Options,
    eol: &str,
) -> String {
    let info = if options.compact_output {
        compact_text(parts)
    } else {
        display_text(parts)
    };

    let mut comment = marker.match_text.clone();
    if !info.is_empty() {
        comment.push(' ');
        comment.push_str(&format_info(&info, &marker.comment_prefix(), options, eol));
    }
    comment
}

/// Lays out info text as a comment body.
///
/// Multiline: each line break becomes `eol` followed by `comment_prefix`.
/// Single-line: line breaks and the indentation after them collapse into one space, then the
/// result is truncated unless `disable_truncation` is set.
pub fn format_info(info: &str, comment_prefix: &str, options: &Options, eol: &str) -> String {
    if options.multiline {
        let continuation = format!("{eol}{comment_prefix}");
        return LINE_BREAK
            .replace_all(info, NoExpand(&continuation))
            .into_owned();
    }

    let single_line = LINE_BREAK_AND_INDENT.replace_all(info, " ");
    if options.disable_truncation {
        single_line.into_owned()
    } else {
        truncate(&single_line, TRUNCATE_LEN)
    }
}

/// Cuts `text` to `max_len` characters, appending [`ELLIPSIS`] when something was cut.
pub fn truncate(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => {
            let mut out = text[..cut].to_string();
            out.push(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}

/// Extracts the type portion of a declaration's display parts.
///
/// - `interface Foo { .. }` / `enum Foo { .. }`: everything after the keyword.
/// - otherwise everything after the first `:` punctuation or `=` operator outside of
///   `()`, `{}` and `<>`.
/// - otherwise the full text.
///
/// The result is trimmed.
pub fn compact_text(parts: &[DisplayPart]) -> String {
    if let Some(idx) = parts.iter().position(|part| {
        part.kind == kind::KEYWORD && matches!(part.text.as_str(), "interface" | "enum")
    }) {
        return display_text(&parts[idx + 1..]).trim().to_string();
    }

    let mut depth = 0i32;
    for (idx, part) in parts.iter().enumerate() {
        match (part.kind.as_str(), part.text.as_str()) {
            (kind::PUNCTUATION, "(" | "{" | "<") => depth += 1,
            (kind::PUNCTUATION, ")" | "}" | ">") => depth -= 1,
            (kind::PUNCTUATION, ":") | (kind::OPERATOR, "=") if depth == 0 => {
                return display_text(&parts[idx + 1..]).trim().to_string();
            }
            _ => {}
        }
    }

    display_text(parts).trim().to_string()
}
