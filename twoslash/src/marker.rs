//! Marker scanning.
//!
//! Two marker kinds are recognized:
//! - caret queries, a line made of optional indentation, `//`, optional spaces and `^?`;
//! - arrow queries, any line containing `//=>` (the last occurrence on the line wins).
//!
//! Both kinds start at the beginning of their line, so a marker's `match_text` is always a line
//! prefix. A line carries at most one marker; caret queries take precedence. Arrows inside the
//! generated block of an earlier marker are part of that marker's info text, not markers.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::source_map::SourceMap;

static CARET_QUERY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)(// *\^\?)").expect("valid caret query pattern"));

static ARROW_QUERY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^.*//=>").expect("valid arrow query pattern"));

static CARET_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*// *\^\?").expect("valid caret line pattern"));

const ARROW: &str = "//=>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    /// `// ^?`: query the token above the caret.
    Caret,
    /// `//=>`: query the expression before the arrow, or the previous line.
    Arrow,
}

/// Order in which markers are handed to the resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerOrder {
    /// All caret markers in document order, then all arrow markers in document order.
    #[default]
    KindsInSequence,
    /// Every marker in document order, kinds interleaved.
    Document,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    /// Matched text, from the start of the line through the marker token.
    pub match_text: String,
    /// Byte offset of the match (always a line start).
    pub start: usize,
    /// Indentation of the marker line.
    pub prefix_whitespace: String,
    /// 1-based line of the marker.
    pub line: usize,
}

impl Marker {
    /// Byte offset just past the matched text.
    pub fn end(&self) -> usize {
        self.start + self.match_text.len()
    }

    /// Text on the marker line in front of the marker token.
    ///
    /// For caret markers this is the indentation; for arrow markers it is the code (if any)
    /// that the arrow annotates.
    pub fn leading_text(&self) -> &str {
        match self.kind {
            MarkerKind::Caret => &self.prefix_whitespace,
            MarkerKind::Arrow => &self.match_text[..self.match_text.len() - ARROW.len()],
        }
    }

    /// Prefix of continuation lines in a multiline comment.
    ///
    /// `<indent>//` right-padded so the continuation text lines up with the info that follows
    /// the marker (one column past the match text).
    pub fn comment_prefix(&self) -> String {
        let width = self.match_text.chars().count() + 1;
        let mut prefix = format!("{}//", self.prefix_whitespace);
        let pad = width.saturating_sub(prefix.chars().count());
        prefix.extend(std::iter::repeat_n(' ', pad));
        prefix
    }

    /// Last line of the generated block that starts at the marker line.
    ///
    /// The block continues over lines that start with [`Marker::comment_prefix`] and ends before
    /// a caret query line. Info text may contain `//=>`, so arrows never end a block.
    pub fn block_last_line(&self, sm: &SourceMap<'_>) -> usize {
        let prefix = self.comment_prefix();
        let mut last = self.line;
        while let Some(text) = sm.line_text(last + 1) {
            if !text.starts_with(&prefix) || CARET_LINE.is_match(text) {
                break;
            }
            last += 1;
        }
        last
    }
}

/// Finds every marker in the document.
pub fn scan_markers(sm: &SourceMap<'_>, order: MarkerOrder) -> Vec<Marker> {
    let text = sm.source();
    let mut markers = Vec::new();

    for caps in CARET_QUERY.captures_iter(text) {
        let (Some(whole), Some(indent)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        markers.push(Marker {
            kind: MarkerKind::Caret,
            match_text: whole.as_str().to_string(),
            start: whole.start(),
            prefix_whitespace: indent.as_str().to_string(),
            line: sm.line_col(whole.start()).line,
        });
    }

    let caret_lines: HashSet<usize> = markers.iter().map(|marker| marker.line).collect();

    for whole in ARROW_QUERY.find_iter(text) {
        let line = sm.line_col(whole.start()).line;
        if caret_lines.contains(&line) {
            tracing::trace!(line, "arrow marker shares a line with a caret marker");
            continue;
        }
        let indent_len = whole
            .as_str()
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(whole.len());
        markers.push(Marker {
            kind: MarkerKind::Arrow,
            match_text: whole.as_str().to_string(),
            start: whole.start(),
            prefix_whitespace: whole.as_str()[..indent_len].to_string(),
            line,
        });
    }

    let mut markers = drop_generated_arrows(markers, sm);
    if order == MarkerOrder::KindsInSequence {
        markers.sort_by_key(|marker| marker.kind != MarkerKind::Caret);
    }

    markers
}

/// Drops arrow matches that sit inside an earlier marker's generated block. Returns the rest in
/// document order.
fn drop_generated_arrows(mut markers: Vec<Marker>, sm: &SourceMap<'_>) -> Vec<Marker> {
    markers.sort_by_key(|marker| marker.start);

    let mut kept: Vec<Marker> = Vec::with_capacity(markers.len());
    let mut block_end = 0;
    for marker in markers {
        if marker.kind == MarkerKind::Arrow && marker.line <= block_end {
            tracing::trace!(line = marker.line, "arrow inside a generated block");
            continue;
        }
        block_end = marker.block_last_line(sm);
        kept.push(marker);
    }
    kept
}
