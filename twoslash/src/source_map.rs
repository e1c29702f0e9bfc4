use crate::span::LineCol;

/// Line index over a document snapshot.
///
/// Line terminators are `\n` or `\r\n`; line text never includes the terminator.
pub struct SourceMap<'a> {
    src: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceMap<'a> {
    pub fn new(src: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in src.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { src, line_starts }
    }

    pub fn source(&self) -> &'a str {
        self.src
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the 1-based line/column of a byte offset. Offsets past the end clamp to the end.
    pub fn line_col(&self, byte: usize) -> LineCol {
        let b = byte.min(self.src.len());
        let line_idx = match self.line_starts.binary_search(&b) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let col = b.saturating_sub(self.line_starts[line_idx]);
        LineCol::new(line_idx + 1, col + 1)
    }

    /// Byte offset of the first character of `line`.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line.checked_sub(1)?).copied()
    }

    /// Byte offset just past the last character of `line`, excluding its terminator.
    pub fn line_end(&self, line: usize) -> Option<usize> {
        let start = self.line_start(line)?;
        let end = match self.line_starts.get(line) {
            Some(next) => next - 1,
            None => self.src.len(),
        };
        let bytes = self.src.as_bytes();
        if end > start && bytes[end - 1] == b'\r' {
            return Some(end - 1);
        }
        Some(end)
    }

    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let start = self.line_start(line)?;
        let end = self.line_end(line)?;
        self.src.get(start..end)
    }

    /// Byte offset of a 1-based position. The column may point one past the last character.
    pub fn offset_at(&self, pos: LineCol) -> Option<usize> {
        let start = self.line_start(pos.line)?;
        let end = self.line_end(pos.line)?;
        let offset = start + pos.col.checked_sub(1)?;
        if offset > end || !self.src.is_char_boundary(offset) {
            return None;
        }
        Some(offset)
    }
}

/// Line-ending sequence of a document: the first terminator found, `\n` when there is none.
pub fn detect_eol(src: &str) -> &'static str {
    match src.find('\n') {
        Some(i) if i > 0 && src.as_bytes()[i - 1] == b'\r' => "\r\n",
        _ => "\n",
    }
}
