//! Quick-info display parts as produced by a language service.
//!
//! Parts are ordered and tagged with a kind (`keyword`, `punctuation`, `operator`, `text`, ...).
//! The formatter only inspects the kinds listed in [`kind`]; everything else is opaque text.

use serde::{Deserialize, Serialize};

pub mod kind {
    pub const KEYWORD: &str = "keyword";
    pub const PUNCTUATION: &str = "punctuation";
    pub const OPERATOR: &str = "operator";
    pub const SPACE: &str = "space";
    pub const TEXT: &str = "text";
    pub const LINE_BREAK: &str = "lineBreak";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPart {
    pub kind: String,
    pub text: String,
}

impl DisplayPart {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
        }
    }

    pub fn keyword(text: impl Into<String>) -> Self {
        Self::new(kind::KEYWORD, text)
    }

    pub fn punctuation(text: impl Into<String>) -> Self {
        Self::new(kind::PUNCTUATION, text)
    }

    pub fn operator(text: impl Into<String>) -> Self {
        Self::new(kind::OPERATOR, text)
    }

    pub fn space() -> Self {
        Self::new(kind::SPACE, " ")
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(kind::TEXT, text)
    }

    pub fn is(&self, kind: &str, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

/// Quick info at a position. Only the display parts are consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickInfo {
    #[serde(default)]
    pub display_parts: Vec<DisplayPart>,
}

/// Concatenates the text of all parts, in order.
pub fn display_text(parts: &[DisplayPart]) -> String {
    parts.iter().map(|part| part.text.as_str()).collect()
}
