use serde::{Deserialize, Serialize};

use crate::span::Span;

/// A single text edit in byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: Span,
    pub new_text: String,
}
