//! Core of the twoslash comment filler.
//!
//! Pipeline: scan markers → compute query positions → format comments → plan edits.
//! Offsets are UTF-8 byte offsets into the document text and ranges are `[start, end)`.
//! Lines and columns are 1-based; columns count bytes. UTF-16 conversion for editors happens in
//! `twoslash_wasm`, and everything that talks to a language service lives in `twoslash_ide`.

mod diagnostics;
mod display;
mod format;
mod marker;
mod options;
mod plan;
mod query;
mod source_map;
mod span;
mod text_edit;

/// Identifier of the plugin in the host editor; also used as the edit source of undoable edits.
pub const PLUGIN_ID: &str = "shareable-twoslash-comments";

pub use diagnostics::{Diagnostic, DiagnosticCategory};
pub use display::{DisplayPart, QuickInfo, display_text, kind};
pub use format::{ELLIPSIS, TRUNCATE_LEN, compact_text, format_comment, format_info, truncate};
pub use marker::{Marker, MarkerKind, MarkerOrder, scan_markers};
pub use options::{OPTION_DESCRIPTORS, OptionDescriptor, Options, Settings, keys};
pub use plan::{EditPlan, PlannedEdit, PreviousComment, plan_edit, previous_comment};
pub use query::{QueryInfo, query_info};
pub use source_map::{SourceMap, detect_eol};
pub use span::{LineCol, Span};
pub use text_edit::TextEdit;
