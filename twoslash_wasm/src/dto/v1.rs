use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ----------------------------
// Language service (TS worker) payloads
// ----------------------------

#[derive(Deserialize, Serialize, TS, Clone, Debug, PartialEq, Eq)]
pub struct DisplayPart {
    pub kind: String,
    pub text: String,
}

/// Subset of `ts.QuickInfo` the filler reads.
#[derive(Deserialize, Serialize, TS, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuickInfo {
    #[serde(default)]
    pub display_parts: Option<Vec<DisplayPart>>,
}

#[derive(Deserialize, Serialize, TS, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageChain {
    pub message_text: String,
}

#[derive(Deserialize, Serialize, TS, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum MessageText {
    Text(String),
    Chain(MessageChain),
}

/// Subset of `ts.Diagnostic`. `start` and `length` are UTF-16 offsets.
#[derive(Deserialize, Serialize, TS, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// `ts.DiagnosticCategory`: 0 warning, 1 error, 2 suggestion, 3 message.
    pub category: u8,
    pub message_text: MessageText,
    #[serde(default)]
    pub start: Option<u32>,
    #[serde(default)]
    pub length: Option<u32>,
}

// ----------------------------
// Editor (Monaco) payloads
// ----------------------------

/// `monaco.IRange`: 1-based lines, 1-based UTF-16 columns, end exclusive.
#[derive(Deserialize, Serialize, TS, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MonacoRange {
    pub start_line_number: u32,
    pub start_column: u32,
    pub end_line_number: u32,
    pub end_column: u32,
}

/// `monaco.editor.IIdentifiedSingleEditOperation`.
#[derive(Deserialize, Serialize, TS, Clone, Debug, PartialEq, Eq)]
pub struct EditOperation {
    pub range: MonacoRange,
    pub text: String,
}

// ----------------------------
// Plugin results
// ----------------------------

#[derive(Serialize, TS, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ApplyModeView {
    UndoGroup,
    Replay,
}

/// What the host should do after a content change.
#[derive(Serialize, TS, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TriggerView {
    Ignored,
    /// Call `poll` at `deadlineMs` (same clock as the `nowMs` passed in).
    Debounced {
        #[serde(rename = "deadlineMs")]
        deadline_ms: f64,
    },
    /// Call `fill` now.
    Immediate { mode: ApplyModeView },
    /// A pass is running and will pick this request up.
    Queued { mode: ApplyModeView },
}

#[derive(Serialize, TS, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PassOutcomeView {
    Paused,
    Unchanged,
    Stale,
    Applied,
    /// The request joined a pass that was already running.
    Queued,
}

#[derive(Serialize, TS, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PassResult {
    pub outcome: PassOutcomeView,
    pub edits: u32,
    /// Model version after the pass, when it wrote anything.
    pub version: Option<u32>,
    /// Debounce deadline armed by changes seen during the pass. Call `poll` then.
    pub next_deadline_ms: Option<f64>,
}

#[derive(Serialize, TS, Clone, Debug, PartialEq, Eq)]
pub struct OptionDescriptor {
    pub flag: String,
    pub display: String,
    pub blurb: String,
}

#[derive(Serialize, TS, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfo {
    pub id: String,
    pub display_name: String,
    pub description: String,
}
