//! Conversion utilities for the WASM/JS boundary.
//!
//! Stateless: UTF-16 ↔ byte bridging for editor positions, and conversion between `twoslash` /
//! `twoslash_ide` types and the `dto::v1` views. No filler logic lives here.

use std::time::Duration;

use twoslash::{
    Diagnostic, DiagnosticCategory, DisplayPart, OPTION_DESCRIPTORS, QuickInfo, SourceMap, Span,
    TextEdit,
};
use twoslash_ide::{ApplyMode, PassOutcome, Trigger};

use crate::dto::v1::{
    ApplyModeView, Diagnostic as DiagnosticDto, EditOperation, MessageText, MonacoRange,
    OptionDescriptor, PassOutcomeView, PassResult, QuickInfo as QuickInfoDto, TriggerView,
};
use crate::offsets::{byte_offset_to_utf16_offset, utf16_offset_to_byte};

pub struct Converter;

impl Converter {
    pub fn quick_info(dto: QuickInfoDto) -> QuickInfo {
        QuickInfo {
            display_parts: dto
                .display_parts
                .unwrap_or_default()
                .into_iter()
                .map(|part| DisplayPart::new(part.kind, part.text))
                .collect(),
        }
    }

    pub fn diagnostic(source: &str, dto: DiagnosticDto) -> Diagnostic {
        let category = match dto.category {
            0 => DiagnosticCategory::Warning,
            2 => DiagnosticCategory::Suggestion,
            3 => DiagnosticCategory::Message,
            _ => DiagnosticCategory::Error,
        };
        let message = match dto.message_text {
            MessageText::Text(text) => text,
            MessageText::Chain(chain) => chain.message_text,
        };
        let span = dto.start.map(|start| {
            let end = start.saturating_add(dto.length.unwrap_or(0));
            Span::new(
                utf16_offset_to_byte(source, start as usize),
                utf16_offset_to_byte(source, end as usize),
            )
        });

        Diagnostic {
            category,
            message,
            span,
        }
    }

    /// Convert a byte edit to a Monaco edit operation over the same snapshot.
    pub fn edit_operation(sm: &SourceMap<'_>, edit: &TextEdit) -> EditOperation {
        EditOperation {
            range: Self::monaco_range(sm, edit.range),
            text: edit.new_text.clone(),
        }
    }

    pub fn monaco_range(sm: &SourceMap<'_>, span: Span) -> MonacoRange {
        let (start_line_number, start_column) = Self::monaco_position(sm, span.start as usize);
        let (end_line_number, end_column) = Self::monaco_position(sm, span.end as usize);
        MonacoRange {
            start_line_number,
            start_column,
            end_line_number,
            end_column,
        }
    }

    /// 1-based line and 1-based UTF-16 column of a byte offset.
    pub fn monaco_position(sm: &SourceMap<'_>, byte: usize) -> (u32, u32) {
        let pos = sm.line_col(byte);
        let line_start = sm.line_start(pos.line).unwrap_or(0);
        let line = sm.source().get(line_start..).unwrap_or_default();
        let col = byte_offset_to_utf16_offset(line, pos.col - 1);
        (
            u32::try_from(pos.line).unwrap_or(u32::MAX),
            col.saturating_add(1),
        )
    }

    pub fn apply_mode_view(mode: ApplyMode) -> ApplyModeView {
        match mode {
            ApplyMode::UndoGroup => ApplyModeView::UndoGroup,
            ApplyMode::Replay => ApplyModeView::Replay,
        }
    }

    pub fn trigger_view(trigger: Trigger) -> TriggerView {
        match trigger {
            Trigger::Ignored => TriggerView::Ignored,
            Trigger::Debounced { deadline } => TriggerView::Debounced {
                deadline_ms: Self::duration_to_ms(deadline),
            },
            Trigger::Immediate { mode } => TriggerView::Immediate {
                mode: Self::apply_mode_view(mode),
            },
            Trigger::Queued { mode } => TriggerView::Queued {
                mode: Self::apply_mode_view(mode),
            },
        }
    }

    pub fn pass_result(outcome: PassOutcome, next_deadline: Option<Duration>) -> PassResult {
        let (outcome, edits, version) = match outcome {
            PassOutcome::Paused => (PassOutcomeView::Paused, 0, None),
            PassOutcome::Unchanged => (PassOutcomeView::Unchanged, 0, None),
            PassOutcome::Stale => (PassOutcomeView::Stale, 0, None),
            PassOutcome::Applied { edits, version } => (
                PassOutcomeView::Applied,
                u32::try_from(edits).unwrap_or(u32::MAX),
                Some(u32::try_from(version).unwrap_or(u32::MAX)),
            ),
        };
        PassResult {
            outcome,
            edits,
            version,
            next_deadline_ms: next_deadline.map(Self::duration_to_ms),
        }
    }

    pub fn queued_result() -> PassResult {
        PassResult {
            outcome: PassOutcomeView::Queued,
            edits: 0,
            version: None,
            next_deadline_ms: None,
        }
    }

    pub fn option_descriptors() -> Vec<OptionDescriptor> {
        OPTION_DESCRIPTORS
            .iter()
            .map(|descriptor| OptionDescriptor {
                flag: descriptor.flag.to_string(),
                display: descriptor.display.to_string(),
                blurb: descriptor.blurb.to_string(),
            })
            .collect()
    }

    /// Host clock reading in milliseconds. Negative or non-finite readings map to zero.
    pub fn ms_to_duration(ms: f64) -> Duration {
        if ms.is_finite() && ms > 0.0 {
            Duration::from_nanos((ms * 1_000_000.0) as u64)
        } else {
            Duration::ZERO
        }
    }

    pub fn duration_to_ms(duration: Duration) -> f64 {
        duration.as_nanos() as f64 / 1_000_000.0
    }
}
