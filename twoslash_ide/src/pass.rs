//! One resolution pass: scan → resolve → format → plan, then a single batched apply.

use serde::{Deserialize, Serialize};
use twoslash::{
    EditPlan, MarkerOrder, Options, Settings, SourceMap, format_comment, plan_edit, query_info,
    scan_markers,
};

use crate::apply::{ApplyMode, apply_with_mode};
use crate::resolve::left_most_quick_info;
use crate::{EditorModel, IdeError, LanguageService};

pub const DEFAULT_PROBE_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PassConfig {
    /// Maximum number of positions probed per marker.
    pub probe_limit: usize,
    pub marker_order: MarkerOrder,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            probe_limit: DEFAULT_PROBE_LIMIT,
            marker_order: MarkerOrder::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum PassOutcome {
    /// Pause-on-error is on and the document has diagnostics.
    Paused,
    /// Every generated comment is already up to date.
    Unchanged,
    /// The document changed while the pass was resolving; nothing was written.
    Stale,
    /// `edits` replacements were written; the model is now at `version`.
    Applied { edits: usize, version: u64 },
}

/// Runs one pass over the model's current text.
///
/// Options are read from `settings` at the start of the pass. Markers that cannot be resolved
/// are skipped; the only errors are edit-application failures.
pub async fn fill_queries<M, S>(
    model: &mut M,
    service: &S,
    settings: &dyn Settings,
    mode: ApplyMode,
    config: &PassConfig,
) -> Result<PassOutcome, IdeError>
where
    M: EditorModel + ?Sized,
    S: LanguageService + ?Sized,
{
    let options = Options::from_settings(settings);
    let uri = model.uri().to_string();
    let text = model.text();
    let version = model.version();
    let eol = model.eol();

    if options.pause_on_error {
        let diagnostics = service.diagnostics(&uri).await;
        if !diagnostics.is_empty() {
            tracing::debug!(count = diagnostics.len(), "diagnostics present, pass paused");
            return Ok(PassOutcome::Paused);
        }
    }

    let sm = SourceMap::new(&text);
    let markers = scan_markers(&sm, config.marker_order);
    tracing::debug!(markers = markers.len(), ?mode, "resolving twoslash queries");

    let mut plan = EditPlan::default();
    for marker in &markers {
        let Some(query) = query_info(marker, &sm) else {
            tracing::debug!(line = marker.line, "marker has no line to query, skipped");
            continue;
        };

        let parts = left_most_quick_info(service, &uri, &sm, query, config.probe_limit)
            .await
            .unwrap_or_default();
        let comment = format_comment(marker, &parts, &options, &eol);

        if let Some(planned) = plan_edit(marker, &comment, &sm, &eol) {
            plan.push(planned);
        }
    }

    if plan.is_empty() {
        return Ok(PassOutcome::Unchanged);
    }

    if model.version() != version {
        tracing::debug!(
            started = version,
            current = model.version(),
            "document changed during pass"
        );
        return Ok(PassOutcome::Stale);
    }

    let edits = plan.len();
    apply_with_mode(model, &plan.into_text_edits(), mode)?;
    tracing::debug!(edits, "applied generated comments");

    Ok(PassOutcome::Applied {
        edits,
        version: model.version(),
    })
}
