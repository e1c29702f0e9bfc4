//! Browser bridge: drives `twoslash_ide` passes against the TypeScript playground sandbox.
//!
//! The host forwards Monaco content-change events to [`TwoslashPlugin::on_content_change`], owns
//! the timers, and calls back into `poll`/`fill` as the returned trigger says.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Error as JsError, Function, Promise};
use twoslash::PLUGIN_ID;
use twoslash_ide::{
    ApplyMode, ContentChange, EditorModel, IdeError, PassConfig, PassOutcome, Scheduler, Trigger,
    fill_queries,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

pub mod converter;
pub mod dto;
pub mod host;
pub mod offsets;

use converter::Converter;
use dto::v1::PluginInfo;
use host::{JsEditorModel, JsLanguageService, JsSettings, call_async};

pub const DISPLAY_NAME: &str = "Shareable Twoslash Comments";

pub const DESCRIPTION: &str = "This plugin embeds twoslash (// ^?) type hints as literal comments in your code, making them easy to copy and share.";

fn to_js_error(err: IdeError) -> JsValue {
    JsValue::from(JsError::new(&err.to_string()))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

struct PluginState {
    sandbox: JsValue,
    settings: JsSettings,
    scheduler: RefCell<Scheduler>,
    config: PassConfig,
}

impl PluginState {
    async fn run_once(&self, mode: ApplyMode) -> Result<PassOutcome, JsValue> {
        let worker = call_async(&self.sandbox, "getWorkerProcess", &[]).await?;
        let mut model = JsEditorModel::from_sandbox(&self.sandbox)?;
        let service = JsLanguageService::new(worker, model.text());
        fill_queries(&mut model, &service, &self.settings, mode, &self.config)
            .await
            .map_err(to_js_error)
    }

    /// Runs a pass, then every request that arrived while it was running.
    async fn run(self: Rc<Self>, mut mode: ApplyMode) -> Result<JsValue, JsValue> {
        if !self.scheduler.borrow_mut().begin(mode) {
            tracing::debug!(?mode, "pass in flight, request queued");
            return to_js(&Converter::queued_result());
        }

        loop {
            let outcome = self.run_once(mode).await;
            let applied = match &outcome {
                Ok(PassOutcome::Applied { version, .. }) => Some(*version),
                _ => None,
            };
            let (next, deadline) = {
                let mut scheduler = self.scheduler.borrow_mut();
                (scheduler.finish(applied), scheduler.deadline())
            };

            match (next, outcome) {
                (Some(next), Err(err)) => {
                    tracing::warn!(?err, "pass failed, running queued request");
                    mode = next;
                }
                (Some(next), Ok(_)) => mode = next,
                (None, outcome) => return to_js(&Converter::pass_result(outcome?, deadline)),
            }

            if !self.scheduler.borrow_mut().begin(mode) {
                return to_js(&Converter::queued_result());
            }
        }
    }

    fn spawn(self: &Rc<Self>, mode: ApplyMode) -> Promise {
        future_to_promise(Rc::clone(self).run(mode))
    }
}

#[wasm_bindgen]
pub struct TwoslashPlugin {
    state: Rc<PluginState>,
}

#[wasm_bindgen]
impl TwoslashPlugin {
    /// `sandbox` is the playground sandbox. `settings` is an optional `(flag) => boolean | string`
    /// getter; option flags are read from `localStorage` without one.
    #[wasm_bindgen(constructor)]
    pub fn new(
        sandbox: JsValue,
        settings: Option<Function>,
        debounce_ms: Option<f64>,
    ) -> TwoslashPlugin {
        let scheduler = match debounce_ms {
            Some(ms) => Scheduler::new(Converter::ms_to_duration(ms)),
            None => Scheduler::default(),
        };
        TwoslashPlugin {
            state: Rc::new(PluginState {
                sandbox,
                settings: JsSettings::new(settings),
                scheduler: RefCell::new(scheduler),
                config: PassConfig::default(),
            }),
        }
    }

    /// Runs a pass now. Resolves to a `PassResult`.
    pub fn fill(&self, is_undo_redo: bool) -> Promise {
        let mode = if is_undo_redo {
            ApplyMode::Replay
        } else {
            ApplyMode::UndoGroup
        };
        self.state.spawn(mode)
    }

    /// Reports a Monaco `IModelContentChangedEvent` observed at `now_ms`. Returns a `TriggerView`.
    #[wasm_bindgen(js_name = onContentChange)]
    pub fn on_content_change(&self, event: JsValue, now_ms: f64) -> Result<JsValue, JsValue> {
        let change: ContentChange = serde_wasm_bindgen::from_value(event)?;
        let trigger = self
            .state
            .scheduler
            .borrow_mut()
            .on_change(&change, Converter::ms_to_duration(now_ms));
        to_js(&Converter::trigger_view(trigger))
    }

    /// Starts the debounced pass once its deadline has passed.
    pub fn poll(&self, now_ms: f64) -> Option<Promise> {
        let mode = self
            .state
            .scheduler
            .borrow_mut()
            .poll(Converter::ms_to_duration(now_ms))?;
        Some(self.state.spawn(mode))
    }

    /// An option was toggled: refill right away, or after the running pass.
    #[wasm_bindgen(js_name = optionsChanged)]
    pub fn options_changed(&self) -> Option<Promise> {
        let trigger = self.state.scheduler.borrow_mut().request_now();
        match trigger {
            Trigger::Immediate { mode } => Some(self.state.spawn(mode)),
            _ => None,
        }
    }
}

#[wasm_bindgen(js_name = optionDescriptors)]
pub fn option_descriptors() -> Result<JsValue, JsValue> {
    to_js(&Converter::option_descriptors())
}

#[wasm_bindgen(js_name = pluginInfo)]
pub fn plugin_info() -> Result<JsValue, JsValue> {
    to_js(&PluginInfo {
        id: PLUGIN_ID.to_string(),
        display_name: DISPLAY_NAME.to_string(),
        description: DESCRIPTION.to_string(),
    })
}
