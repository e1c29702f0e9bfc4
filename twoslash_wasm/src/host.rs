//! Playground sandbox objects behind the `twoslash_ide` collaborator traits.
//!
//! Everything here is a thin call-through: `JsValue` in, DTO out via `serde-wasm-bindgen`, then
//! [`Converter`] to the byte-based core types.

use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Reflect};
use twoslash::{Diagnostic, QuickInfo, Settings, SourceMap, TextEdit};
use twoslash_ide::{EditorModel, IdeError, LanguageService};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::converter::Converter;
use crate::dto::v1::{Diagnostic as DiagnosticDto, EditOperation, QuickInfo as QuickInfoDto};
use crate::offsets::byte_offset_to_utf16_offset;

fn method(target: &JsValue, name: &str) -> Result<Function, JsValue> {
    Reflect::get(target, &JsValue::from_str(name))?.dyn_into::<Function>()
}

/// Calls `target[name](...args)`.
pub(crate) fn call(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let args: Array = args.iter().collect();
    method(target, name)?.apply(target, &args)
}

/// Calls `target[name](...args)` and awaits the result when it is a promise.
pub(crate) async fn call_async(
    target: &JsValue,
    name: &str,
    args: &[JsValue],
) -> Result<JsValue, JsValue> {
    let result = call(target, name, args)?;
    JsFuture::from(Promise::resolve(&result)).await
}

pub(crate) fn host_error(err: JsValue) -> IdeError {
    IdeError::Host(
        err.as_string()
            .or_else(|| {
                err.dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{err:?}")),
    )
}

// ----------------------------
// TS worker
// ----------------------------

/// The playground's TypeScript worker, bound to one text snapshot for offset conversion.
pub struct JsLanguageService {
    worker: JsValue,
    text: String,
}

impl JsLanguageService {
    pub fn new(worker: JsValue, text: String) -> Self {
        Self { worker, text }
    }

    async fn diagnostics_from(&self, request: &str, file: &str) -> Vec<Diagnostic> {
        let value = match call_async(&self.worker, request, &[JsValue::from_str(file)]).await {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(request, ?err, "diagnostics request failed");
                return Vec::new();
            }
        };
        match serde_wasm_bindgen::from_value::<Vec<DiagnosticDto>>(value) {
            Ok(list) => list
                .into_iter()
                .map(|dto| Converter::diagnostic(&self.text, dto))
                .collect(),
            Err(err) => {
                tracing::debug!(request, %err, "unreadable diagnostics");
                Vec::new()
            }
        }
    }
}

#[async_trait(?Send)]
impl LanguageService for JsLanguageService {
    async fn quick_info(&self, file: &str, offset: usize) -> Option<QuickInfo> {
        let utf16 = byte_offset_to_utf16_offset(&self.text, offset);
        let value = call_async(
            &self.worker,
            "getQuickInfoAtPosition",
            &[JsValue::from_str(file), JsValue::from(utf16)],
        )
        .await
        .ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        let dto: QuickInfoDto = serde_wasm_bindgen::from_value(value).ok()?;
        Some(Converter::quick_info(dto))
    }

    async fn syntactic_diagnostics(&self, file: &str) -> Vec<Diagnostic> {
        self.diagnostics_from("getSyntacticDiagnostics", file).await
    }

    async fn semantic_diagnostics(&self, file: &str) -> Vec<Diagnostic> {
        self.diagnostics_from("getSemanticDiagnostics", file).await
    }
}

// ----------------------------
// Monaco model + editor
// ----------------------------

pub struct JsEditorModel {
    model: JsValue,
    editor: JsValue,
    uri: String,
}

impl JsEditorModel {
    /// Reads `sandbox.getModel()` and `sandbox.editor`.
    pub fn from_sandbox(sandbox: &JsValue) -> Result<Self, JsValue> {
        let model = call(sandbox, "getModel", &[])?;
        let editor = Reflect::get(sandbox, &JsValue::from_str("editor"))?;
        let path = Reflect::get(&model, &JsValue::from_str("uri"))
            .and_then(|uri| Reflect::get(&uri, &JsValue::from_str("path")))?
            .as_string()
            .unwrap_or_default();
        Ok(Self {
            model,
            editor,
            uri: format!("file://{path}"),
        })
    }

    fn operations(&self, edits: &[TextEdit]) -> Result<JsValue, IdeError> {
        let text = self.text();
        let sm = SourceMap::new(&text);
        let operations: Vec<EditOperation> = edits
            .iter()
            .map(|edit| Converter::edit_operation(&sm, edit))
            .collect();
        serde_wasm_bindgen::to_value(&operations).map_err(|err| IdeError::Host(err.to_string()))
    }

    fn call_model(&self, request: &str) {
        if let Err(err) = call(&self.model, request, &[]) {
            tracing::warn!(request, ?err, "model call failed");
        }
    }
}

impl EditorModel for JsEditorModel {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn text(&self) -> String {
        call(&self.model, "getValue", &[])
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default()
    }

    fn eol(&self) -> String {
        call(&self.model, "getEOL", &[])
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_else(|| "\n".to_string())
    }

    fn version(&self) -> u64 {
        call(&self.model, "getVersionId", &[])
            .ok()
            .and_then(|value| value.as_f64())
            .map_or(0, |version| version as u64)
    }

    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<(), IdeError> {
        let operations = self.operations(edits)?;
        call(&self.model, "applyEdits", &[operations]).map_err(host_error)?;
        Ok(())
    }

    fn execute_edits(&mut self, source: &str, edits: &[TextEdit]) -> Result<(), IdeError> {
        let operations = self.operations(edits)?;
        let accepted = call(
            &self.editor,
            "executeEdits",
            &[JsValue::from_str(source), operations],
        )
        .map_err(host_error)?;
        if accepted.as_bool() == Some(false) {
            return Err(IdeError::Host("editor rejected the edits".to_string()));
        }
        Ok(())
    }

    fn push_stack_element(&mut self) {
        self.call_model("pushStackElement");
    }

    fn pop_stack_element(&mut self) {
        self.call_model("popStackElement");
    }
}

// ----------------------------
// Settings
// ----------------------------

/// Option flags as stored by the playground: the string `"true"` under the flag's key.
///
/// Reads through `getter(key)` when one is given, `globalThis.localStorage` otherwise.
pub struct JsSettings {
    getter: Option<Function>,
}

impl JsSettings {
    pub fn new(getter: Option<Function>) -> Self {
        Self { getter }
    }

    fn read(&self, key: &str) -> Result<JsValue, JsValue> {
        let key = JsValue::from_str(key);
        match &self.getter {
            Some(getter) => getter.call1(&JsValue::NULL, &key),
            None => {
                let storage = Reflect::get(&js_sys::global(), &JsValue::from_str("localStorage"))?;
                if storage.is_undefined() || storage.is_null() {
                    return Ok(JsValue::NULL);
                }
                call(&storage, "getItem", &[key])
            }
        }
    }
}

impl Settings for JsSettings {
    fn get_bool(&self, key: &str) -> bool {
        match self.read(key) {
            Ok(value) => {
                value.as_bool() == Some(true) || value.as_string().as_deref() == Some("true")
            }
            Err(err) => {
                tracing::debug!(key, ?err, "settings read failed");
                false
            }
        }
    }
}
