//! Utility functions for WASM bindings to reduce boilerplate.

use js_sys::Object;
use neogrok_core::{Preferences, RawPreferences, RenderedResults};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[macro_export]
macro_rules! js_err {
    ($msg:expr) => {
        JsValue::from_str($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        JsValue::from_str(&format!($fmt, $($arg)*))
    };
}

/// Convert a serializable value to a plain JavaScript object.
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| js_err!("Failed to serialize result: {}", e))
}

/// Read preferences from a JavaScript object; `undefined` or `null` means defaults.
pub fn parse_preferences(value: JsValue) -> Result<Preferences, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(Preferences::default());
    }
    let raw: RawPreferences = serde_wasm_bindgen::from_value(value)
        .map_err(|e| js_err!("Invalid preferences: {}", e))?;
    Preferences::try_from(raw).map_err(|e| js_err!("{}", e))
}

/// Surface per-file render failures in the browser console.
pub fn warn_failed_files(rendered: &RenderedResults) {
    for outcome in &rendered.files {
        if let neogrok_core::FileOutcome::Failed {
            repository,
            file_name,
            error,
            ..
        } = outcome
        {
            web_sys::console::warn_1(
                &format!("Failed to render {}/{}: {}", repository, file_name, error).into(),
            );
        }
    }
}

/// Helper for building JavaScript objects.
pub struct JsObjectBuilder {
    obj: Object,
}

impl JsObjectBuilder {
    pub fn new() -> Self {
        Self { obj: Object::new() }
    }

    pub fn set(self, key: &str, value: JsValue) -> Result<Self, JsValue> {
        js_sys::Reflect::set(&self.obj, &JsValue::from_str(key), &value)
            .map_err(|e| js_err!("Failed to set property '{}': {:?}", key, e))?;
        Ok(self)
    }

    pub fn build(self) -> JsValue {
        self.obj.into()
    }
}
