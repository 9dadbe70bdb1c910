use crate::js_err;
use crate::utils::{parse_preferences, to_js};
use neogrok_core::parse_cutoff;
use wasm_bindgen::prelude::*;

/// Validate a cutoff typed into the preferences form.
#[wasm_bindgen]
pub fn parse_cutoff_input(input: String) -> Result<u32, JsValue> {
    let cutoff = parse_cutoff(&input).map_err(|e| js_err!("{}", e))?;
    u32::try_from(cutoff).map_err(|_| js_err!("Cutoff {} is too large", cutoff))
}

/// Validate stored preferences, filling in defaults for missing keys.
#[wasm_bindgen]
pub fn normalize_preferences(prefs: JsValue) -> Result<JsValue, JsValue> {
    to_js(&parse_preferences(prefs)?)
}
