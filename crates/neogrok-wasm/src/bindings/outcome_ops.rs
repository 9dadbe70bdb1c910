//! Search outcome transitions: failures keep the last good results on screen.

use crate::globals::{clear_view, update_outcome, with_outcome};
use crate::utils::JsObjectBuilder;
use neogrok_core::SearchOutcome;
use wasm_bindgen::prelude::*;

fn describe(outcome: &SearchOutcome) -> Result<JsValue, JsValue> {
    let kind = match outcome {
        SearchOutcome::None { .. } => "none",
        SearchOutcome::Success(_) => "success",
        SearchOutcome::Error { .. } => "error",
    };
    let mut obj = JsObjectBuilder::new()
        .set("kind", JsValue::from_str(kind))?
        .set("hasResults", JsValue::from_bool(outcome.results().is_some()))?;
    if let Some(error) = outcome.error() {
        obj = obj.set("error", JsValue::from_str(error))?;
    }
    if let SearchOutcome::None { query: Some(query) } = outcome {
        obj = obj.set("query", JsValue::from_str(query))?;
    }
    if let Some(timed) = outcome.results() {
        obj = obj.set(
            "requestDurationMs",
            JsValue::from_f64(timed.request_duration_ms as f64),
        )?;
    }
    Ok(obj.build())
}

/// Record a failed search. Results from the last successful search stay
/// loaded; with none, the view is cleared.
#[wasm_bindgen]
pub fn search_failed(error: String) -> Result<JsValue, JsValue> {
    update_outcome(|outcome| outcome.failed(error));
    if with_outcome(|outcome| outcome.results().is_none()) {
        clear_view();
    }
    with_outcome(describe)
}

/// Note the query of a search that has not answered yet. Has no effect once
/// results or an error are showing.
#[wasm_bindgen]
pub fn search_started(query: String) {
    update_outcome(|outcome| match outcome {
        SearchOutcome::None { .. } => SearchOutcome::pending(query),
        other => other,
    });
}

/// Forget results and errors, as for an emptied query box.
#[wasm_bindgen]
pub fn clear_results() {
    update_outcome(SearchOutcome::cleared);
    clear_view();
}

#[wasm_bindgen]
pub fn search_outcome() -> Result<JsValue, JsValue> {
    with_outcome(describe)
}
