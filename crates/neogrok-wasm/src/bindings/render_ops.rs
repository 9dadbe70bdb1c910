//! Loading, rendering and expanding search results.

use crate::globals::{replace_view, update_outcome, with_view, with_view_mut};
use crate::js_err;
use crate::utils::{parse_preferences, to_js, warn_failed_files};
use neogrok_core::{render_response, RenderedPage, ResultsView, SearchResponse, TimedResponse};
use wasm_bindgen::prelude::*;

const NO_RESULTS: &str = "No results loaded";

/// Parse a backend search response, make it the current result set and render it.
///
/// `request_duration_ms` is the measured round trip, shown in the summary.
/// Every file starts collapsed.
#[wasm_bindgen]
pub fn load_results(
    json: String,
    prefs: JsValue,
    request_duration_ms: u32,
) -> Result<JsValue, JsValue> {
    let prefs = parse_preferences(prefs)?;
    let response = SearchResponse::from_json(&json)
        .map_err(|e| js_err!("Invalid search response: {}", e))?;
    let timed = TimedResponse {
        response,
        request_duration_ms: u64::from(request_duration_ms),
    };

    let page = render_response(
        &timed.response,
        &prefs,
        &[],
        Some(timed.request_duration_ms),
    );
    if let RenderedPage::Files(rendered) = &page {
        warn_failed_files(rendered);
    }
    replace_view(ResultsView::from_timed(timed.clone(), prefs));
    update_outcome(|outcome| outcome.succeeded(timed));

    to_js(&page)
}

/// Apply new preferences to the loaded results, keeping expand state.
#[wasm_bindgen]
pub fn set_preferences(prefs: JsValue) -> Result<JsValue, JsValue> {
    let prefs = parse_preferences(prefs)?;
    let rendered = with_view_mut(|view| {
        view.set_preferences(prefs);
        view.render()
    })
    .ok_or_else(|| js_err!(NO_RESULTS))?;

    warn_failed_files(&rendered);
    to_js(&rendered)
}

/// Render every loaded file.
#[wasm_bindgen]
pub fn render_results() -> Result<JsValue, JsValue> {
    let rendered = with_view(|view| view.render()).ok_or_else(|| js_err!(NO_RESULTS))?;
    warn_failed_files(&rendered);
    to_js(&rendered)
}

/// Render one file with its current expand state.
#[wasm_bindgen]
pub fn render_file(index: usize) -> Result<JsValue, JsValue> {
    let file = with_view(|view| view.render_file(index))
        .ok_or_else(|| js_err!(NO_RESULTS))?
        .map_err(|e| js_err!("Failed to render file {}: {}", index, e))?;
    to_js(&file)
}

/// Reveal every hidden match of a file and return it re-rendered.
#[wasm_bindgen]
pub fn expand_file(index: usize) -> Result<JsValue, JsValue> {
    let file = with_view_mut(|view| {
        view.expand(index)?;
        view.render_file(index)
    })
    .ok_or_else(|| js_err!(NO_RESULTS))?
    .map_err(|e| js_err!("Failed to expand file {}: {}", index, e))?;
    to_js(&file)
}

/// Collapse a file back to the configured cutoff and return it re-rendered.
#[wasm_bindgen]
pub fn collapse_file(index: usize) -> Result<JsValue, JsValue> {
    let file = with_view_mut(|view| {
        view.collapse(index)?;
        view.render_file(index)
    })
    .ok_or_else(|| js_err!(NO_RESULTS))?
    .map_err(|e| js_err!("Failed to collapse file {}: {}", index, e))?;
    to_js(&file)
}
