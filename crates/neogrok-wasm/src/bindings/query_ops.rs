//! Search API request bodies and error messages.

use crate::js_err;
use neogrok_core::query::{error_message, SearchQuery};
use wasm_bindgen::prelude::*;

/// JSON body for a search request.
#[wasm_bindgen]
pub fn build_search_request(query: JsValue) -> Result<String, JsValue> {
    let query: SearchQuery = serde_wasm_bindgen::from_value(query)
        .map_err(|e| js_err!("Invalid search query: {}", e))?;
    query
        .to_json()
        .map_err(|e| js_err!("Failed to encode search query: {}", e))
}

/// Message to show for a non-OK search response.
#[wasm_bindgen]
pub fn search_error_message(status: u16, status_text: String, body: String) -> String {
    error_message(status, &status_text, &body)
}
