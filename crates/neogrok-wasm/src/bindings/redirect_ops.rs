use wasm_bindgen::prelude::*;

/// GitHub URL for a legacy livegrep fileviewer path; `hash` is the URL
/// fragment including its `#`. Returns `undefined` for malformed paths.
#[wasm_bindgen]
pub fn livegrep_redirect_url(path: String, hash: String) -> Option<String> {
    neogrok_core::livegrep_redirect_url(&path, &hash)
}
