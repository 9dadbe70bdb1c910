//! WASM bindings for the neogrok results engine.

use wasm_bindgen::prelude::*;

mod bindings;
mod globals;
mod utils;

pub use bindings::*;

#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

#[wasm_bindgen]
pub fn view_stats() -> Result<JsValue, JsValue> {
    use crate::globals::with_view;
    use crate::utils::JsObjectBuilder;

    let stats = with_view(|view| {
        (
            view.file_count(),
            view.results()
                .files
                .iter()
                .map(|f| f.total_match_count())
                .sum::<usize>(),
            view.expanded_file_count(),
            view.preferences().file_matches_cutoff,
        )
    });

    let obj = match stats {
        Some((files, matches, expanded, cutoff)) => JsObjectBuilder::new()
            .set("loaded", JsValue::from_bool(true))?
            .set("files", JsValue::from(files as u32))?
            .set("matches", JsValue::from(matches as u32))?
            .set("expandedFiles", JsValue::from(expanded as u32))?
            .set("fileMatchesCutoff", JsValue::from(cutoff as u32))?
            .build(),
        None => JsObjectBuilder::new()
            .set("loaded", JsValue::from_bool(false))?
            .build(),
    };

    Ok(obj)
}
