//! Page state for the WASM module.
//!
//! The results view lives for as long as the page shows a result set and is
//! replaced wholesale on every new search. The search outcome remembers the
//! last successful response so errors can be shown above it.

use neogrok_core::{ResultsView, SearchOutcome};
use std::cell::RefCell;

thread_local! {
    /// The result set on screen, with per-file expand state.
    static VIEW: RefCell<Option<ResultsView>> = const { RefCell::new(None) };

    static OUTCOME: RefCell<SearchOutcome> = RefCell::new(SearchOutcome::default());
}

/// Install a fresh view, dropping any previous expand state.
pub fn replace_view(view: ResultsView) {
    VIEW.with(|slot| *slot.borrow_mut() = Some(view));
}

pub fn clear_view() {
    VIEW.with(|slot| *slot.borrow_mut() = None);
}

/// Run `f` against the current view, if one is loaded.
pub fn with_view<R>(f: impl FnOnce(&ResultsView) -> R) -> Option<R> {
    VIEW.with(|slot| slot.borrow().as_ref().map(f))
}

/// Run `f` against the current view mutably, if one is loaded.
pub fn with_view_mut<R>(f: impl FnOnce(&mut ResultsView) -> R) -> Option<R> {
    VIEW.with(|slot| slot.borrow_mut().as_mut().map(f))
}

/// Move the search outcome to its next state.
pub fn update_outcome(f: impl FnOnce(SearchOutcome) -> SearchOutcome) {
    OUTCOME.with(|slot| {
        let mut outcome = slot.borrow_mut();
        let current = std::mem::take(&mut *outcome);
        *outcome = f(current);
    });
}

pub fn with_outcome<R>(f: impl FnOnce(&SearchOutcome) -> R) -> R {
    OUTCOME.with(|slot| f(&slot.borrow()))
}
