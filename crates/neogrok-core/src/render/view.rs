//! Stateful holder for the result set currently on screen.
//!
//! Keeps one `CutoffController` per file. A new result set resets them all;
//! a preference change keeps them and only re-renders.

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::SearchResults;
use crate::outcome::TimedResponse;
use crate::prefs::Preferences;
use crate::render::cutoff::CutoffController;
use crate::render::file::{render_file, RenderedFile};
use crate::render::{render_results, RenderedResults};

#[derive(Clone, Debug)]
pub struct ResultsView {
    results: SearchResults,
    prefs: Preferences,
    controllers: Vec<CutoffController>,
    /// Round trip of the request that produced `results`.
    request_duration_ms: Option<u64>,
}

impl ResultsView {
    pub fn new(results: SearchResults, prefs: Preferences) -> Self {
        let controllers = vec![CutoffController::new(); results.files.len()];
        Self {
            results,
            prefs,
            controllers,
            request_duration_ms: None,
        }
    }

    /// View over a response whose round trip was measured.
    pub fn from_timed(timed: TimedResponse, prefs: Preferences) -> Self {
        Self {
            request_duration_ms: Some(timed.request_duration_ms),
            ..Self::new(timed.response.results, prefs)
        }
    }

    #[inline]
    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    #[inline]
    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    #[inline]
    pub fn file_count(&self) -> usize {
        self.results.files.len()
    }

    pub fn expanded_file_count(&self) -> usize {
        self.controllers.iter().filter(|c| c.is_expanded()).count()
    }

    #[inline]
    pub fn request_duration_ms(&self) -> Option<u64> {
        self.request_duration_ms
    }

    /// Swap in a new result set; every file starts collapsed.
    pub fn replace_results(&mut self, results: SearchResults, request_duration_ms: Option<u64>) {
        debug!(files = results.files.len(), request_duration_ms, "replacing result set");
        self.controllers = vec![CutoffController::new(); results.files.len()];
        self.results = results;
        self.request_duration_ms = request_duration_ms;
    }

    pub fn set_preferences(&mut self, prefs: Preferences) {
        self.prefs = prefs;
    }

    fn controller(&self, index: usize) -> Result<&CutoffController> {
        self.controllers.get(index).ok_or(Error::NoSuchFile(index))
    }

    /// Render one file with its current expand state.
    pub fn render_file(&self, index: usize) -> Result<RenderedFile> {
        let controller = self.controller(index)?;
        let file = &self.results.files[index];
        render_file(file, index + 1, &self.prefs, controller)
    }

    /// Reveal the hidden matches of a file. Returns false when nothing was hidden
    /// or the file was already expanded.
    pub fn expand(&mut self, index: usize) -> Result<bool> {
        let hidden = self.render_file(index)?.hidden_match_count;
        let expanded = self.controllers[index].expand(hidden);
        debug!(index, hidden, expanded, "expand file");
        Ok(expanded)
    }

    /// Collapse a file back to the configured cutoff. Returns the number of
    /// matches the expansion had revealed.
    pub fn collapse(&mut self, index: usize) -> Result<Option<usize>> {
        self.controller(index)?;
        Ok(self.controllers[index].collapse())
    }

    pub fn render(&self) -> RenderedResults {
        let mut rendered = render_results(&self.results, &self.prefs, &self.controllers);
        if let Some(ms) = self.request_duration_ms {
            rendered.summary = rendered.summary.with_request_duration(ms);
        }
        rendered
    }
}
