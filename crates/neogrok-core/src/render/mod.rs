//! Turning search results into displayable files.
//!
//! Per file: sort chunks, pick the grouping window from the expand state,
//! group, then attach counts and the expand/collapse affordance. One file
//! failing a decoding or schema check does not take the others down.

pub mod cutoff;
pub mod file;
pub mod group;
pub mod sort;
pub mod view;

pub use cutoff::{Affordance, CutoffController, CutoffState};
pub use file::{render_file, RenderedFile};
pub use group::{group_chunks, Grouping, LineGroup};
pub use sort::sort_chunks;
pub use view::ResultsView;

use serde::Serialize;
use tracing::warn;

use crate::model::{ResultFile, SearchResponse, SearchResults, SearchType};
use crate::prefs::Preferences;
use crate::repos::RepoList;

/// Result of rendering one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FileOutcome {
    Rendered(RenderedFile),
    Failed {
        rank: usize,
        repository: String,
        file_name: String,
        error: String,
    },
}

impl FileOutcome {
    pub fn rendered(&self) -> Option<&RenderedFile> {
        match self {
            FileOutcome::Rendered(file) => Some(file),
            FileOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// Render `file` at 0-based `index`, capturing failures.
pub(crate) fn render_outcome(
    file: &ResultFile,
    index: usize,
    prefs: &Preferences,
    controller: &CutoffController,
) -> FileOutcome {
    let rank = index + 1;
    match render_file(file, rank, prefs, controller) {
        Ok(rendered) => FileOutcome::Rendered(rendered),
        Err(err) => {
            warn!(
                repository = %file.repository,
                file_name = %file.file_name,
                decoding = err.is_decoding(),
                schema = err.is_schema(),
                "failed to render file: {err}"
            );
            FileOutcome::Failed {
                rank,
                repository: file.repository.clone(),
                file_name: file.file_name.clone(),
                error: err.to_string(),
            }
        }
    }
}

/// Header counts for a result set.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    pub backend_file_count: usize,
    pub backend_match_count: usize,
    /// The backend skipped files after hitting its match limits.
    pub truncated: bool,
    /// Backend search time, floored to two decimals.
    pub backend_duration_ms: f64,
    pub frontend_file_count: usize,
    pub frontend_match_count: usize,
    /// Round trip time, when the caller measured one.
    pub request_duration_ms: Option<u64>,
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

impl ResultsSummary {
    pub fn new(results: &SearchResults) -> Self {
        Self {
            backend_file_count: results.file_count,
            backend_match_count: results.match_count,
            truncated: results.files_skipped > 0,
            backend_duration_ms: (results.duration as f64 / 1e4).floor() / 1e2,
            frontend_file_count: results.files.len(),
            frontend_match_count: results.files.iter().map(ResultFile::total_match_count).sum(),
            request_duration_ms: None,
        }
    }

    pub fn with_request_duration(mut self, ms: u64) -> Self {
        self.request_duration_ms = Some(ms);
        self
    }

    /// e.g. `Backend: 3 files / 10 matches (truncated) / 1.23ms`
    pub fn backend_line(&self) -> String {
        format!(
            "Backend: {} {} / {} {}{} / {}ms",
            self.backend_file_count,
            plural(self.backend_file_count, "file", "files"),
            self.backend_match_count,
            plural(self.backend_match_count, "match", "matches"),
            if self.truncated { " (truncated)" } else { "" },
            self.backend_duration_ms,
        )
    }

    /// e.g. `Frontend: 3 files / 10 matches / 42ms`
    pub fn frontend_line(&self) -> String {
        let mut line = format!(
            "Frontend: {} {} / {} {}",
            self.frontend_file_count,
            plural(self.frontend_file_count, "file", "files"),
            self.frontend_match_count,
            plural(self.frontend_match_count, "match", "matches"),
        );
        if let Some(ms) = self.request_duration_ms {
            line.push_str(&format!(" / {ms}ms"));
        }
        line
    }
}

/// A rendered result set.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedResults {
    pub summary: ResultsSummary,
    pub files: Vec<FileOutcome>,
}

impl RenderedResults {
    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_failed()).count()
    }
}

/// Render every file of `results`. `controllers[i]` holds the expand state of
/// file `i`; files without one render collapsed.
pub fn render_results(
    results: &SearchResults,
    prefs: &Preferences,
    controllers: &[CutoffController],
) -> RenderedResults {
    let collapsed = CutoffController::new();
    let files = results
        .files
        .iter()
        .enumerate()
        .map(|(i, file)| render_outcome(file, i, prefs, controllers.get(i).unwrap_or(&collapsed)))
        .collect();

    RenderedResults {
        summary: ResultsSummary::new(results),
        files,
    }
}

/// What a search response renders as. Repository-only searches are shown alone.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "page", content = "data", rename_all = "camelCase")]
pub enum RenderedPage {
    Files(RenderedResults),
    Repositories(RepoList),
}

pub fn render_response(
    response: &SearchResponse,
    prefs: &Preferences,
    controllers: &[CutoffController],
    request_duration_ms: Option<u64>,
) -> RenderedPage {
    match response.search_type {
        SearchType::RepoOnly => RenderedPage::Repositories(response.repo_results.clone()),
        SearchType::Default | SearchType::FilenameOnly => {
            let mut rendered = render_results(&response.results, prefs, controllers);
            if let Some(ms) = request_duration_ms {
                rendered.summary = rendered.summary.with_request_duration(ms);
            }
            RenderedPage::Files(rendered)
        }
    }
}
