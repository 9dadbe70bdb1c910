pub mod content;
pub mod error;
pub mod links;
pub mod model;
pub mod outcome;
pub mod prefs;
pub mod query;
pub mod render;
pub mod repos;
pub mod span;

#[cfg(test)]
mod test_support;

pub use content::{decode, parse_into_lines, tokenize_chunk, Line, LineIndex, LineToken, TokenKind};
pub use error::{Error, Result};
pub use links::livegrep_redirect_url;
pub use model::{Chunk, Location, MatchRange, ResultFile, SearchResponse, SearchResults, SearchType};
pub use outcome::{SearchOutcome, TimedResponse};
pub use prefs::{parse_cutoff, MatchSortOrder, Preferences, RawPreferences, SearchMode};
pub use query::SearchQuery;
pub use render::{
    render_response, render_results, Affordance, CutoffController, CutoffState, FileOutcome,
    LineGroup, RenderedFile, RenderedPage, RenderedResults, ResultsSummary, ResultsView,
};
pub use repos::{RepoEntry, RepoList};
pub use span::ByteSpan;

/// Everything a frontend needs to load, render and page through results.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::model::SearchResponse;
    pub use crate::prefs::{MatchSortOrder, Preferences};
    pub use crate::render::{
        Affordance, FileOutcome, RenderedFile, RenderedPage, RenderedResults, ResultsView,
    };
}
