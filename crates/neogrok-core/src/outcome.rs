//! What the results area shows after each search attempt.
//!
//! A failed search keeps the last successful results around so the page does
//! not go blank while the user fixes a typo in the query.

use serde::Serialize;

use crate::model::SearchResponse;

/// A backend response plus how long the round trip took.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedResponse {
    pub response: SearchResponse,
    pub request_duration_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SearchOutcome {
    /// Nothing searched yet, or the query was cleared. `query` is the one
    /// in flight, if any.
    None { query: Option<String> },
    Success(TimedResponse),
    Error {
        error: String,
        previous_results: Option<TimedResponse>,
    },
}

impl Default for SearchOutcome {
    fn default() -> Self {
        SearchOutcome::None { query: None }
    }
}

impl SearchOutcome {
    /// Awaiting the first response for `query`.
    pub fn pending(query: impl Into<String>) -> Self {
        SearchOutcome::None {
            query: Some(query.into()),
        }
    }

    /// Results worth displaying: the current ones, or the ones an error is hiding behind.
    pub fn results(&self) -> Option<&TimedResponse> {
        match self {
            SearchOutcome::None { .. } => None,
            SearchOutcome::Success(timed) => Some(timed),
            SearchOutcome::Error {
                previous_results, ..
            } => previous_results.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SearchOutcome::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn succeeded(self, response: TimedResponse) -> Self {
        SearchOutcome::Success(response)
    }

    /// Record a failure, carrying forward whatever results were on screen.
    pub fn failed(self, error: impl Into<String>) -> Self {
        let previous_results = match self {
            SearchOutcome::None { .. } => None,
            SearchOutcome::Success(timed) => Some(timed),
            SearchOutcome::Error {
                previous_results, ..
            } => previous_results,
        };
        SearchOutcome::Error {
            error: error.into(),
            previous_results,
        }
    }

    pub fn cleared(self) -> Self {
        SearchOutcome::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SearchResults, SearchType};
    use crate::repos::RepoList;

    fn timed(ms: u64) -> TimedResponse {
        TimedResponse {
            response: SearchResponse {
                results: SearchResults {
                    duration: 0,
                    file_count: 0,
                    match_count: 0,
                    files_skipped: 0,
                    files: Vec::new(),
                },
                repo_results: RepoList::default(),
                search_type: SearchType::Default,
            },
            request_duration_ms: ms,
        }
    }

    #[test]
    fn test_errors_carry_last_success_forward() {
        let outcome = SearchOutcome::default()
            .succeeded(timed(7))
            .failed("bad query")
            .failed("still bad");

        assert_eq!(outcome.error(), Some("still bad"));
        assert_eq!(outcome.results().map(|t| t.request_duration_ms), Some(7));
    }

    #[test]
    fn test_error_before_any_success_has_no_results() {
        let outcome = SearchOutcome::pending("foo(").failed("boom");
        assert!(outcome.results().is_none());
    }

    #[test]
    fn test_success_replaces_error() {
        let outcome = SearchOutcome::default().failed("boom").succeeded(timed(3));
        assert_eq!(outcome.error(), None);
        assert_eq!(outcome.results().map(|t| t.request_duration_ms), Some(3));
        assert_eq!(outcome.cleared(), SearchOutcome::default());
    }
}
