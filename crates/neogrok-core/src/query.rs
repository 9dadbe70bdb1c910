//! Search API request body and error message formatting.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What the user asked the backend for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: String,
    /// Lines of context around each match.
    pub context_lines: usize,
    /// Maximum number of files to return.
    pub files: usize,
    pub matches_per_shard: usize,
    pub total_matches: usize,
}

impl SearchQuery {
    pub const DEFAULT_CONTEXT_LINES: usize = 1;
    pub const DEFAULT_FILES: usize = 50;
    pub const DEFAULT_MATCHES_PER_SHARD: usize = 1_000;
    pub const DEFAULT_TOTAL_MATCHES: usize = 10_000;

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context_lines: Self::DEFAULT_CONTEXT_LINES,
            files: Self::DEFAULT_FILES,
            matches_per_shard: Self::DEFAULT_MATCHES_PER_SHARD,
            total_matches: Self::DEFAULT_TOTAL_MATCHES,
        }
    }

    pub fn request_body(&self) -> SearchRequest<'_> {
        SearchRequest {
            q: &self.query,
            search_opts: SearchOpts {
                chunk_matches: true,
                num_context_lines: self.context_lines,
                max_doc_display_count: self.files,
                shard_max_match_count: self.matches_per_shard,
                total_max_match_count: self.total_matches,
                include_repo_urls_and_line_fragments: false,
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.request_body())?)
    }
}

/// Body of a POST to the backend's search endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchRequest<'a> {
    pub q: &'a str,
    #[serde(rename = "SearchOpts")]
    pub search_opts: SearchOpts,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchOpts {
    /// Always on: rendering works on chunks, not single lines.
    pub chunk_matches: bool,
    pub num_context_lines: usize,
    pub max_doc_display_count: usize,
    pub shard_max_match_count: usize,
    pub total_max_match_count: usize,
    #[serde(rename = "IncludeRepoURLsAndLineFragments")]
    pub include_repo_urls_and_line_fragments: bool,
}

#[derive(Deserialize)]
struct BadRequestBody {
    #[serde(rename = "Error")]
    error: String,
}

/// User-facing message for a failed search response.
///
/// A 400 carries a query error in its `Error` field; anything else is reported
/// with its status line and body.
pub fn error_message(status: u16, status_text: &str, body: &str) -> String {
    if status == 400 {
        if let Ok(BadRequestBody { error }) = serde_json::from_str(body) {
            return error;
        }
    }
    let mut message = format!("Search failed, HTTP {status}: {status_text}");
    let body = body.trim();
    if !body.is_empty() {
        message.push_str(" - ");
        message.push_str(body);
    }
    message
}
