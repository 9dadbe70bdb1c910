//! model.rs — typed view of the search backend's response
//!
//! The backend speaks PascalCase JSON; these types rename every field to
//! something readable and turn `null` lists into empty ones. No further
//! validation happens here: contract checks live where the data is consumed.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::repos::RepoList;
use crate::span::ByteSpan;

/// A point in a file's decoded text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    /// Absolute 0-based byte offset.
    pub byte_offset: usize,
    /// 1-based line number.
    pub line_number: usize,
    /// 1-based column.
    pub column: usize,
}

/// One matched span; `end.byte_offset` is exclusive. May cover several lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchRange {
    pub start: Location,
    pub end: Location,
}

impl MatchRange {
    /// Absolute byte span of the match.
    pub fn byte_span(&self) -> Result<ByteSpan> {
        ByteSpan::try_new(self.start.byte_offset, self.end.byte_offset)
    }
}

/// A contiguous slice of file content surrounding one or more matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(rename = "Content")]
    pub content_base64: String,
    /// Absolute position of the first byte of `content_base64`.
    #[serde(rename = "ContentStart")]
    pub content_start: Location,
    /// The chunk is the file name itself rather than file content.
    #[serde(rename = "FileName")]
    pub is_file_name_chunk: bool,
    /// Ordered by start offset, non-overlapping.
    #[serde(rename = "Ranges")]
    pub match_ranges: Vec<MatchRange>,
}

impl Chunk {
    #[inline]
    pub fn match_count(&self) -> usize {
        self.match_ranges.len()
    }

    #[inline]
    pub fn start_line(&self) -> usize {
        self.content_start.line_number
    }

    #[inline]
    pub fn start_byte(&self) -> usize {
        self.content_start.byte_offset
    }
}

/// One file of a search result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultFile {
    pub repository: String,
    pub file_name: String,
    pub branches: Vec<String>,
    pub language: String,
    pub version: String,
    #[serde(rename = "ChunkMatches")]
    pub chunks: Vec<Chunk>,
}

impl ResultFile {
    /// The single chunk matching on the file name, if any.
    ///
    /// More than one is a backend contract violation.
    pub fn file_name_chunk(&self) -> Result<Option<&Chunk>> {
        let mut found = self.chunks.iter().filter(|c| c.is_file_name_chunk);
        let first = found.next();
        let extra = found.count();
        if extra > 0 {
            return Err(Error::MultipleFileNameChunks(extra + 1));
        }
        Ok(first)
    }

    /// Chunks of file content, in backend (score) order.
    pub fn content_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(|c| !c.is_file_name_chunk)
    }

    /// Matches across every chunk, file name included.
    pub fn total_match_count(&self) -> usize {
        self.chunks.iter().map(Chunk::match_count).sum()
    }
}

/// File-level search results with backend statistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResults {
    /// Backend search time in nanoseconds.
    pub duration: u64,
    pub file_count: usize,
    pub match_count: usize,
    pub files_skipped: usize,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub files: Vec<ResultFile>,
}

/// Which kind of result the backend chose to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    Default,
    RepoOnly,
    FilenameOnly,
}

/// Top-level search API response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResponse {
    pub results: SearchResults,
    pub repo_results: RepoList,
    pub search_type: SearchType,
}

impl SearchResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_json() -> serde_json::Value {
        json!({
            "Results": {
                "Duration": 1_234_567,
                "FileCount": 1,
                "MatchCount": 2,
                "FilesSkipped": 0,
                "Files": [{
                    "Repository": "github.com/acme/widgets",
                    "FileName": "src/main.rs",
                    "Branches": ["HEAD"],
                    "Language": "Rust",
                    "Version": "abc123",
                    "ChunkMatches": [{
                        "Content": "Zm4gbWFpbigpIHt9",
                        "ContentStart": {"ByteOffset": 0, "LineNumber": 1, "Column": 1},
                        "FileName": false,
                        "Ranges": [{
                            "Start": {"ByteOffset": 3, "LineNumber": 1, "Column": 4},
                            "End": {"ByteOffset": 7, "LineNumber": 1, "Column": 8}
                        }]
                    }, {
                        "Content": "c3JjL21haW4ucnM=",
                        "ContentStart": {"ByteOffset": 0, "LineNumber": 1, "Column": 1},
                        "FileName": true,
                        "Ranges": [{
                            "Start": {"ByteOffset": 4, "LineNumber": 1, "Column": 5},
                            "End": {"ByteOffset": 8, "LineNumber": 1, "Column": 9}
                        }]
                    }]
                }]
            },
            "RepoResults": {
                "Stats": {
                    "Repos": 0, "Shards": 0, "Documents": 0,
                    "IndexBytes": 0, "ContentBytes": 0, "NewLinesCount": 0
                },
                "Repos": null
            },
            "SearchType": "default"
        })
    }

    #[test]
    fn test_parse_backend_response() {
        let response = SearchResponse::from_json(&response_json().to_string()).unwrap();
        assert_eq!(response.search_type, SearchType::Default);
        assert_eq!(response.results.files.len(), 1);
        assert!(response.repo_results.repositories.is_empty());

        let file = &response.results.files[0];
        assert_eq!(file.chunks.len(), 2);
        assert_eq!(file.total_match_count(), 2);
        assert_eq!(file.content_chunks().count(), 1);
        assert!(file.file_name_chunk().unwrap().is_some());
        assert_eq!(file.chunks[0].match_ranges[0].start.column, 4);
    }

    #[test]
    fn test_null_files_become_empty() {
        let mut value = response_json();
        value["Results"]["Files"] = serde_json::Value::Null;
        let response: SearchResponse = serde_json::from_value(value).unwrap();
        assert!(response.results.files.is_empty());
    }

    #[test]
    fn test_multiple_file_name_chunks_rejected() {
        let response = SearchResponse::from_json(&response_json().to_string()).unwrap();
        let mut file = response.results.files[0].clone();
        let mut extra = file.chunks[1].clone();
        extra.content_start.byte_offset = 0;
        file.chunks.push(extra);
        assert!(matches!(
            file.file_name_chunk(),
            Err(Error::MultipleFileNameChunks(2))
        ));
    }
}
