//! User preferences that shape rendering, validated at the configuration boundary.
//!
//! Everything past this module trusts `Preferences`: a cutoff is always a
//! non-negative integer by the time the grouper sees it.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Order in which a file's chunks are grouped and shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchSortOrder {
    /// Ascending position in the file.
    #[default]
    LineNumber,
    /// Backend ranking, as received.
    Score,
}

/// Whether the search form submits on every change or on demand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Live,
    Manual,
}

pub const DEFAULT_FILE_MATCHES_CUTOFF: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPreferences", rename_all = "camelCase")]
pub struct Preferences {
    #[serde(rename = "searchType")]
    pub search_mode: SearchMode,
    pub match_sort_order: MatchSortOrder,
    /// Matches shown per file before the rest hide behind an expand action.
    pub file_matches_cutoff: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            search_mode: SearchMode::default(),
            match_sort_order: MatchSortOrder::default(),
            file_matches_cutoff: DEFAULT_FILE_MATCHES_CUTOFF,
        }
    }
}

impl Preferences {
    /// Parse and validate preferences from JSON; missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawPreferences = serde_json::from_str(json)?;
        Self::try_from(raw)
    }
}

/// A cutoff as a user or a stored preference file may spell it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CutoffInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CutoffInput {
    fn validate(self) -> Result<usize> {
        let invalid = |reason: String| Error::InvalidPreference {
            field: "fileMatchesCutoff",
            reason,
        };
        match self {
            CutoffInput::Integer(n) => {
                usize::try_from(n).map_err(|_| invalid(format!("{n} is negative")))
            }
            CutoffInput::Float(f) => {
                if f.fract() != 0.0 || !f.is_finite() {
                    Err(invalid(format!("{f} is not an integer")))
                } else if f < 0.0 {
                    Err(invalid(format!("{f} is negative")))
                } else {
                    Ok(f as usize)
                }
            }
            CutoffInput::Text(s) => parse_cutoff(&s),
        }
    }
}

/// Unvalidated preferences, as deserialized from a settings file or JSON.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPreferences {
    #[serde(rename = "searchType", alias = "search_type")]
    pub search_mode: Option<SearchMode>,
    #[serde(alias = "match_sort_order")]
    pub match_sort_order: Option<MatchSortOrder>,
    #[serde(alias = "file_matches_cutoff")]
    pub file_matches_cutoff: Option<CutoffInput>,
}

impl TryFrom<RawPreferences> for Preferences {
    type Error = Error;

    fn try_from(raw: RawPreferences) -> Result<Self> {
        let defaults = Preferences::default();
        Ok(Self {
            search_mode: raw.search_mode.unwrap_or(defaults.search_mode),
            match_sort_order: raw.match_sort_order.unwrap_or(defaults.match_sort_order),
            file_matches_cutoff: match raw.file_matches_cutoff {
                Some(input) => input.validate()?,
                None => defaults.file_matches_cutoff,
            },
        })
    }
}

/// Parse a cutoff typed into a form field: ASCII digits only.
pub fn parse_cutoff(input: &str) -> Result<usize> {
    let invalid = |reason: &str| Error::InvalidPreference {
        field: "fileMatchesCutoff",
        reason: format!("{input:?} {reason}"),
    };
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("is not a non-negative integer"));
    }
    input.parse().map_err(|_| invalid("is too large"))
}
