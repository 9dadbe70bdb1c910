//! Repository listing: the list API model and its display ordering.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::null_as_empty;

/// Index-wide or per-repository statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    #[serde(rename = "Repos")]
    pub repo_count: u64,
    #[serde(rename = "Shards")]
    pub shard_count: u64,
    #[serde(rename = "Documents")]
    pub file_count: u64,
    #[serde(rename = "IndexBytes")]
    pub index_bytes: u64,
    #[serde(rename = "ContentBytes")]
    pub content_bytes: u64,
    #[serde(rename = "NewLinesCount")]
    pub lines: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepoBranch {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepositoryInfo {
    pub name: String,
    #[serde(rename = "ID")]
    pub id: u64,
    pub rank: u64,
    #[serde(rename = "URL")]
    pub url: String,
    /// RFC 3339 timestamp.
    #[serde(rename = "LatestCommitDate")]
    pub last_commit: String,
    pub branches: Vec<RepoBranch>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// RFC 3339 timestamp.
    #[serde(rename = "IndexTime")]
    pub last_indexed: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepoEntry {
    pub repository: RepositoryInfo,
    pub index_metadata: IndexMetadata,
    pub stats: RepoStats,
}

impl RepoEntry {
    /// `name@version` pairs, space separated.
    pub fn branch_summary(&self) -> String {
        self.repository
            .branches
            .iter()
            .map(|b| format!("{}@{}", b.name, b.version))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// List API response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoList {
    #[serde(rename = "Stats")]
    pub stats: RepoStats,
    #[serde(rename = "Repos", default, deserialize_with = "null_as_empty")]
    pub repositories: Vec<RepoEntry>,
}

impl RepoList {
    /// Repositories ordered by rank, then id, then name.
    pub fn sorted(&self) -> Vec<&RepoEntry> {
        let mut repos: Vec<&RepoEntry> = self.repositories.iter().collect();
        repos.sort_by(|a, b| {
            let (a, b) = (&a.repository, &b.repository);
            a.rank
                .cmp(&b.rank)
                .then(a.id.cmp(&b.id))
                .then_with(|| a.name.cmp(&b.name))
        });
        repos
    }

    /// One-line header, e.g. `2 repositories containing 40 files consuming 1.2MB of RAM`.
    pub fn summary(&self) -> String {
        let count = self.repositories.len();
        format!(
            "{} {} containing {} files consuming {} of RAM",
            count,
            if count == 1 { "repository" } else { "repositories" },
            self.stats.file_count,
            format_bytes(self.stats.index_bytes + self.stats.content_bytes),
        )
    }
}

static FRACTIONAL_SECONDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.\d+(Z|[+-]\d{2}:\d{2})$").expect("valid regex"));

/// Drop fractional seconds from an RFC 3339 timestamp to keep it short.
pub fn trim_fractional_seconds(timestamp: &str) -> String {
    FRACTIONAL_SECONDS.replace(timestamp, "$1").into_owned()
}

/// Decimal (SI) byte size, no space: `999B`, `1.2kB`, `34MB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["kB", "MB", "GB", "TB", "PB"];
    if bytes < 1000 {
        return format!("{bytes}B");
    }
    let mut value = bytes as f64;
    let mut unit = UNITS[0];
    for u in UNITS {
        value /= 1000.0;
        unit = u;
        if value < 1000.0 {
            break;
        }
    }
    if value < 10.0 {
        let text = format!("{value:.2}");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        format!("{text}{unit}")
    } else if value < 100.0 {
        let text = format!("{value:.1}");
        format!("{}{unit}", text.trim_end_matches(".0"))
    } else {
        format!("{value:.0}{unit}")
    }
}
