//! Rendering of a single result file.

use serde::Serialize;

use crate::content::{decode, parse_into_lines, LineToken};
use crate::error::Result;
use crate::links;
use crate::model::{Chunk, ResultFile};
use crate::prefs::Preferences;
use crate::render::cutoff::{Affordance, CutoffController, CutoffState};
use crate::render::group::{group_chunks, LineGroup};
use crate::render::sort::sort_chunks;

/// A file ready for display: highlighted name, line groups, and counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedFile {
    /// 1-based position in the result list.
    pub rank: usize,
    pub repository: String,
    pub file_name: String,
    /// Set when the file name itself matched.
    pub file_name_tokens: Option<Vec<LineToken>>,
    pub repository_url: Option<String>,
    pub file_url: Option<String>,
    /// Header facts: match count, branches, language, rank.
    pub metadata: Vec<String>,
    pub groups: Vec<LineGroup>,
    /// Matches across every chunk, file name included.
    pub total_match_count: usize,
    pub shown_match_count: usize,
    pub hidden_match_count: usize,
    pub cutoff_state: CutoffState,
    pub affordance: Affordance,
}

impl RenderedFile {
    /// Link to one line of the file on its code host.
    pub fn line_url(&self, line_number: usize) -> Option<String> {
        self.file_url
            .as_deref()
            .map(|url| links::line_url(url, line_number))
    }
}

/// Highlight a file name chunk with the same tokenizer as file content.
///
/// Only the first line counts; file names do not contain newlines.
fn file_name_tokens(chunk: &Chunk) -> Result<Vec<LineToken>> {
    let decoded = decode(&chunk.content_base64)?;
    let lines = parse_into_lines(decoded.text(), chunk.start_byte(), &chunk.match_ranges)?;
    Ok(lines.into_iter().next().unwrap_or_default())
}

fn metadata(file: &ResultFile, total_match_count: usize, rank: usize) -> Vec<String> {
    let mut metadata = vec![format!(
        "{} {}",
        total_match_count,
        if total_match_count == 1 { "match" } else { "matches" }
    )];
    // HEAD alone says nothing useful
    if !file.branches.is_empty() && file.branches != ["HEAD"] {
        metadata.push(file.branches.join(", "));
    }
    metadata.push(file.language.clone());
    metadata.push(format!("№{rank}"));
    metadata
}

/// Render one file under the given preferences and expand/collapse state.
pub fn render_file(
    file: &ResultFile,
    rank: usize,
    prefs: &Preferences,
    controller: &CutoffController,
) -> Result<RenderedFile> {
    let file_name_tokens = file
        .file_name_chunk()?
        .map(file_name_tokens)
        .transpose()?;

    let chunks = sort_chunks(file.content_chunks().collect(), prefs.match_sort_order);
    let (cutoff, force_all) = controller.window(prefs.file_matches_cutoff);
    let grouping = group_chunks(&chunks, cutoff, force_all)?;

    let total_match_count = file.total_match_count();
    let hidden_match_count = grouping.hidden_match_count();

    Ok(RenderedFile {
        rank,
        repository: file.repository.clone(),
        file_name: file.file_name.clone(),
        file_name_tokens,
        repository_url: links::repository_url(&file.repository),
        file_url: links::file_url(&file.repository, &file.version, &file.file_name),
        metadata: metadata(file, total_match_count, rank),
        shown_match_count: grouping.shown_match_count,
        groups: grouping.groups,
        total_match_count,
        hidden_match_count,
        cutoff_state: controller.state(),
        affordance: controller.affordance(hidden_match_count),
    })
}
