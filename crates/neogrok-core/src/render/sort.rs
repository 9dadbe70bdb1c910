//! Chunk ordering ahead of grouping.

use crate::model::Chunk;
use crate::prefs::MatchSortOrder;

/// Order content chunks for grouping.
///
/// `Score` keeps the backend order (already ranked); `LineNumber` is a stable
/// sort by the chunk's starting byte offset.
pub fn sort_chunks<'a>(mut chunks: Vec<&'a Chunk>, order: MatchSortOrder) -> Vec<&'a Chunk> {
    if order == MatchSortOrder::LineNumber {
        chunks.sort_by_key(|c| c.start_byte());
    }
    chunks
}
