//! Section grouping with a per-file match cutoff.
//!
//! Chunks whose first line directly follows the previous group's last line
//! merge into that group. The cutoff is a soft floor: once it is reached,
//! grouping stops at the next gap, so a section is never cut in half.

use serde::Serialize;
use tracing::debug;

use crate::content::{tokenize_chunk, Line};
use crate::error::Result;
use crate::model::Chunk;

/// A run of consecutive source lines.
///
/// Invariant: non-empty, and line numbers increase by exactly one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LineGroup {
    lines: Vec<Line>,
}

impl LineGroup {
    fn new(lines: Vec<Line>) -> Self {
        debug_assert!(!lines.is_empty());
        Self { lines }
    }

    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[inline]
    pub fn first_line_number(&self) -> usize {
        self.lines.first().map_or(0, |l| l.line_number)
    }

    #[inline]
    pub fn last_line_number(&self) -> usize {
        self.lines.last().map_or(0, |l| l.line_number)
    }

    /// True when `chunk` starts on the line right after this group.
    #[inline]
    pub fn continues_with(&self, chunk: &Chunk) -> bool {
        self.last_line_number().checked_add(1) == Some(chunk.start_line())
    }
}

/// Outcome of grouping one file's chunks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grouping {
    pub groups: Vec<LineGroup>,
    pub shown_match_count: usize,
    pub total_match_count: usize,
}

impl Grouping {
    /// Matches left out by the cutoff.
    #[inline]
    pub fn hidden_match_count(&self) -> usize {
        self.total_match_count - self.shown_match_count
    }
}

/// Group already-sorted content chunks (no file name chunk) into line groups.
///
/// Chunks past the cutoff are counted but never decoded.
pub fn group_chunks(chunks: &[&Chunk], cutoff: usize, force_all: bool) -> Result<Grouping> {
    let total_match_count = chunks.iter().map(|c| c.match_count()).sum();
    let mut groups: Vec<LineGroup> = Vec::new();
    let mut shown_match_count = 0;

    for (i, chunk) in chunks.iter().enumerate() {
        let contiguous = groups.last().is_some_and(|g| g.continues_with(chunk));

        if !contiguous && shown_match_count >= cutoff && !force_all {
            debug!(
                cutoff,
                shown_match_count,
                skipped_chunks = chunks.len() - i,
                "match cutoff reached"
            );
            break;
        }

        let lines = tokenize_chunk(chunk)?;
        shown_match_count += chunk.match_count();

        match groups.last_mut() {
            Some(group) if contiguous => group.lines.extend(lines),
            _ => groups.push(LineGroup::new(lines)),
        }
    }

    Ok(Grouping {
        groups,
        shown_match_count,
        total_match_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::chunk;

    fn line_numbers(grouping: &Grouping) -> Vec<Vec<usize>> {
        grouping
            .groups
            .iter()
            .map(|g| g.lines().iter().map(|l| l.line_number).collect())
            .collect()
    }

    // "aa foo\nbb" is 9 bytes + the newline that separates it from the next line
    fn chunk_a() -> Chunk {
        chunk("aa foo\nbb", 1000, 10, &[(3, 6)])
    }

    #[test]
    fn test_contiguous_chunk_merges_past_cutoff() {
        let a = chunk_a();
        let b = chunk("cc foo\ndd", 1010, 12, &[(3, 6)]);
        let grouping = group_chunks(&[&a, &b], 1, false).unwrap();

        assert_eq!(line_numbers(&grouping), vec![vec![10, 11, 12, 13]]);
        assert_eq!(grouping.shown_match_count, 2);
        assert_eq!(grouping.hidden_match_count(), 0);
    }

    #[test]
    fn test_gap_stops_at_cutoff() {
        let a = chunk_a();
        let b = chunk("cc foo\ndd", 5000, 50, &[(3, 6)]);
        let grouping = group_chunks(&[&a, &b], 1, false).unwrap();

        assert_eq!(line_numbers(&grouping), vec![vec![10, 11]]);
        assert_eq!(grouping.shown_match_count, 1);
        assert_eq!(grouping.hidden_match_count(), 1);
    }

    #[test]
    fn test_zero_cutoff_collapses_everything() {
        let a = chunk_a();
        let grouping = group_chunks(&[&a], 0, false).unwrap();

        assert!(grouping.groups.is_empty());
        assert_eq!(grouping.shown_match_count, 0);
        assert_eq!(grouping.hidden_match_count(), 1);
    }

    #[test]
    fn test_force_all_ignores_cutoff() {
        let a = chunk_a();
        let b = chunk("cc foo\ndd", 5000, 50, &[(3, 6)]);
        let grouping = group_chunks(&[&a, &b], 0, true).unwrap();

        assert_eq!(line_numbers(&grouping), vec![vec![10, 11], vec![50, 51]]);
        assert_eq!(grouping.hidden_match_count(), 0);
    }

    #[test]
    fn test_chunks_past_cutoff_are_not_decoded() {
        let a = chunk_a();
        let mut broken = chunk("x", 9000, 90, &[(0, 1)]);
        broken.content_base64 = "%%%".to_string();
        let grouping = group_chunks(&[&a, &broken], 1, false).unwrap();
        assert_eq!(grouping.hidden_match_count(), 1);

        assert!(group_chunks(&[&a, &broken], 1, true).is_err());
    }

    #[test]
    fn test_raising_cutoff_only_adds_lines() {
        let chunks = [
            chunk_a(),
            chunk("x foo", 3000, 30, &[(2, 5)]),
            chunk("y foo foo", 4000, 40, &[(2, 5), (6, 9)]),
            chunk("z foo", 6000, 60, &[(2, 5)]),
        ];
        let refs: Vec<&Chunk> = chunks.iter().collect();

        let mut previous: Option<Grouping> = None;
        for cutoff in 0..=6 {
            let grouping = group_chunks(&refs, cutoff, false).unwrap();
            assert_eq!(
                grouping.hidden_match_count() + grouping.shown_match_count,
                grouping.total_match_count
            );
            if let Some(prev) = previous {
                assert!(grouping.groups.len() >= prev.groups.len());
                assert_eq!(&grouping.groups[..prev.groups.len()], &prev.groups[..]);
            }
            previous = Some(grouping);
        }

        let all = group_chunks(&refs, 0, true).unwrap();
        assert_eq!(all.groups.len(), 4);
        assert_eq!(all.shown_match_count, 5);
    }

    #[test]
    fn test_group_ending_on_last_line_number_does_not_continue() {
        let last = chunk("x foo", 0, usize::MAX, &[(2, 5)]);
        let next = chunk("y foo", 10, 1, &[(2, 5)]);
        let grouping = group_chunks(&[&last, &next], 0, true).unwrap();
        assert_eq!(grouping.groups.len(), 2);
        assert_eq!(grouping.groups[0].last_line_number(), usize::MAX);
    }

    #[test]
    fn test_grouping_is_repeatable() {
        let a = chunk_a();
        let b = chunk("cc foo\ndd", 1010, 12, &[(3, 6)]);
        let first = group_chunks(&[&a, &b], 1, false).unwrap();
        let second = group_chunks(&[&a, &b], 1, false).unwrap();
        assert_eq!(first, second);
    }
}
