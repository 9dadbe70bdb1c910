//! span.rs — absolute byte ranges within a file's content
//!
//! Match ranges and line extents arrive as absolute file offsets, while the
//! decoded chunk text is indexed from zero. `ByteSpan` carries the absolute
//! form; `local_range` maps it back onto the chunk text.

use std::{
    cmp::{max, min},
    ops::Range,
};

use crate::error::{Error, Result};

/// Half-open absolute byte range `[start, end)`.
///
/// Invariants:
/// - Units are **bytes**, not chars.
/// - `start <= end` always holds (empty spans are allowed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct ByteSpan {
    pub start: usize,
    pub end: usize,
}

impl ByteSpan {
    /// Create a span if `end >= start`; returns `InvalidRange` if not.
    #[inline]
    pub fn try_new(start: usize, end: usize) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidRange(start, end));
        }
        Ok(Self { start, end })
    }

    /// Length in bytes: `end - start` (0 for empty).
    #[inline]
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// True if the span is empty (start == end).
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// True if half-open intervals overlap:
    /// `self.start < other.end && other.start < self.end`.
    #[inline]
    #[must_use]
    pub fn overlaps(self, other: &ByteSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Intersection of two spans (half-open), or `None` if disjoint or only touching.
    #[inline]
    #[must_use]
    pub fn intersection(self, other: &ByteSpan) -> Option<ByteSpan> {
        if !self.overlaps(other) {
            return None;
        }
        Some(ByteSpan {
            start: max(self.start, other.start),
            end: min(self.end, other.end),
        })
    }

    /// Range relative to `base`, for slicing text that starts at absolute byte `base`.
    ///
    /// Callers guarantee `base <= start`.
    #[inline]
    #[must_use]
    pub fn local_range(self, base: usize) -> Range<usize> {
        (self.start - base)..(self.end - base)
    }
}
