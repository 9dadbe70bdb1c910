use memchr::memchr_iter;

/// Line starts of one chunk's text, relative to the chunk's first byte.
///
/// A trailing `'\n'` terminates the last line; it does not open an empty one.
#[derive(Debug, Clone)]
pub struct LineIndex {
    // 0-based byte offsets; strictly increasing; first is always 0
    line_starts: Vec<usize>,
    total_bytes: usize,
}

impl LineIndex {
    /// Build by scanning for '\n' only.
    pub fn build(bytes: &[u8]) -> Self {
        let mut starts = Vec::with_capacity(16);
        starts.push(0);
        for nl in memchr_iter(b'\n', bytes) {
            let next = nl + 1;
            if next < bytes.len() {
                starts.push(next);
            }
        }
        Self {
            line_starts: starts,
            total_bytes: bytes.len(),
        }
    }

    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    #[inline]
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    /// Byte range of the given line (1-based), terminator included.
    #[inline]
    pub fn byte_range_of(&self, line: usize) -> Option<(usize, usize)> {
        let i = line.checked_sub(1)?;
        let start = *self.line_starts.get(i)?;
        let end = self
            .line_starts
            .get(i + 1)
            .copied()
            .unwrap_or(self.total_bytes);
        Some((start, end))
    }

    /// Byte range of the given line (1-based) without its `'\n'`.
    ///
    /// A `'\r'` before the newline stays part of the line text.
    #[inline]
    pub fn content_range_of_line(&self, bytes: &[u8], line: usize) -> Option<(usize, usize)> {
        let (start, mut end) = self.byte_range_of(line)?;
        if end > start && bytes[end - 1] == b'\n' {
            end -= 1;
        }
        Some((start, end))
    }
}
