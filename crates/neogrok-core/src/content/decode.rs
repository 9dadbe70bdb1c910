//! Base64 chunk payloads to UTF-8 text.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::Result;

/// Decoded chunk text. Byte offsets into `text` are the backend's byte offsets
/// minus the chunk's starting offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedContent {
    text: String,
}

impl DecodedContent {
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }

    /// Character index of a local byte offset, or `None` if it falls inside a character.
    pub fn char_index_of_byte(&self, byte: usize) -> Option<usize> {
        if !self.text.is_char_boundary(byte) {
            return None;
        }
        Some(self.text[..byte].chars().count())
    }

    /// Local byte offset of a character index, or `None` past the end.
    pub fn byte_of_char_index(&self, index: usize) -> Option<usize> {
        self.text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(self.text.len()))
            .nth(index)
    }
}

/// Decode a base64 payload into text, rejecting bad base64 or invalid UTF-8.
pub fn decode(content_base64: &str) -> Result<DecodedContent> {
    let bytes = STANDARD.decode(content_base64)?;
    let text = String::from_utf8(bytes)?;
    Ok(DecodedContent { text })
}
