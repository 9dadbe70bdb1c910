use thiserror::Error;

/// Canonical errors for neogrok core
#[derive(Error, Debug)]
pub enum Error {
    // -------- Decoding contract --------
    #[error("chunk content is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("chunk content is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("match boundary at byte {offset} splits a multi-byte character")]
    SplitCharacter { offset: usize },

    #[error("match range starts at byte {start}, before its chunk at byte {chunk_start}")]
    RangeBeforeChunk { start: usize, chunk_start: usize },

    // -------- Schema contract --------
    #[error("unreachable: received {0} file name chunks")]
    MultipleFileNameChunks(usize),

    #[error("match range ends at byte {end}, past its chunk end at byte {chunk_end}")]
    RangeOutOfBounds { end: usize, chunk_end: usize },

    #[error("invalid range: [{0}, {1})")]
    InvalidRange(usize, usize),

    #[error("match range starting at byte {start} overlaps a range ending at byte {previous_end}")]
    OverlappingRanges { previous_end: usize, start: usize },

    #[error("position {base} + {len} overflows")]
    PositionOverflow { base: usize, len: usize },

    // -------- Configuration --------
    #[error("invalid preference `{field}`: {reason}")]
    InvalidPreference { field: &'static str, reason: String },

    // -------- Results view --------
    #[error("no result file at index {0}")]
    NoSuchFile(usize),

    // -------- Wrapped sources --------
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The chunk bytes could not be turned into well-formed text tokens.
    pub fn is_decoding(&self) -> bool {
        matches!(
            self,
            Error::InvalidBase64(_)
                | Error::InvalidUtf8(_)
                | Error::SplitCharacter { .. }
                | Error::RangeBeforeChunk { .. }
        )
    }

    /// The backend handed us data that breaks the result contract.
    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            Error::MultipleFileNameChunks(_)
                | Error::RangeOutOfBounds { .. }
                | Error::InvalidRange(..)
                | Error::OverlappingRanges { .. }
                | Error::PositionOverflow { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
