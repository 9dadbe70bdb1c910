//! Chunk content: base64 decoding, line indexing, and match tokenization.
//! Everything here is pure; identical inputs produce identical lines.

pub mod decode;
pub mod line_index;
pub mod tokenizer;

pub use decode::{decode, DecodedContent};
pub use line_index::LineIndex;
pub use tokenizer::{parse_into_lines, tokenize_chunk, Line, LineToken, TokenKind};
