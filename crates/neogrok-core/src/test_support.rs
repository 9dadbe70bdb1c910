//! Fixture builders shared by unit tests.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::model::{Chunk, Location, MatchRange, ResultFile};

/// A content chunk of `text` starting at absolute `byte_offset` / `line_number`,
/// with matches given as byte ranges local to `text`.
pub fn chunk(text: &str, byte_offset: usize, line_number: usize, matches: &[(usize, usize)]) -> Chunk {
    let loc = |local: usize| {
        let before = &text[..local];
        let line_number = line_number + before.matches('\n').count();
        let column = local - before.rfind('\n').map_or(0, |nl| nl + 1) + 1;
        Location {
            byte_offset: byte_offset + local,
            line_number,
            column,
        }
    };
    Chunk {
        content_base64: STANDARD.encode(text),
        content_start: loc(0),
        is_file_name_chunk: false,
        match_ranges: matches
            .iter()
            .map(|&(start, end)| MatchRange {
                start: loc(start),
                end: loc(end),
            })
            .collect(),
    }
}

/// A file name chunk highlighting `matches` within `name`.
pub fn file_name_chunk(name: &str, matches: &[(usize, usize)]) -> Chunk {
    Chunk {
        is_file_name_chunk: true,
        ..chunk(name, 0, 1, matches)
    }
}

/// A file in `github.com/acme/widgets` at version `abc123` on `HEAD`.
pub fn file(file_name: &str, chunks: Vec<Chunk>) -> ResultFile {
    ResultFile {
        repository: "github.com/acme/widgets".to_string(),
        file_name: file_name.to_string(),
        branches: vec!["HEAD".to_string()],
        language: "Rust".to_string(),
        version: "abc123".to_string(),
        chunks,
    }
}
