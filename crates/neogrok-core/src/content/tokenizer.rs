//! Line reconstruction for match chunks.
//!
//! A chunk's text is split at `'\n'` and every line is cut into alternating
//! context/match runs at the (clipped) match boundaries. Offsets are absolute
//! file byte offsets throughout; `base_byte_offset` anchors the chunk text.

use serde::Serialize;
use tracing::trace;

use crate::content::{decode, LineIndex};
use crate::error::{Error, Result};
use crate::model::{Chunk, MatchRange};
use crate::span::ByteSpan;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Context,
    Match,
}

/// A run of characters within one line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineToken {
    pub kind: TokenKind,
    pub text: String,
    /// Absolute byte offset of the first byte of `text`; stable render key.
    pub start_byte_offset: usize,
}

impl LineToken {
    fn new(kind: TokenKind, content: &str, base: usize, span: ByteSpan) -> Self {
        Self {
            kind,
            text: content[span.local_range(base)].to_owned(),
            start_byte_offset: span.start,
        }
    }

    #[inline]
    pub fn is_match(&self) -> bool {
        self.kind == TokenKind::Match
    }
}

/// One numbered source line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub line_number: usize,
    pub tokens: Vec<LineToken>,
}

impl Line {
    /// The line text without its terminator.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Check the ranges against the chunk and convert them to byte spans.
///
/// Ranges must lie in `[base, base + len)`, be ordered and non-overlapping,
/// and start/end on character boundaries.
fn validate_ranges(
    content: &str,
    base_byte_offset: usize,
    match_ranges: &[MatchRange],
) -> Result<Vec<ByteSpan>> {
    let chunk_end = base_byte_offset
        .checked_add(content.len())
        .ok_or(Error::PositionOverflow {
            base: base_byte_offset,
            len: content.len(),
        })?;
    let mut previous_end = base_byte_offset;
    let mut spans = Vec::with_capacity(match_ranges.len());

    for range in match_ranges {
        let span = range.byte_span()?;
        if span.start < base_byte_offset {
            return Err(Error::RangeBeforeChunk {
                start: span.start,
                chunk_start: base_byte_offset,
            });
        }
        if span.end > chunk_end {
            return Err(Error::RangeOutOfBounds {
                end: span.end,
                chunk_end,
            });
        }
        if span.start < previous_end {
            return Err(Error::OverlappingRanges {
                previous_end,
                start: span.start,
            });
        }
        for offset in [span.start, span.end] {
            if !content.is_char_boundary(offset - base_byte_offset) {
                return Err(Error::SplitCharacter { offset });
            }
        }
        previous_end = span.end;
        spans.push(span);
    }

    Ok(spans)
}

/// Split `content` into lines of context/match tokens.
///
/// Returns one token list per physical line, in order. Lines without matches
/// are a single context token; an empty line is a single empty token, marked
/// as a match when a range runs across it.
pub fn parse_into_lines(
    content: &str,
    base_byte_offset: usize,
    match_ranges: &[MatchRange],
) -> Result<Vec<Vec<LineToken>>> {
    let spans = validate_ranges(content, base_byte_offset, match_ranges)?;
    let bytes = content.as_bytes();
    let index = LineIndex::build(bytes);

    let mut lines = Vec::with_capacity(index.line_count());
    let mut cursor = 0;

    for line_no in 1..=index.line_count() {
        let Some((start, end)) = index.content_range_of_line(bytes, line_no) else {
            break;
        };
        let line = ByteSpan {
            start: base_byte_offset + start,
            end: base_byte_offset + end,
        };

        // Ranges are ordered by start and disjoint, so ends are ordered too.
        while cursor < spans.len() && spans[cursor].end <= line.start {
            cursor += 1;
        }

        let mut tokens = Vec::new();
        let mut pos = line.start;
        for span in &spans[cursor..] {
            if span.start >= line.end {
                break;
            }
            let Some(clipped) = span.intersection(&line).filter(|s| !s.is_empty()) else {
                continue;
            };
            if clipped.start > pos {
                let gap = ByteSpan {
                    start: pos,
                    end: clipped.start,
                };
                tokens.push(LineToken::new(TokenKind::Context, content, base_byte_offset, gap));
            }
            tokens.push(LineToken::new(TokenKind::Match, content, base_byte_offset, clipped));
            pos = clipped.end;
        }
        if pos < line.end {
            let rest = ByteSpan {
                start: pos,
                end: line.end,
            };
            tokens.push(LineToken::new(TokenKind::Context, content, base_byte_offset, rest));
        }

        if tokens.is_empty() {
            let covered = spans
                .get(cursor)
                .is_some_and(|span| span.start <= line.start && !span.is_empty());
            tokens.push(LineToken {
                kind: if covered {
                    TokenKind::Match
                } else {
                    TokenKind::Context
                },
                text: String::new(),
                start_byte_offset: line.start,
            });
        }

        lines.push(tokens);
    }

    Ok(lines)
}

/// Decode and tokenize one chunk, numbering lines from its starting line.
pub fn tokenize_chunk(chunk: &Chunk) -> Result<Vec<Line>> {
    let decoded = decode(&chunk.content_base64)?;
    let start_line = chunk.start_line();
    let lines = parse_into_lines(decoded.text(), chunk.start_byte(), &chunk.match_ranges)?;

    trace!(
        start_line,
        lines = lines.len(),
        matches = chunk.match_count(),
        "tokenized chunk"
    );

    lines
        .into_iter()
        .enumerate()
        .map(|(offset, tokens)| -> Result<Line> {
            let line_number = start_line
                .checked_add(offset)
                .ok_or(Error::PositionOverflow {
                    base: start_line,
                    len: offset,
                })?;
            Ok(Line {
                line_number,
                tokens,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;

    fn loc(byte_offset: usize) -> Location {
        Location {
            byte_offset,
            line_number: 1,
            column: 1,
        }
    }

    fn range(start: usize, end: usize) -> MatchRange {
        MatchRange {
            start: loc(start),
            end: loc(end),
        }
    }

    fn kinds(tokens: &[LineToken]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    fn texts(tokens: &[LineToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_no_ranges_single_context_token_per_line() {
        let lines = parse_into_lines("alpha\nbeta\ngamma", 0, &[]).unwrap();
        assert_eq!(lines.len(), 3);
        for tokens in &lines {
            assert_eq!(kinds(tokens), vec![TokenKind::Context]);
        }
        assert_eq!(texts(&lines[1]), vec!["beta"]);
        assert_eq!(lines[1][0].start_byte_offset, 6);
    }

    #[test]
    fn test_match_inside_line_gives_three_tokens() {
        // "let foo = 1;" at absolute offset 100; match "foo"
        let lines = parse_into_lines("let foo = 1;", 100, &[range(104, 107)]).unwrap();
        assert_eq!(lines.len(), 1);
        let tokens = &lines[0];
        assert_eq!(
            kinds(tokens),
            vec![TokenKind::Context, TokenKind::Match, TokenKind::Context]
        );
        assert_eq!(texts(tokens), vec!["let ", "foo", " = 1;"]);
        assert_eq!(tokens[1].text.len(), 107 - 104);
        assert_eq!(
            tokens.iter().map(|t| t.start_byte_offset).collect::<Vec<_>>(),
            vec![100, 104, 107]
        );
    }

    #[test]
    fn test_match_at_line_end_has_no_trailing_token() {
        let lines = parse_into_lines("abc foo\nnext", 0, &[range(4, 7)]).unwrap();
        assert_eq!(texts(&lines[0]), vec!["abc ", "foo"]);
        assert_eq!(kinds(&lines[1]), vec![TokenKind::Context]);
    }

    #[test]
    fn test_match_including_newline_does_not_leak_into_next_line() {
        // "foo\n" matched; line 2 starts exactly at the range end
        let lines = parse_into_lines("foo\nbar", 0, &[range(0, 4)]).unwrap();
        assert_eq!(texts(&lines[0]), vec!["foo"]);
        assert_eq!(kinds(&lines[0]), vec![TokenKind::Match]);
        assert_eq!(kinds(&lines[1]), vec![TokenKind::Context]);
    }

    #[test]
    fn test_multiline_match_spans_both_lines() {
        // match "two\nthr" over lines 1-2
        let content = "one two\nthree";
        let lines = parse_into_lines(content, 0, &[range(4, 11)]).unwrap();
        assert_eq!(texts(&lines[0]), vec!["one ", "two"]);
        assert_eq!(kinds(&lines[0]).last(), Some(&TokenKind::Match));
        assert_eq!(texts(&lines[1]), vec!["thr", "ee"]);
        assert_eq!(kinds(&lines[1]).first(), Some(&TokenKind::Match));
    }

    #[test]
    fn test_empty_line_inside_match_is_marked() {
        let content = "a\n\nb";
        let lines = parse_into_lines(content, 0, &[range(0, 4)]).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), 1);
        assert_eq!(lines[1][0].kind, TokenKind::Match);
        assert_eq!(lines[1][0].text, "");

        let plain = parse_into_lines(content, 0, &[]).unwrap();
        assert_eq!(plain[1][0].kind, TokenKind::Context);
    }

    #[test]
    fn test_tokens_reassemble_content() {
        let content = "fn añadir() {\n    let ñ = \"über\";\r\n}\n";
        let m1 = content.find("añadir").unwrap();
        let m2 = content.find("über").unwrap();
        let ranges = [
            range(50 + m1, 50 + m1 + "añadir".len()),
            range(50 + m2, 50 + m2 + "über\";\r\n}".len()),
        ];
        let lines = parse_into_lines(content, 50, &ranges).unwrap();
        let rebuilt: Vec<String> = lines
            .iter()
            .map(|tokens| tokens.iter().map(|t| t.text.as_str()).collect())
            .collect();
        let expected: Vec<&str> = content.trim_end_matches('\n').split('\n').collect();
        assert_eq!(rebuilt, expected);
        assert_eq!(texts(&lines[2]), vec!["}"]);
        assert_eq!(kinds(&lines[2]), vec![TokenKind::Match]);
    }

    #[test]
    fn test_boundary_inside_character_is_rejected() {
        // "ñ" is bytes 0..2
        let err = parse_into_lines("ñx", 0, &[range(1, 3)]).unwrap_err();
        assert!(matches!(err, Error::SplitCharacter { offset: 1 }));
        assert!(err.is_decoding());
    }

    #[test]
    fn test_range_before_chunk_is_rejected() {
        let err = parse_into_lines("abc", 10, &[range(8, 11)]).unwrap_err();
        assert!(matches!(
            err,
            Error::RangeBeforeChunk {
                start: 8,
                chunk_start: 10
            }
        ));
    }

    #[test]
    fn test_range_past_chunk_is_rejected() {
        let err = parse_into_lines("abc", 10, &[range(11, 14)]).unwrap_err();
        assert!(matches!(err, Error::RangeOutOfBounds { end: 14, chunk_end: 13 }));
        assert!(err.is_schema());
    }

    #[test]
    fn test_overlapping_ranges_are_rejected() {
        let err = parse_into_lines("abcdef", 0, &[range(0, 3), range(2, 4)]).unwrap_err();
        assert!(matches!(err, Error::OverlappingRanges { .. }));
    }

    #[test]
    fn test_zero_length_range_yields_no_token() {
        let ranges = [range(1, 1)];
        let lines = parse_into_lines("abc", 0, &ranges).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(kinds(&lines[0]), vec![TokenKind::Context]);
        assert_eq!(texts(&lines[0]), vec!["abc"]);

        // still a match as far as counting goes
        let chunk = Chunk {
            content_base64: "YWJj".to_string(),
            content_start: loc(0),
            is_file_name_chunk: false,
            match_ranges: ranges.to_vec(),
        };
        assert_eq!(chunk.match_count(), 1);
        assert_eq!(tokenize_chunk(&chunk).unwrap()[0].text(), "abc");
    }

    #[test]
    fn test_offset_overflow_is_an_error() {
        let err = parse_into_lines("ab", usize::MAX, &[]).unwrap_err();
        assert!(matches!(err, Error::PositionOverflow { .. }));
        assert!(err.is_schema());
    }

    #[test]
    fn test_line_number_overflow_is_an_error() {
        // "a\nb" starting on the last representable line
        let chunk = Chunk {
            content_base64: "YQpi".to_string(),
            content_start: Location {
                byte_offset: 0,
                line_number: usize::MAX,
                column: 1,
            },
            is_file_name_chunk: false,
            match_ranges: Vec::new(),
        };
        assert!(matches!(
            tokenize_chunk(&chunk),
            Err(Error::PositionOverflow { .. })
        ));
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let ranges = [range(1, 2), range(5, 8)];
        let a = parse_into_lines("x1x\nyy22", 0, &ranges).unwrap();
        let b = parse_into_lines("x1x\nyy22", 0, &ranges).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_tokenize_chunk_numbers_lines() {
        // "hello\nworld", match "world"
        let chunk = Chunk {
            content_base64: "aGVsbG8Kd29ybGQ=".to_string(),
            content_start: Location {
                byte_offset: 200,
                line_number: 10,
                column: 1,
            },
            is_file_name_chunk: false,
            match_ranges: vec![range(206, 211)],
        };
        let lines = tokenize_chunk(&chunk).unwrap();
        assert_eq!(
            lines.iter().map(|l| l.line_number).collect::<Vec<_>>(),
            vec![10, 11]
        );
        assert_eq!(lines[1].text(), "world");
        assert!(lines[1].tokens[0].is_match());
    }
}
