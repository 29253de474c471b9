//! Indentation preprocessing.
//!
//! Turns raw source text into a flat sequence of [`Segment`]s in which
//! Python-style layout has been made explicit: every kept line contributes a
//! code segment plus a `NewLine` marker, and changes in indentation level
//! contribute `IndentInc`/`IndentDec` markers. Blank lines and full-line
//! comments are elided here, before the scanner ever sees them.
//!
//! An indent unit is either 4 consecutive spaces or a single tab. A tab
//! arriving while a partial space run is pending, or a leading space run
//! that never completes a unit, aborts preprocessing with an indentation
//! error.

use crate::error::{IndentationError, Result};
use crate::scanner::position::Position;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Matches a line whose (trimmed) content is nothing but a comment.
static COMMENT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#.*$").unwrap());

/// The unit the automaton consumes: a literal character or one of the three
/// structural markers synthesized from layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalChar {
    Char(char),
    NewLine,
    IndentInc,
    IndentDec,
}

impl fmt::Display for LogicalChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalChar::Char(c) => write!(f, "{}", c),
            LogicalChar::NewLine => write!(f, "NewLine"),
            LogicalChar::IndentInc => write!(f, "IndentInc"),
            LogicalChar::IndentDec => write!(f, "IndentDec"),
        }
    }
}

/// Payload of one preprocessed segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentData {
    /// A run of plain source characters (one line's code, whitespace kept).
    Code(String),
    NewLine,
    IndentInc,
    IndentDec,
}

impl fmt::Display for SegmentData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentData::Code(code) => write!(f, "{}", code),
            SegmentData::NewLine => write!(f, "NewLine"),
            SegmentData::IndentInc => write!(f, "IndentInc"),
            SegmentData::IndentDec => write!(f, "IndentDec"),
        }
    }
}

/// One preprocessed unit: code text or a structural marker, with its span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub data: SegmentData,
    pub position: Position,
}

impl Segment {
    fn new(data: SegmentData, line: usize, start: usize, stop: usize) -> Self {
        Self {
            data,
            position: Position::new(line, start, stop),
        }
    }
}

/// Space-joined debug rendering of a segment sequence, markers by name.
pub fn format_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| s.data.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split one physical line into its indent segments and its code segments.
///
/// Returns the collected `IndentInc` segments (one per completed unit) and
/// the `[code, NewLine]` pair. The caller decides how many of the indent
/// segments survive, based on the previous line's level.
fn split_line(line: &str, line_number: usize) -> std::result::Result<(Vec<Segment>, [Segment; 2]), IndentationError> {
    let line = line.trim_end();
    let mut indents = Vec::new();
    let mut space_cnt = 0usize;
    let mut i = 0usize;
    for ch in line.chars() {
        if !ch.is_whitespace() {
            break;
        }
        if ch == ' ' {
            space_cnt += 1;
            if space_cnt == 4 {
                indents.push(Segment::new(SegmentData::IndentInc, line_number, i - 3, i + 1));
                space_cnt = 0;
            }
        } else if ch == '\t' {
            if space_cnt != 0 {
                return Err(IndentationError::new(
                    line_number,
                    "tab mixed into a pending space run",
                ));
            }
            indents.push(Segment::new(SegmentData::IndentInc, line_number, i, i + 1));
        }
        i += 1;
    }
    if space_cnt != 0 {
        return Err(IndentationError::new(
            line_number,
            "leading spaces do not complete an indent unit",
        ));
    }
    let code_str = line.trim();
    let code_stop = i + code_str.chars().count();
    let codes = [
        Segment::new(SegmentData::Code(code_str.to_string()), line_number, i, code_stop),
        Segment::new(SegmentData::NewLine, line_number, code_stop, code_stop),
    ];
    Ok((indents, codes))
}

/// Preprocess raw text into the flat segment sequence.
///
/// Line endings are normalized to `\n` first. Blank lines and lines whose
/// trimmed content is a comment are dropped entirely, regardless of their
/// own indentation. Indent markers are emitted only for the *change* in
/// level relative to the previous kept line, taking the highest-order
/// collected indent segments first; outstanding levels are closed with
/// `IndentDec` markers at end of input.
pub fn make_char_segments(text: &str) -> Result<Vec<Segment>> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = text.split('\n').collect();
    let mut sequences: Vec<Segment> = Vec::new();
    let mut last_indent_num = 0usize;
    for (line_number, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if COMMENT_LINE.is_match(line.trim()) {
            continue;
        }
        let (indents, codes) = split_line(line, line_number)?;
        let indent_num = indents.len();
        if indent_num < last_indent_num {
            for _ in 0..(last_indent_num - indent_num) {
                sequences.push(Segment::new(SegmentData::IndentDec, line_number, 0, 0));
            }
        } else if indent_num > last_indent_num {
            for segment in indents.iter().rev().take(indent_num - last_indent_num) {
                sequences.push(segment.clone());
            }
        }
        sequences.extend(codes);
        last_indent_num = indent_num;
    }
    for _ in 0..last_indent_num {
        sequences.push(Segment::new(SegmentData::IndentDec, lines.len(), 0, 0));
    }
    Ok(sequences)
}

/// Preprocessed source, iterable as positioned logical characters.
#[derive(Debug, Clone)]
pub struct SourceCode {
    segments: Vec<Segment>,
}

impl SourceCode {
    pub fn new(text: &str) -> Result<Self> {
        Ok(Self {
            segments: make_char_segments(text)?,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterate every logical character with its span, code segments exploded
    /// into single characters.
    pub fn iter_chars_with_pos(&self) -> impl Iterator<Item = (Position, LogicalChar)> + '_ {
        self.segments.iter().flat_map(|seg| {
            let items: Vec<(Position, LogicalChar)> = match &seg.data {
                SegmentData::Code(code) => code
                    .chars()
                    .enumerate()
                    .map(|(i, ch)| {
                        let col = seg.position.start + i;
                        (Position::new(seg.position.line, col, col + 1), LogicalChar::Char(ch))
                    })
                    .collect(),
                SegmentData::NewLine => vec![(seg.position, LogicalChar::NewLine)],
                SegmentData::IndentInc => vec![(seg.position, LogicalChar::IndentInc)],
                SegmentData::IndentDec => vec![(seg.position, LogicalChar::IndentDec)],
            };
            items
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_level_of_indentation_round_trips() {
        let segments = make_char_segments("if True:\n    aaa\n").unwrap();
        assert_eq!(
            format_segments(&segments),
            "if True: NewLine IndentInc aaa NewLine IndentDec"
        );
    }

    #[test]
    fn tab_counts_as_one_unit() {
        let segments = make_char_segments("if True:\n\taaa\n").unwrap();
        assert_eq!(
            format_segments(&segments),
            "if True: NewLine IndentInc aaa NewLine IndentDec"
        );
    }

    #[test]
    fn blank_and_comment_lines_are_elided() {
        let segments = make_char_segments("aaa\n   \n# whole line\nbbb\n").unwrap();
        assert_eq!(format_segments(&segments), "aaa NewLine bbb NewLine");
    }

    #[test]
    fn over_indented_comment_lines_are_still_elided() {
        let segments =
            make_char_segments("if b > 0:\n    a = 1\n        # comment\n    b = 2\n").unwrap();
        assert_eq!(
            format_segments(&segments),
            "if b > 0: NewLine IndentInc a = 1 NewLine b = 2 NewLine IndentDec"
        );
    }

    #[test]
    fn partial_space_run_is_fatal() {
        assert!(make_char_segments("if True:\n    aaa\n   bbb").is_err());
        assert!(make_char_segments("if True:\n    aaa\n     bbb").is_err());
    }

    #[test]
    fn tab_after_pending_spaces_is_fatal() {
        assert!(make_char_segments("if True:\n    aaa\n \tbbb").is_err());
    }

    #[test]
    fn space_after_tab_is_a_partial_run() {
        assert!(make_char_segments("if True:\n    aaa\n\t bbb").is_err());
    }

    #[test]
    fn indent_positions_cover_their_whitespace() {
        let segments = make_char_segments("if True:\n    aaa\n").unwrap();
        let inc = segments
            .iter()
            .find(|s| s.data == SegmentData::IndentInc)
            .unwrap();
        assert_eq!(inc.position, Position::new(1, 0, 4));
    }

    #[test]
    fn code_chars_iterate_with_columns() {
        let source = SourceCode::new("ab\n").unwrap();
        let chars: Vec<_> = source.iter_chars_with_pos().collect();
        assert_eq!(chars[0], (Position::new(0, 0, 1), LogicalChar::Char('a')));
        assert_eq!(chars[1], (Position::new(0, 1, 2), LogicalChar::Char('b')));
        assert_eq!(chars[2], (Position::new(0, 2, 2), LogicalChar::NewLine));
    }
}
