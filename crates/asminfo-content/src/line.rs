//! Physical line splitting and comment classification.
//!
//! Splitting keeps each line's own terminator so a document can be written
//! back byte-for-byte, even when the input mixes terminator styles. Comment
//! classification is line-oriented: block comments are only recognized when
//! the opener starts the line (after leading whitespace). An opener that
//! follows code on the same line is not detected.

use crate::dialect::Dialect;

/// Terminator of a physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    Cr,
    /// Last line of a text without a trailing terminator.
    Eof,
}

impl LineEnding {
    /// The literal terminator text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
            Self::Eof => "",
        }
    }
}

/// One physical line of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line content without its terminator.
    pub text: String,
    /// The terminator this line was read with.
    pub ending: LineEnding,
    /// Whether the line is a comment or part of a block comment span.
    pub is_comment: bool,
}

/// Split text into physical lines, preserving terminators.
///
/// An input with N terminators yields N+1 lines; a text ending in a
/// terminator therefore yields a trailing empty line.
pub fn split(source: &str) -> Vec<(String, LineEnding)> {
    let mut lines = Vec::new();
    let bytes = source.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                let ending = if bytes.get(i + 1) == Some(&b'\n') {
                    LineEnding::CrLf
                } else {
                    LineEnding::Cr
                };
                lines.push((source[start..i].to_string(), ending));
                i += ending.as_str().len();
                start = i;
            }
            b'\n' => {
                lines.push((source[start..i].to_string(), LineEnding::Lf));
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }

    lines.push((source[start..].to_string(), LineEnding::Eof));
    lines
}

/// Split text into lines and tag each as code or comment.
///
/// A line is a comment when it is a single-line comment, opens or closes a
/// block comment at the start of the line, or falls inside an open block
/// comment span. A self-contained opener-and-terminator on one line does not
/// open a span.
pub fn classify(source: &str, dialect: Dialect) -> Vec<Line> {
    let line_comment = dialect.line_comment();
    let block_start = dialect.block_comment_start();
    let block_end = dialect.block_comment_end();

    let mut in_block = false;
    let mut lines = Vec::new();

    for (text, ending) in split(source) {
        let starts_block = block_start.is_some_and(|re| re.is_match(&text));
        let ends_block = block_end.is_some_and(|re| re.is_match(&text));

        let is_comment = if line_comment.is_match(&text) || (starts_block && ends_block) {
            true
        } else if starts_block {
            in_block = true;
            true
        } else if in_block && ends_block {
            in_block = false;
            true
        } else {
            in_block
        };

        lines.push(Line {
            text,
            ending,
            is_comment,
        });
    }

    lines
}
