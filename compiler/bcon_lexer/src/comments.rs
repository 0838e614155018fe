//! Comment stripping pre-pass.
//!
//! `# …` runs to the end of the line and `'…'` may span lines. Comment
//! characters become spaces and newlines survive, so line and column numbers
//! computed on the cleaned text match the original. Inside a `"…"` string
//! neither comment marker is special; `\"` does not close the string.

use bcon_diagnostic::span_utils::LineOffsetTable;
use bcon_ir::Span;

use crate::LexError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Code,
    String { escaped: bool },
    LineComment,
    BlockComment,
}

/// Normalize line endings to `\n`.
pub fn normalize_newlines(source: &str) -> String {
    if !source.contains('\r') {
        return source.to_owned();
    }
    source.replace("\r\n", "\n").replace('\r', "\n")
}

/// Blank out comments in `source`.
///
/// Line endings are normalized first. A block comment still open at the end
/// of input is an error located at its opening quote.
pub fn strip_comments(source: &str) -> Result<String, LexError> {
    let source = normalize_newlines(source);
    let mut out = String::with_capacity(source.len());
    let mut mode = Mode::Code;
    let mut prev = None;
    let mut block_start = 0;

    for ch in source.chars() {
        mode = match mode {
            Mode::Code => match ch {
                '"' => {
                    out.push(ch);
                    Mode::String { escaped: false }
                }
                '#' => {
                    out.push(' ');
                    Mode::LineComment
                }
                '\'' if prev != Some('\\') => {
                    block_start = out.len();
                    out.push(' ');
                    Mode::BlockComment
                }
                _ => {
                    out.push(ch);
                    Mode::Code
                }
            },
            Mode::String { escaped } => {
                out.push(ch);
                if escaped {
                    Mode::String { escaped: false }
                } else if ch == '\\' {
                    Mode::String { escaped: true }
                } else if ch == '"' {
                    Mode::Code
                } else {
                    mode
                }
            }
            Mode::LineComment => {
                if ch == '\n' {
                    out.push('\n');
                    Mode::Code
                } else {
                    out.push(' ');
                    Mode::LineComment
                }
            }
            Mode::BlockComment => {
                if ch == '\'' && prev != Some('\\') {
                    out.push(' ');
                    Mode::Code
                } else {
                    out.push(if ch == '\n' { '\n' } else { ' ' });
                    Mode::BlockComment
                }
            }
        };
        prev = Some(ch);
    }

    if mode == Mode::BlockComment {
        let table = LineOffsetTable::build(&out);
        let (line, column) = table.offset_to_line_col(&out, block_start);
        return Err(LexError::unterminated_block_comment(
            Span::from_range(block_start..block_start + 1),
            u32::try_from(line).unwrap_or(u32::MAX),
            u32::try_from(column).unwrap_or(u32::MAX),
        ));
    }
    Ok(out)
}
