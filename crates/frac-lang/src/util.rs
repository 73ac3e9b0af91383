//! Text helpers shared by diagnostics and code generation.

use alloc::string::String;

use crate::TAB_SIZE;

/// The line of `text` that contains byte offset `pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo<'a> {
    pub text: &'a str,
    /// Character column of `pos` within the line.
    pub column: usize,
    /// Byte offset of the line start.
    pub begin: usize,
    /// Byte offset one past the line end, excluding the newline.
    pub end: usize,
}

/// Locate the line containing `pos`. A newline belongs to the line it ends;
/// offsets past the end clamp to the last line.
pub fn line_info(text: &str, pos: usize) -> LineInfo<'_> {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }

    let begin = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let end = text[begin..].find('\n').map_or(text.len(), |i| begin + i);

    LineInfo {
        text: &text[begin..end],
        column: text[begin..pos].chars().count(),
        begin,
        end,
    }
}

/// Prefix every line of `text` with `size` spaces.
pub fn indent(text: &str, size: usize) -> String {
    let pad = " ".repeat(size);
    let mut out = String::with_capacity(text.len() + pad.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&pad);
        out.push_str(line);
    }
    out
}

/// Replace each tab with [`TAB_SIZE`] spaces.
pub fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_SIZE))
}
