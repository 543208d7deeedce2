//! Boundary queries over a read-only buffer.
//!
//! Every function here is pure: it maps a position to a nearby meaningful
//! position (line, word or document edge) and never mutates anything.
//! Positions past the end of the buffer are treated as the end.

use crate::util::{char_type, is_line_terminator, CharType};

use super::buffer::TextBuffer;

#[inline]
fn clamp<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> usize {
    pos.min(buf.len_chars())
}

/// Start of the document
pub const fn document_start() -> usize {
    0
}

/// End of the document
pub fn document_end<B: TextBuffer + ?Sized>(buf: &B) -> usize {
    buf.len_chars()
}

/// One character back, stopping at 0
pub fn prev_char<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> usize {
    clamp(buf, pos).saturating_sub(1)
}

/// One character forward, stopping at the document end
pub fn next_char<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> usize {
    (clamp(buf, pos) + 1).min(buf.len_chars())
}

/// Character after the nearest preceding line terminator, or 0
pub fn line_start<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> usize {
    let mut p = clamp(buf, pos);
    while p > 0 {
        match buf.char_at(p - 1) {
            Some(ch) if is_line_terminator(ch) => break,
            _ => p -= 1,
        }
    }
    p
}

/// Position of the nearest following line terminator, or the document end
pub fn line_end<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> usize {
    let len = buf.len_chars();
    let mut p = clamp(buf, pos);
    while p < len {
        match buf.char_at(p) {
            Some(ch) if is_line_terminator(ch) => break,
            _ => p += 1,
        }
    }
    p
}

/// Start of the previous word.
///
/// Skips whitespace and punctuation backward, then a maximal run of word
/// characters.
pub fn word_boundary_backward<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> usize {
    let mut p = clamp(buf, pos);

    while p > 0 {
        match buf.char_at(p - 1) {
            Some(ch) if char_type(ch) != CharType::WordChar => p -= 1,
            _ => break,
        }
    }

    while p > 0 {
        match buf.char_at(p - 1) {
            Some(ch) if char_type(ch) == CharType::WordChar => p -= 1,
            _ => break,
        }
    }

    p
}

/// Start of the next word.
///
/// Skips the run of the character class under `pos` (a word run or a
/// punctuation run), then any trailing whitespace.
pub fn word_boundary_forward<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> usize {
    let len = buf.len_chars();
    let mut p = clamp(buf, pos);

    if let Some(first) = buf.char_at(p) {
        let start_type = char_type(first);
        if start_type != CharType::Whitespace {
            while p < len {
                match buf.char_at(p) {
                    Some(ch) if char_type(ch) == start_type => p += 1,
                    _ => break,
                }
            }
        }
    }

    while p < len {
        match buf.char_at(p) {
            Some(ch) if char_type(ch) == CharType::Whitespace => p += 1,
            _ => break,
        }
    }

    p
}

/// Range of the run containing `pos` whose characters share one class.
///
/// At the document end the run before `pos` is used. Empty buffer yields `0..0`.
pub fn word_range_at<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> std::ops::Range<usize> {
    let len = buf.len_chars();
    if len == 0 {
        return 0..0;
    }
    let p = clamp(buf, pos).min(len - 1);
    let Some(ch) = buf.char_at(p) else {
        return p..p;
    };
    let target = char_type(ch);

    let mut start = p;
    while start > 0 {
        match buf.char_at(start - 1) {
            Some(c) if char_type(c) == target && !is_line_terminator(c) => start -= 1,
            _ => break,
        }
    }

    let mut end = p + 1;
    if !is_line_terminator(ch) {
        while end < len {
            match buf.char_at(end) {
                Some(c) if char_type(c) == target && !is_line_terminator(c) => end += 1,
                _ => break,
            }
        }
    }

    start..end
}

/// Number of lines (always >= 1)
pub fn line_count<B: TextBuffer + ?Sized>(buf: &B) -> usize {
    let mut count = 1;
    for i in 0..buf.len_chars() {
        if buf.char_at(i).is_some_and(is_line_terminator) {
            count += 1;
        }
    }
    count
}

/// Convert a linear offset to (row, column)
pub fn row_col<B: TextBuffer + ?Sized>(buf: &B, pos: usize) -> (usize, usize) {
    let p = clamp(buf, pos);
    let mut row = 0;
    for i in 0..p {
        if buf.char_at(i).is_some_and(is_line_terminator) {
            row += 1;
        }
    }
    (row, p - line_start(buf, p))
}

/// Convert (row, column) to a linear offset.
///
/// `row` is clamped to the last line and `col` to that line's length.
pub fn from_row_col<B: TextBuffer + ?Sized>(buf: &B, row: usize, col: usize) -> usize {
    let len = buf.len_chars();
    let mut start = 0;
    let mut current = 0;
    while current < row {
        let end = line_end(buf, start);
        if end >= len {
            break;
        }
        start = end + 1;
        current += 1;
    }
    let end = line_end(buf, start);
    start + col.min(end - start)
}
