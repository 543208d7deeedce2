//! Text buffer traits and the rope-backed implementation.
//!
//! All offsets are Unicode scalar value (char) indices. `TextBuffer` is the
//! read view used by boundary queries; `TextBufferMut` adds the single
//! mutation primitive, `replace`.

use ropey::Rope;
use std::ops::Range;

/// Read-only view into a text buffer for cursor navigation and boundary queries.
pub trait TextBuffer {
    /// Total length in characters
    fn len_chars(&self) -> usize;

    /// Check if buffer is empty
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Get character at offset, None if out of bounds
    fn char_at(&self, offset: usize) -> Option<char>;

    /// Get slice of text as String (by character indices)
    ///
    /// Panics if `range` is not within `0..=len_chars()`.
    fn slice(&self, range: Range<usize>) -> String;

    /// Get full content as String
    fn content(&self) -> String;
}

/// Mutable buffer operations. Extends TextBuffer.
pub trait TextBufferMut: TextBuffer {
    /// Replace text in range with new text as one atomic mutation.
    ///
    /// Panics if `range` is not within `0..=len_chars()`.
    fn replace(&mut self, range: Range<usize>, text: &str);

    /// Clear all content
    fn clear(&mut self) {
        let len = self.len_chars();
        self.replace(0..len, "");
    }

    /// Set content, replacing everything
    fn set_content(&mut self, text: &str) {
        let len = self.len_chars();
        self.replace(0..len, text);
    }
}

/// Fail fast on ranges outside the buffer.
#[inline]
#[track_caller]
fn check_range(range: &Range<usize>, len: usize) {
    assert!(
        range.start <= range.end && range.end <= len,
        "range {}..{} out of bounds for buffer of length {}",
        range.start,
        range.end,
        len
    );
}

/// TextBuffer implementation wrapping ropey::Rope.
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a RopeBuffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }
}

impl TextBuffer for RopeBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        if offset < self.rope.len_chars() {
            Some(self.rope.char(offset))
        } else {
            None
        }
    }

    #[track_caller]
    fn slice(&self, range: Range<usize>) -> String {
        check_range(&range, self.len_chars());
        if range.is_empty() {
            return String::new();
        }
        self.rope.slice(range).to_string()
    }

    fn content(&self) -> String {
        self.rope.to_string()
    }
}

impl TextBufferMut for RopeBuffer {
    #[track_caller]
    fn replace(&mut self, range: Range<usize>, text: &str) {
        check_range(&range, self.len_chars());
        if !range.is_empty() {
            self.rope.remove(range.clone());
        }
        if !text.is_empty() {
            self.rope.insert(range.start, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rope_buffer_basic() {
        let buf = RopeBuffer::from_text("hello");
        assert_eq!(buf.len_chars(), 5);
        assert_eq!(buf.char_at(0), Some('h'));
        assert_eq!(buf.char_at(5), None);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_rope_buffer_utf8() {
        let buf = RopeBuffer::from_text("héllo");
        assert_eq!(buf.len_chars(), 5);
        assert_eq!(buf.char_at(1), Some('é'));
        assert_eq!(buf.slice(1..3), "él");
    }

    #[test]
    fn test_replace_insert() {
        let mut buf = RopeBuffer::from_text("hello");
        buf.replace(5..5, " world");
        assert_eq!(buf.content(), "hello world");
    }

    #[test]
    fn test_replace_remove() {
        let mut buf = RopeBuffer::from_text("hello world");
        buf.replace(5..11, "");
        assert_eq!(buf.content(), "hello");
    }

    #[test]
    fn test_replace_length_law() {
        let cases: &[(&str, Range<usize>, &str)] = &[
            ("hello", 0..0, "abc"),
            ("hello", 1..4, "X"),
            ("hello", 0..5, ""),
            ("héllo wörld", 2..8, "日本語"),
            ("", 0..0, "👍🏽"),
        ];
        for (text, range, with) in cases {
            let mut buf = RopeBuffer::from_text(text);
            let before = buf.len_chars();
            buf.replace(range.clone(), with);
            assert_eq!(
                buf.len_chars(),
                before - range.len() + with.chars().count(),
                "replace {:?} in {:?} with {:?}",
                range,
                text,
                with
            );
        }
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_replace_out_of_bounds_panics() {
        let mut buf = RopeBuffer::from_text("abc");
        buf.replace(2..4, "x");
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_inverted_range_panics() {
        let buf = RopeBuffer::from_text("abc");
        #[allow(clippy::reversed_empty_ranges)]
        let _ = buf.slice(2..1);
    }

    #[test]
    fn test_buffer_clear_and_set_content() {
        let mut buf = RopeBuffer::from_text("hello");
        buf.clear();
        assert!(buf.is_empty());
        buf.set_content("restored\ntext");
        assert_eq!(buf.content(), "restored\ntext");
    }
}
