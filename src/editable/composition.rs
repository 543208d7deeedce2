//! Input-method composition ("marked text").
//!
//! While an IME is composing, the provisional text lives in the buffer like
//! any other text but is tracked as the marked range. Each update is one
//! `replace` on the buffer followed by a selection recomputation, so a change
//! listener never observes a half-applied composition.

use std::ops::Range;

use super::buffer::TextBufferMut;
use super::selection::Selection;

/// The provisional span produced by an input method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedRange {
    /// Span of the provisional text in the buffer
    pub range: Range<usize>,
    /// Selection relative to `range.start`, as reported by the IME
    pub inner_selection: Range<usize>,
}

impl MarkedRange {
    /// Absolute selection inside the buffer
    pub fn absolute_selection(&self) -> Range<usize> {
        self.range.start + self.inner_selection.start..self.range.start + self.inner_selection.end
    }
}

/// Tracks at most one marked range.
#[derive(Debug, Clone, Default)]
pub struct Composition {
    marked: Option<MarkedRange>,
}

impl Composition {
    pub fn new() -> Self {
        Self { marked: None }
    }

    pub fn marked(&self) -> Option<&MarkedRange> {
        self.marked.as_ref()
    }

    pub fn is_composing(&self) -> bool {
        self.marked.is_some()
    }

    /// Replace the explicit range, else the existing marked range, else the
    /// selection with `text` and mark the result.
    ///
    /// Empty `text` ends composition with the span removed.
    pub fn set_marked_text<B: TextBufferMut + ?Sized>(
        &mut self,
        buffer: &mut B,
        selection: &mut Selection,
        text: &str,
        inner_selection: Range<usize>,
        replacement: Option<Range<usize>>,
    ) {
        let range = replacement
            .or_else(|| self.marked.as_ref().map(|m| m.range.clone()))
            .unwrap_or_else(|| selection.range());

        buffer.replace(range.clone(), text);

        let inserted = text.chars().count();
        if inserted == 0 {
            self.marked = None;
            *selection = Selection::collapsed(range.start);
            return;
        }

        let inner_start = inner_selection.start.min(inserted);
        let inner_end = inner_selection.end.clamp(inner_start, inserted);
        let marked = MarkedRange {
            range: range.start..range.start + inserted,
            inner_selection: inner_start..inner_end,
        };
        let absolute = marked.absolute_selection();
        *selection = Selection::new(absolute.start, absolute.end);
        self.marked = Some(marked);
    }

    /// Keep the provisional text as committed text. Idempotent.
    pub fn unmark_text(&mut self) {
        self.marked = None;
    }

    /// Replace the marked span (or the explicit range, or the selection) with
    /// the final `text` and place the cursor after it.
    pub fn commit_text<B: TextBufferMut + ?Sized>(
        &mut self,
        buffer: &mut B,
        selection: &mut Selection,
        text: &str,
        replacement: Option<Range<usize>>,
    ) {
        let range = match self.marked.take() {
            Some(marked) => marked.range,
            None => replacement.unwrap_or_else(|| selection.range()),
        };
        buffer.replace(range.clone(), text);
        *selection = Selection::collapsed(range.start + text.chars().count());
    }

    /// Drop the provisional text entirely. Returns false when not composing.
    pub fn cancel<B: TextBufferMut + ?Sized>(
        &mut self,
        buffer: &mut B,
        selection: &mut Selection,
    ) -> bool {
        let Some(marked) = self.marked.take() else {
            return false;
        };
        buffer.replace(marked.range.clone(), "");
        *selection = Selection::collapsed(marked.range.start);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::buffer::{RopeBuffer, TextBuffer};
    use super::*;

    #[test]
    fn test_set_marked_text_replaces_selection() {
        let mut buf = RopeBuffer::from_text("ab");
        let mut sel = Selection::collapsed(1);
        let mut comp = Composition::new();

        comp.set_marked_text(&mut buf, &mut sel, "ni", 2..2, None);
        assert_eq!(buf.content(), "anib");
        assert_eq!(comp.marked().unwrap().range, 1..3);
        assert_eq!(sel, Selection::collapsed(3));
    }

    #[test]
    fn test_repeated_updates_replace_marked_range() {
        let mut buf = RopeBuffer::from_text("");
        let mut sel = Selection::collapsed(0);
        let mut comp = Composition::new();

        comp.set_marked_text(&mut buf, &mut sel, "n", 1..1, None);
        comp.set_marked_text(&mut buf, &mut sel, "ni", 2..2, None);
        comp.set_marked_text(&mut buf, &mut sel, "nih", 3..3, None);
        assert_eq!(buf.content(), "nih");
        assert_eq!(comp.marked().unwrap().range, 0..3);
    }

    #[test]
    fn test_inner_selection_is_clamped() {
        let mut buf = RopeBuffer::from_text("xy");
        let mut sel = Selection::collapsed(2);
        let mut comp = Composition::new();

        comp.set_marked_text(&mut buf, &mut sel, "ab", 1..9, None);
        assert_eq!(sel, Selection::new(3, 4));
        assert_eq!(comp.marked().unwrap().inner_selection, 1..2);
    }

    #[test]
    fn test_explicit_replacement_range_wins() {
        let mut buf = RopeBuffer::from_text("hello");
        let mut sel = Selection::collapsed(5);
        let mut comp = Composition::new();

        comp.set_marked_text(&mut buf, &mut sel, "J", 1..1, Some(0..1));
        assert_eq!(buf.content(), "Jello");
        assert_eq!(comp.marked().unwrap().range, 0..1);
    }

    #[test]
    fn test_empty_marked_text_ends_composition() {
        let mut buf = RopeBuffer::from_text("");
        let mut sel = Selection::collapsed(0);
        let mut comp = Composition::new();

        comp.set_marked_text(&mut buf, &mut sel, "ka", 2..2, None);
        comp.set_marked_text(&mut buf, &mut sel, "", 0..0, None);
        assert!(!comp.is_composing());
        assert_eq!(buf.content(), "");
    }

    #[test]
    fn test_unmark_is_idempotent() {
        let mut buf = RopeBuffer::from_text("");
        let mut sel = Selection::collapsed(0);
        let mut comp = Composition::new();

        comp.set_marked_text(&mut buf, &mut sel, "か", 1..1, None);
        comp.unmark_text();
        let once = (buf.content(), sel, comp.is_composing());
        comp.unmark_text();
        assert_eq!(once, (buf.content(), sel, comp.is_composing()));
        assert_eq!(buf.content(), "か");
    }

    #[test]
    fn test_commit_replaces_marked_span() {
        let mut buf = RopeBuffer::from_text("> ");
        let mut sel = Selection::collapsed(2);
        let mut comp = Composition::new();

        comp.set_marked_text(&mut buf, &mut sel, "nihao", 5..5, None);
        comp.commit_text(&mut buf, &mut sel, "你好", None);
        assert_eq!(buf.content(), "> 你好");
        assert_eq!(sel, Selection::collapsed(4));
        assert!(!comp.is_composing());
    }

    #[test]
    fn test_commit_without_marked_uses_selection() {
        let mut buf = RopeBuffer::from_text("hello");
        let mut sel = Selection::new(1, 4);
        let mut comp = Composition::new();

        comp.commit_text(&mut buf, &mut sel, "ipp", None);
        assert_eq!(buf.content(), "hippo");
        assert_eq!(sel, Selection::collapsed(4));
    }

    #[test]
    fn test_cancel_removes_provisional_text() {
        let mut buf = RopeBuffer::from_text("ab");
        let mut sel = Selection::collapsed(1);
        let mut comp = Composition::new();

        comp.set_marked_text(&mut buf, &mut sel, "xyz", 3..3, None);
        assert!(comp.cancel(&mut buf, &mut sel));
        assert_eq!(buf.content(), "ab");
        assert_eq!(sel, Selection::collapsed(1));
        assert!(!comp.cancel(&mut buf, &mut sel));
    }
}
