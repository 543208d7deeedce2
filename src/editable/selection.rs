//! Cursor and selection state over linear character offsets.

use std::ops::Range;

/// A text selection with anchor (start point) and head (cursor position).
/// The anchor stays fixed while the head moves during selection extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: usize,
    /// Where the cursor is (moving point)
    pub head: usize,
    /// Desired column for vertical movement.
    /// Preserves the intended column while moving through shorter lines.
    pub desired_column: Option<usize>,
}

impl Selection {
    pub const fn new(anchor: usize, head: usize) -> Self {
        Self {
            anchor,
            head,
            desired_column: None,
        }
    }

    /// Create a collapsed selection (cursor with no selection)
    pub const fn collapsed(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// Check if selection is empty (anchor == head)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Number of selected characters
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Get the start position (minimum of anchor and head)
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Get the end position (maximum of anchor and head)
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// `[start, end)`
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Check if selection is reversed (head before anchor)
    pub fn is_reversed(&self) -> bool {
        self.head < self.anchor
    }

    /// Move the head to `pos`.
    ///
    /// Without `extend` the selection collapses to `(pos, pos)`; with it the
    /// anchor stays where it is.
    pub fn move_to(&mut self, pos: usize, extend: bool) {
        self.head = pos;
        if !extend {
            self.anchor = pos;
        }
        self.desired_column = None;
    }

    /// Collapse selection to head position
    pub fn collapse(&mut self) {
        self.anchor = self.head;
    }

    /// Collapse selection to start position
    pub fn collapse_to_start(&mut self) {
        let start = self.start();
        self.move_to(start, false);
    }

    /// Collapse selection to end position
    pub fn collapse_to_end(&mut self) {
        let end = self.end();
        self.move_to(end, false);
    }

    /// Clamp both edges into `0..=len`
    pub fn clamp(&mut self, len: usize) {
        self.anchor = self.anchor.min(len);
        self.head = self.head.min(len);
    }

    /// Check if a position is within this selection
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start() && pos < self.end()
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}
