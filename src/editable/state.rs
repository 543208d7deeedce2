//! EditEngine - buffer, selection and composition kept consistent behind one facade.

use std::fmt;

use crate::session::ScratchBuffer;
use crate::util::normalize_line_endings;

use super::boundary;
use super::buffer::{RopeBuffer, TextBuffer, TextBufferMut};
use super::composition::{Composition, MarkedRange};
use super::messages::{MoveTarget, TextEditMsg};
use super::selection::Selection;

/// Composition state of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Composing,
}

/// Emitted after every mutating command, once invariants hold again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotification {
    pub text: String,
    pub cursor: usize,
}

pub type ChangeListener = Box<dyn FnMut(&ChangeNotification)>;

/// Which selection edge a non-extending move escapes to
#[derive(Clone, Copy)]
enum Escape {
    Start,
    End,
    None,
}

/// The editing engine behind a single scratch buffer.
///
/// Every public method that belongs to the insert, delete, move or select
/// families emits exactly one [`ChangeNotification`] to subscribers, including
/// calls that turn out to be no-ops at a buffer edge.
pub struct EditEngine {
    buffer: RopeBuffer,
    selection: Selection,
    composition: Composition,
    normalize_line_endings: bool,
    listeners: Vec<ChangeListener>,
}

impl fmt::Debug for EditEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditEngine")
            .field("buffer", &self.buffer)
            .field("selection", &self.selection)
            .field("composition", &self.composition)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for EditEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EditEngine {
    pub fn new() -> Self {
        Self {
            buffer: RopeBuffer::new(),
            selection: Selection::collapsed(0),
            composition: Composition::new(),
            normalize_line_endings: true,
            listeners: Vec::new(),
        }
    }

    /// Create an engine holding `text` with the cursor at the end
    pub fn from_text(text: &str) -> Self {
        let buffer = RopeBuffer::from_text(text);
        let end = buffer.len_chars();
        Self {
            buffer,
            selection: Selection::collapsed(end),
            ..Self::new()
        }
    }

    /// Whether pasted `\r\n` / `\r` become `\n`
    pub fn set_normalize_line_endings(&mut self, enabled: bool) {
        self.normalize_line_endings = enabled;
    }

    /// Register a change listener
    pub fn subscribe(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    pub fn buffer(&self) -> &RopeBuffer {
        &self.buffer
    }

    /// Get the text content as a String
    pub fn text(&self) -> String {
        self.buffer.content()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    /// Active edge of the selection
    pub fn cursor(&self) -> usize {
        self.selection.head
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Row and column of the cursor, for caret placement
    pub fn cursor_row_col(&self) -> (usize, usize) {
        boundary::row_col(&self.buffer, self.selection.head)
    }

    /// Get the selected text (empty string if no selection)
    pub fn selected_text(&self) -> String {
        self.buffer.slice(self.selection.range())
    }

    /// Check if there is a non-empty selection
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn marked_range(&self) -> Option<&MarkedRange> {
        self.composition.marked()
    }

    pub fn is_composing(&self) -> bool {
        self.composition.is_composing()
    }

    pub fn state(&self) -> EngineState {
        if self.is_composing() {
            EngineState::Composing
        } else {
            EngineState::Idle
        }
    }

    /// Place the selection directly (clamped to the buffer)
    pub fn set_selection(&mut self, anchor: usize, head: usize) {
        self.composition.unmark_text();
        let len = self.buffer.len_chars();
        self.selection = Selection::new(anchor.min(len), head.min(len));
        self.notify();
    }

    /// Re-clamp and tell subscribers about the new state
    fn notify(&mut self) {
        self.selection.clamp(self.buffer.len_chars());
        tracing::trace!(
            target: "selection",
            anchor = self.selection.anchor,
            head = self.selection.head,
            composing = self.composition.is_composing(),
            "engine changed"
        );
        if self.listeners.is_empty() {
            return;
        }
        let change = ChangeNotification {
            text: self.buffer.content(),
            cursor: self.selection.head,
        };
        for listener in &mut self.listeners {
            listener(&change);
        }
    }

    /// Dispatch a message to the matching operation.
    /// Returns true if the buffer content changed.
    pub fn apply(&mut self, msg: TextEditMsg) -> bool {
        match msg {
            TextEditMsg::Move(target) => {
                self.move_cursor(target, false);
                false
            }
            TextEditMsg::MoveWithSelection(target) => {
                self.move_cursor(target, true);
                false
            }
            TextEditMsg::InsertChar(ch) => self.insert_char(ch),
            TextEditMsg::InsertText(text) => self.insert_text(&text),
            TextEditMsg::InsertNewline => self.insert_newline(),
            TextEditMsg::Paste(text) => self.paste(&text),
            TextEditMsg::DeleteBackward => self.delete_backward(),
            TextEditMsg::DeleteForward => self.delete_forward(),
            TextEditMsg::DeleteWordBackward => self.delete_word_backward(),
            TextEditMsg::DeleteWordForward => self.delete_word_forward(),
            TextEditMsg::DeleteToLineStart => self.delete_to_line_start(),
            TextEditMsg::DeleteToLineEnd => self.delete_to_line_end(),
            TextEditMsg::SelectAll => {
                self.select_all();
                false
            }
            TextEditMsg::SelectWord => {
                self.select_word();
                false
            }
            TextEditMsg::SelectLine => {
                self.select_line();
                false
            }
            TextEditMsg::CollapseSelection => {
                self.collapse_selection();
                false
            }
            TextEditMsg::SetMarkedText {
                text,
                selection,
                replacement,
            } => {
                self.set_marked_text(&text, selection, replacement);
                true
            }
            TextEditMsg::UnmarkText => {
                self.unmark_text();
                false
            }
            TextEditMsg::CommitText { text, replacement } => {
                self.commit_text(&text, replacement);
                true
            }
            TextEditMsg::CancelComposition => self.cancel_composition(),
        }
    }
}

// =============================================================================
// Movement Operations
// =============================================================================

impl EditEngine {
    /// Move by `target`, extending the selection when `extend` is set
    pub fn move_cursor(&mut self, target: MoveTarget, extend: bool) {
        match target {
            MoveTarget::Left => self.move_left(extend),
            MoveTarget::Right => self.move_right(extend),
            MoveTarget::Up => self.move_up(extend),
            MoveTarget::Down => self.move_down(extend),
            MoveTarget::LineStart => self.move_line_start(extend),
            MoveTarget::LineEnd => self.move_line_end(extend),
            MoveTarget::WordLeft => self.move_word_left(extend),
            MoveTarget::WordRight => self.move_word_right(extend),
            MoveTarget::DocumentStart => self.move_document_start(extend),
            MoveTarget::DocumentEnd => self.move_document_end(extend),
        }
    }

    /// Common path for every horizontal motion
    fn move_with(&mut self, extend: bool, escape: Escape, query: fn(&RopeBuffer, usize) -> usize) {
        self.composition.unmark_text();
        if !extend && !self.selection.is_empty() {
            match escape {
                Escape::Start => {
                    self.selection.collapse_to_start();
                    self.notify();
                    return;
                }
                Escape::End => {
                    self.selection.collapse_to_end();
                    self.notify();
                    return;
                }
                Escape::None => {}
            }
        }
        let to = query(&self.buffer, self.selection.head);
        self.selection.move_to(to, extend);
        self.notify();
    }

    /// Move cursor left by one character
    pub fn move_left(&mut self, extend: bool) {
        self.move_with(extend, Escape::Start, boundary::prev_char);
    }

    /// Move cursor right by one character
    pub fn move_right(&mut self, extend: bool) {
        self.move_with(extend, Escape::End, boundary::next_char);
    }

    /// Move cursor by one word to the left
    pub fn move_word_left(&mut self, extend: bool) {
        self.move_with(extend, Escape::Start, boundary::word_boundary_backward);
    }

    /// Move cursor by one word to the right
    pub fn move_word_right(&mut self, extend: bool) {
        self.move_with(extend, Escape::End, boundary::word_boundary_forward);
    }

    /// Move cursor to start of line
    pub fn move_line_start(&mut self, extend: bool) {
        self.move_with(extend, Escape::None, boundary::line_start);
    }

    /// Move cursor to end of line
    pub fn move_line_end(&mut self, extend: bool) {
        self.move_with(extend, Escape::None, boundary::line_end);
    }

    /// Move cursor to start of document
    pub fn move_document_start(&mut self, extend: bool) {
        self.move_with(extend, Escape::None, |_, _| boundary::document_start());
    }

    /// Move cursor to end of document
    pub fn move_document_end(&mut self, extend: bool) {
        self.move_with(extend, Escape::None, |buf, _| boundary::document_end(buf));
    }

    /// Move cursor up by one line
    pub fn move_up(&mut self, extend: bool) {
        self.move_vertical(false, extend);
    }

    /// Move cursor down by one line
    pub fn move_down(&mut self, extend: bool) {
        self.move_vertical(true, extend);
    }

    /// Column-preserving projection onto the neighbouring line
    fn move_vertical(&mut self, down: bool, extend: bool) {
        self.composition.unmark_text();
        let (row, col) = boundary::row_col(&self.buffer, self.selection.head);
        let desired = self.selection.desired_column.unwrap_or(col);
        let last_row = boundary::line_count(&self.buffer) - 1;
        let target_row = if down {
            (row + 1).min(last_row)
        } else {
            row.saturating_sub(1)
        };
        let to = boundary::from_row_col(&self.buffer, target_row, desired);

        self.selection.move_to(to, extend);
        self.selection.desired_column = Some(desired);
        self.notify();
    }

    /// Select all text
    pub fn select_all(&mut self) {
        self.composition.unmark_text();
        self.selection = Selection::new(0, self.buffer.len_chars());
        self.notify();
    }

    /// Select the word (or whitespace/punctuation run) at the cursor
    pub fn select_word(&mut self) {
        self.composition.unmark_text();
        let range = boundary::word_range_at(&self.buffer, self.selection.head);
        self.selection = Selection::new(range.start, range.end);
        self.notify();
    }

    /// Select the current line including its terminator
    pub fn select_line(&mut self) {
        self.composition.unmark_text();
        let head = self.selection.head;
        let start = boundary::line_start(&self.buffer, head);
        let end = boundary::line_end(&self.buffer, head);
        let end = if end < self.buffer.len_chars() {
            end + 1
        } else {
            end
        };
        self.selection = Selection::new(start, end);
        self.notify();
    }

    /// Collapse selection to cursor position
    pub fn collapse_selection(&mut self) {
        self.composition.unmark_text();
        self.selection.collapse();
        self.notify();
    }
}

// =============================================================================
// Editing Operations
// =============================================================================

impl EditEngine {
    /// Replace the selection with `text`, cursor after it
    fn replace_selection(&mut self, text: &str) -> bool {
        let range = self.selection.range();
        if range.is_empty() && text.is_empty() {
            return false;
        }
        self.buffer.replace(range.clone(), text);
        self.selection = Selection::collapsed(range.start + text.chars().count());
        true
    }

    /// Insert a character at the cursor position
    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut tmp = [0u8; 4];
        self.insert_text(ch.encode_utf8(&mut tmp))
    }

    /// Insert text at the cursor position, replacing any selection
    pub fn insert_text(&mut self, text: &str) -> bool {
        self.composition.unmark_text();
        let changed = self.replace_selection(text);
        self.notify();
        changed
    }

    /// Insert a line break
    pub fn insert_newline(&mut self) -> bool {
        self.insert_char('\n')
    }

    /// Insert clipboard text
    pub fn paste(&mut self, text: &str) -> bool {
        if self.normalize_line_endings {
            self.insert_text(&normalize_line_endings(text))
        } else {
            self.insert_text(text)
        }
    }

    /// Copy the selection. None when nothing is selected.
    pub fn copy(&self) -> Option<String> {
        if self.selection.is_empty() {
            None
        } else {
            Some(self.selected_text())
        }
    }

    /// Remove the selection and return it. None (and no change) when nothing is selected.
    pub fn cut(&mut self) -> Option<String> {
        self.composition.unmark_text();
        let cut = self.copy();
        if cut.is_some() {
            self.replace_selection("");
        }
        self.notify();
        cut
    }

    /// Delete the selection, or the span between the cursor and `query(cursor)`
    fn delete_with(&mut self, query: fn(&RopeBuffer, usize) -> usize) -> bool {
        self.composition.unmark_text();
        let changed = if !self.selection.is_empty() {
            self.replace_selection("")
        } else {
            let head = self.selection.head;
            let to = query(&self.buffer, head);
            let range = head.min(to)..head.max(to);
            if range.is_empty() {
                false
            } else {
                self.buffer.replace(range.clone(), "");
                self.selection = Selection::collapsed(range.start);
                true
            }
        };
        self.notify();
        changed
    }

    /// Delete character before cursor (Backspace)
    pub fn delete_backward(&mut self) -> bool {
        self.delete_with(boundary::prev_char)
    }

    /// Delete character after cursor (Delete key)
    pub fn delete_forward(&mut self) -> bool {
        self.delete_with(boundary::next_char)
    }

    /// Delete word before cursor
    pub fn delete_word_backward(&mut self) -> bool {
        self.delete_with(boundary::word_boundary_backward)
    }

    /// Delete word after cursor
    pub fn delete_word_forward(&mut self) -> bool {
        self.delete_with(boundary::word_boundary_forward)
    }

    /// Delete from the cursor back to the start of its line
    pub fn delete_to_line_start(&mut self) -> bool {
        self.delete_with(boundary::line_start)
    }

    /// Delete from the cursor to the end of its line
    pub fn delete_to_line_end(&mut self) -> bool {
        self.delete_with(boundary::line_end)
    }

    /// Update provisional IME text
    pub fn set_marked_text(
        &mut self,
        text: &str,
        selection: std::ops::Range<usize>,
        replacement: Option<std::ops::Range<usize>>,
    ) {
        self.composition.set_marked_text(
            &mut self.buffer,
            &mut self.selection,
            text,
            selection,
            replacement,
        );
        self.notify();
    }

    /// Keep provisional text in place and leave composition
    pub fn unmark_text(&mut self) {
        self.composition.unmark_text();
        self.notify();
    }

    /// Commit final IME text
    pub fn commit_text(&mut self, text: &str, replacement: Option<std::ops::Range<usize>>) {
        self.composition
            .commit_text(&mut self.buffer, &mut self.selection, text, replacement);
        self.notify();
    }

    /// Discard provisional IME text. Returns false when not composing.
    pub fn cancel_composition(&mut self) -> bool {
        let changed = self
            .composition
            .cancel(&mut self.buffer, &mut self.selection);
        self.notify();
        changed
    }

    /// Clear the buffer and reset the selection to (0, 0)
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.selection = Selection::collapsed(0);
        self.composition = Composition::new();
        self.notify();
    }

    /// Write the live content and cursor into `buffer`
    pub fn snapshot_into(&self, buffer: &mut ScratchBuffer) {
        buffer.content = self.buffer.content();
        buffer.cursor = self.selection.head;
    }

    /// Load content and cursor from `buffer`, ending any composition
    pub fn restore_from(&mut self, buffer: &ScratchBuffer) {
        self.buffer.set_content(&buffer.content);
        self.composition = Composition::new();
        self.selection = Selection::collapsed(buffer.cursor.min(self.buffer.len_chars()));
        self.notify();
    }
}
