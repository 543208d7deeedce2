//! Message types for the editing engine.

use std::ops::Range;

/// Target for cursor movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// Move one character left
    Left,
    /// Move one character right
    Right,
    /// Move one line up
    Up,
    /// Move one line down
    Down,
    /// Move to start of line
    LineStart,
    /// Move to end of line
    LineEnd,
    /// Move one word left
    WordLeft,
    /// Move one word right
    WordRight,
    /// Move to start of document
    DocumentStart,
    /// Move to end of document
    DocumentEnd,
}

/// Unified message type for all text editing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEditMsg {
    // === Movement ===
    /// Move cursor without affecting selection
    Move(MoveTarget),
    /// Move cursor and extend selection
    MoveWithSelection(MoveTarget),

    // === Insertion ===
    /// Insert a single character
    InsertChar(char),
    /// Insert a string (typed text without composition)
    InsertText(String),
    /// Insert a newline
    InsertNewline,
    /// Insert clipboard text (line endings may be normalised)
    Paste(String),

    // === Deletion ===
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Delete character after cursor (Delete)
    DeleteForward,
    /// Delete word before cursor (Ctrl/Option+Backspace)
    DeleteWordBackward,
    /// Delete word after cursor (Ctrl/Option+Delete)
    DeleteWordForward,
    /// Delete from cursor to start of line (Cmd+Backspace)
    DeleteToLineStart,
    /// Delete from cursor to end of line (Ctrl+K)
    DeleteToLineEnd,

    // === Selection ===
    /// Select all text
    SelectAll,
    /// Select current word
    SelectWord,
    /// Select current line
    SelectLine,
    /// Collapse selection to cursor position
    CollapseSelection,

    // === Composition ===
    /// Update provisional IME text
    SetMarkedText {
        text: String,
        selection: Range<usize>,
        replacement: Option<Range<usize>>,
    },
    /// Keep provisional text as committed
    UnmarkText,
    /// Commit final IME text
    CommitText {
        text: String,
        replacement: Option<Range<usize>>,
    },
    /// Discard provisional IME text
    CancelComposition,
}

impl TextEditMsg {
    /// Check if this message modifies the buffer
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            TextEditMsg::InsertChar(_)
                | TextEditMsg::InsertText(_)
                | TextEditMsg::InsertNewline
                | TextEditMsg::Paste(_)
                | TextEditMsg::DeleteBackward
                | TextEditMsg::DeleteForward
                | TextEditMsg::DeleteWordBackward
                | TextEditMsg::DeleteWordForward
                | TextEditMsg::DeleteToLineStart
                | TextEditMsg::DeleteToLineEnd
                | TextEditMsg::SetMarkedText { .. }
                | TextEditMsg::CommitText { .. }
                | TextEditMsg::CancelComposition
        )
    }

    /// Check if this message is a movement operation
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            TextEditMsg::Move(_) | TextEditMsg::MoveWithSelection(_)
        )
    }

    /// Check if this message is part of the composition protocol
    pub fn is_composition(&self) -> bool {
        matches!(
            self,
            TextEditMsg::SetMarkedText { .. }
                | TextEditMsg::UnmarkText
                | TextEditMsg::CommitText { .. }
                | TextEditMsg::CancelComposition
        )
    }
}
