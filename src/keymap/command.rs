//! Command enum representing every action a key can be bound to
//!
//! Commands are the bridge between keybindings and the router: each one maps
//! to exactly one [`Routed`] outcome.

use crate::editable::{MoveTarget, TextEditMsg};
use crate::input::{EditAction, Routed, SessionCommand};

/// All commands that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Cursor Movement (no selection)
    // ========================================================================
    MoveCursorUp,
    MoveCursorDown,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorLineStart,
    MoveCursorLineEnd,
    MoveCursorDocumentStart,
    MoveCursorDocumentEnd,
    MoveCursorWordLeft,
    MoveCursorWordRight,

    // ========================================================================
    // Selection Movement (extend selection)
    // ========================================================================
    MoveCursorUpWithSelection,
    MoveCursorDownWithSelection,
    MoveCursorLeftWithSelection,
    MoveCursorRightWithSelection,
    MoveCursorLineStartWithSelection,
    MoveCursorLineEndWithSelection,
    MoveCursorDocumentStartWithSelection,
    MoveCursorDocumentEndWithSelection,
    MoveCursorWordLeftWithSelection,
    MoveCursorWordRightWithSelection,

    // ========================================================================
    // Selection Commands
    // ========================================================================
    SelectAll,
    SelectWord,
    SelectLine,
    /// Collapse selection to cursor
    ClearSelection,

    // ========================================================================
    // Text Editing
    // ========================================================================
    InsertNewline,
    /// Backspace
    DeleteBackward,
    /// Forward delete
    DeleteForward,
    DeleteWordBackward,
    DeleteWordForward,
    DeleteToLineStart,
    DeleteToLineEnd,

    // ========================================================================
    // Clipboard
    // ========================================================================
    Copy,
    Cut,
    Paste,

    // ========================================================================
    // Composition
    // ========================================================================
    /// Discard provisional input-method text
    CancelComposition,

    // ========================================================================
    // Session
    // ========================================================================
    /// Hand the current buffer's text to the target application
    Submit,
    /// Hide the overlay, keeping the text
    Cancel,
    NewBuffer,
    CloseBuffer,
    NextBuffer,
    PrevBuffer,
    /// Jump to scratch buffer 1..=9
    SwitchToBuffer(u8),

    // ========================================================================
    // Special
    // ========================================================================
    /// Explicitly unbound - disables a default binding
    Unbound,
}

impl Command {
    /// The routing outcome for this command
    pub fn to_routed(self) -> Routed {
        use Command::*;

        let edit = |msg: TextEditMsg| Routed::Edit(EditAction::Text(msg));
        let mv = |target: MoveTarget| edit(TextEditMsg::Move(target));
        let extend = |target: MoveTarget| edit(TextEditMsg::MoveWithSelection(target));

        match self {
            MoveCursorUp => mv(MoveTarget::Up),
            MoveCursorDown => mv(MoveTarget::Down),
            MoveCursorLeft => mv(MoveTarget::Left),
            MoveCursorRight => mv(MoveTarget::Right),
            MoveCursorLineStart => mv(MoveTarget::LineStart),
            MoveCursorLineEnd => mv(MoveTarget::LineEnd),
            MoveCursorDocumentStart => mv(MoveTarget::DocumentStart),
            MoveCursorDocumentEnd => mv(MoveTarget::DocumentEnd),
            MoveCursorWordLeft => mv(MoveTarget::WordLeft),
            MoveCursorWordRight => mv(MoveTarget::WordRight),

            MoveCursorUpWithSelection => extend(MoveTarget::Up),
            MoveCursorDownWithSelection => extend(MoveTarget::Down),
            MoveCursorLeftWithSelection => extend(MoveTarget::Left),
            MoveCursorRightWithSelection => extend(MoveTarget::Right),
            MoveCursorLineStartWithSelection => extend(MoveTarget::LineStart),
            MoveCursorLineEndWithSelection => extend(MoveTarget::LineEnd),
            MoveCursorDocumentStartWithSelection => extend(MoveTarget::DocumentStart),
            MoveCursorDocumentEndWithSelection => extend(MoveTarget::DocumentEnd),
            MoveCursorWordLeftWithSelection => extend(MoveTarget::WordLeft),
            MoveCursorWordRightWithSelection => extend(MoveTarget::WordRight),

            SelectAll => edit(TextEditMsg::SelectAll),
            SelectWord => edit(TextEditMsg::SelectWord),
            SelectLine => edit(TextEditMsg::SelectLine),
            ClearSelection => edit(TextEditMsg::CollapseSelection),

            InsertNewline => edit(TextEditMsg::InsertNewline),
            DeleteBackward => edit(TextEditMsg::DeleteBackward),
            DeleteForward => edit(TextEditMsg::DeleteForward),
            DeleteWordBackward => edit(TextEditMsg::DeleteWordBackward),
            DeleteWordForward => edit(TextEditMsg::DeleteWordForward),
            DeleteToLineStart => edit(TextEditMsg::DeleteToLineStart),
            DeleteToLineEnd => edit(TextEditMsg::DeleteToLineEnd),

            Copy => Routed::Edit(EditAction::Copy),
            Cut => Routed::Edit(EditAction::Cut),
            Paste => Routed::Edit(EditAction::Paste),

            CancelComposition => edit(TextEditMsg::CancelComposition),

            Submit => Routed::Session(SessionCommand::Submit),
            Cancel => Routed::Session(SessionCommand::Cancel),
            NewBuffer => Routed::Session(SessionCommand::NewBuffer),
            CloseBuffer => Routed::Session(SessionCommand::CloseBuffer),
            NextBuffer => Routed::Session(SessionCommand::NextBuffer),
            PrevBuffer => Routed::Session(SessionCommand::PrevBuffer),
            SwitchToBuffer(n) => Routed::Session(SessionCommand::SwitchToBuffer(n)),

            Unbound => Routed::Ignored,
        }
    }

    /// Get a display name for this command
    pub fn display_name(self) -> String {
        use Command::*;

        let name = match self {
            MoveCursorUp => "Move Cursor Up",
            MoveCursorDown => "Move Cursor Down",
            MoveCursorLeft => "Move Cursor Left",
            MoveCursorRight => "Move Cursor Right",
            MoveCursorLineStart => "Move to Line Start",
            MoveCursorLineEnd => "Move to Line End",
            MoveCursorDocumentStart => "Move to Document Start",
            MoveCursorDocumentEnd => "Move to Document End",
            MoveCursorWordLeft => "Move Word Left",
            MoveCursorWordRight => "Move Word Right",

            MoveCursorUpWithSelection => "Select Up",
            MoveCursorDownWithSelection => "Select Down",
            MoveCursorLeftWithSelection => "Select Left",
            MoveCursorRightWithSelection => "Select Right",
            MoveCursorLineStartWithSelection => "Select to Line Start",
            MoveCursorLineEndWithSelection => "Select to Line End",
            MoveCursorDocumentStartWithSelection => "Select to Document Start",
            MoveCursorDocumentEndWithSelection => "Select to Document End",
            MoveCursorWordLeftWithSelection => "Select Word Left",
            MoveCursorWordRightWithSelection => "Select Word Right",

            SelectAll => "Select All",
            SelectWord => "Select Word",
            SelectLine => "Select Line",
            ClearSelection => "Clear Selection",

            InsertNewline => "Insert Newline",
            DeleteBackward => "Delete Backward",
            DeleteForward => "Delete Forward",
            DeleteWordBackward => "Delete Word Backward",
            DeleteWordForward => "Delete Word Forward",
            DeleteToLineStart => "Delete to Line Start",
            DeleteToLineEnd => "Delete to Line End",

            Copy => "Copy",
            Cut => "Cut",
            Paste => "Paste",

            CancelComposition => "Cancel Composition",

            Submit => "Submit",
            Cancel => "Cancel",
            NewBuffer => "New Buffer",
            CloseBuffer => "Close Buffer",
            NextBuffer => "Next Buffer",
            PrevBuffer => "Previous Buffer",
            SwitchToBuffer(n) => return format!("Switch to Buffer {}", n),

            Unbound => "Unbound",
        };
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_routes_to_edit() {
        assert_eq!(
            Command::MoveCursorWordLeft.to_routed(),
            Routed::Edit(EditAction::Text(TextEditMsg::Move(MoveTarget::WordLeft)))
        );
        assert_eq!(
            Command::MoveCursorUpWithSelection.to_routed(),
            Routed::Edit(EditAction::Text(TextEditMsg::MoveWithSelection(
                MoveTarget::Up
            )))
        );
    }

    #[test]
    fn test_session_commands() {
        assert_eq!(
            Command::Submit.to_routed(),
            Routed::Session(SessionCommand::Submit)
        );
        assert_eq!(
            Command::SwitchToBuffer(3).to_routed(),
            Routed::Session(SessionCommand::SwitchToBuffer(3))
        );
    }

    #[test]
    fn test_unbound_is_ignored() {
        assert_eq!(Command::Unbound.to_routed(), Routed::Ignored);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Command::SelectAll.display_name(), "Select All");
        assert_eq!(Command::SwitchToBuffer(2).display_name(), "Switch to Buffer 2");
    }
}
