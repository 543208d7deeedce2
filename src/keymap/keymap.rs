//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::context::KeyContext;
use super::types::Keystroke;

/// Result of handling a keystroke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Execute(Command),
    /// Keystroke is part of a chord, await more input
    AwaitMore,
    NoMatch,
}

/// Stores keybindings and tracks chord progress
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Single-keystroke bindings by keystroke (indices into `bindings`).
    /// Several bindings may share a keystroke under different conditions.
    single_lookup: HashMap<Keystroke, Vec<usize>>,
    /// Chord bindings by their first keystroke
    chord_prefixes: HashMap<Keystroke, Vec<usize>>,
    pending_chord: Vec<Keystroke>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        let Some(&first_stroke) = binding.keystrokes.first() else {
            return;
        };
        let idx = self.bindings.len();

        let table = if binding.is_chord() {
            &mut self.chord_prefixes
        } else {
            &mut self.single_lookup
        };
        table.entry(first_stroke).or_default().push(idx);

        self.bindings.push(binding);
    }

    /// Drop any half-typed chord
    pub fn reset(&mut self) {
        self.pending_chord.clear();
    }

    /// Handle a keystroke, completing or starting chords as needed.
    ///
    /// Conditional bindings whose conditions hold win over unconditional ones.
    pub fn handle_keystroke(&mut self, keystroke: Keystroke, context: &KeyContext) -> KeyAction {
        if !self.pending_chord.is_empty() {
            self.pending_chord.push(keystroke);
            return self.try_complete_chord(context);
        }

        if let Some(command) = self.lookup(&keystroke, context) {
            return KeyAction::Execute(command);
        }

        if self.chord_prefixes.contains_key(&keystroke) {
            self.pending_chord.push(keystroke);
            return KeyAction::AwaitMore;
        }

        KeyAction::NoMatch
    }

    /// Conditional matches first, then the first unconditional binding
    fn find_matching_binding(&self, indices: &[usize], context: &KeyContext) -> Option<Command> {
        let candidates = || indices.iter().map(|&idx| &self.bindings[idx]);

        candidates()
            .find(|b| b.is_conditional() && b.is_active(context))
            .or_else(|| candidates().find(|b| !b.is_conditional()))
            .map(|b| b.command)
    }

    fn try_complete_chord(&mut self, context: &KeyContext) -> KeyAction {
        let first = self.pending_chord[0];

        let Some(indices) = self.chord_prefixes.get(&first) else {
            self.reset();
            return KeyAction::NoMatch;
        };

        let exact: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&idx| self.bindings[idx].keystrokes == self.pending_chord)
            .collect();
        if let Some(command) = self.find_matching_binding(&exact, context) {
            self.reset();
            return KeyAction::Execute(command);
        }

        let pending = self.pending_chord.len();
        let could_match = indices.iter().any(|&idx| {
            let strokes = &self.bindings[idx].keystrokes;
            strokes.len() > pending && strokes[..pending] == self.pending_chord[..]
        });

        if could_match {
            KeyAction::AwaitMore
        } else {
            self.reset();
            KeyAction::NoMatch
        }
    }

    /// Look up a single keystroke without chord handling
    pub fn lookup(&self, keystroke: &Keystroke, context: &KeyContext) -> Option<Command> {
        let indices = self.single_lookup.get(keystroke)?;
        self.find_matching_binding(indices, context)
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// Get the keybinding for a command (first match)
    pub fn binding_for(&self, command: Command) -> Option<&Keybinding> {
        self.bindings.iter().find(|b| b.command == command)
    }

    /// Get display string for a command's keybinding
    pub fn display_for(&self, command: Command) -> Option<String> {
        self.binding_for(command).map(|b| b.display_string())
    }

    pub fn has_pending_chord(&self) -> bool {
        !self.pending_chord.is_empty()
    }

    /// Get the pending chord keystrokes for display
    pub fn pending_chord_display(&self) -> Option<String> {
        if self.pending_chord.is_empty() {
            return None;
        }
        Some(
            self.pending_chord
                .iter()
                .map(|k| k.display_string())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::context::Condition;
    use crate::keymap::types::{KeyCode, Modifiers};

    fn ctrl(c: char) -> Keystroke {
        Keystroke::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    fn escape() -> Keystroke {
        Keystroke::key(KeyCode::Escape)
    }

    fn ctx() -> KeyContext {
        KeyContext::visible()
    }

    #[test]
    fn test_single_binding_lookup() {
        let keymap = Keymap::with_bindings(vec![Keybinding::new(ctrl('n'), Command::NewBuffer)]);

        assert_eq!(keymap.lookup(&ctrl('n'), &ctx()), Some(Command::NewBuffer));
        assert_eq!(keymap.lookup(&ctrl('k'), &ctx()), None);
    }

    #[test]
    fn test_conditional_binding_wins_when_it_holds() {
        let keymap = Keymap::with_bindings(vec![
            Keybinding::new(escape(), Command::Cancel),
            Keybinding::new(escape(), Command::CancelComposition)
                .when(vec![Condition::Composing]),
        ]);

        assert_eq!(keymap.lookup(&escape(), &ctx()), Some(Command::Cancel));

        let composing = KeyContext {
            composing: true,
            ..ctx()
        };
        assert_eq!(
            keymap.lookup(&escape(), &composing),
            Some(Command::CancelComposition)
        );
    }

    #[test]
    fn test_conditional_only_binding_can_miss() {
        let enter = Keystroke::key(KeyCode::Enter);
        let keymap = Keymap::with_bindings(vec![
            Keybinding::new(enter, Command::Submit).when(vec![Condition::NotComposing])
        ]);

        let composing = KeyContext {
            composing: true,
            ..ctx()
        };
        assert_eq!(keymap.lookup(&enter, &composing), None);
    }

    #[test]
    fn test_chord_await_more() {
        let mut keymap = Keymap::with_bindings(vec![Keybinding::chord(
            vec![ctrl('k'), ctrl('d')],
            Command::DeleteToLineEnd,
        )]);

        assert_eq!(keymap.handle_keystroke(ctrl('k'), &ctx()), KeyAction::AwaitMore);
        assert!(keymap.has_pending_chord());
        assert!(keymap.pending_chord_display().is_some());

        assert_eq!(
            keymap.handle_keystroke(ctrl('d'), &ctx()),
            KeyAction::Execute(Command::DeleteToLineEnd)
        );
        assert!(!keymap.has_pending_chord());
    }

    #[test]
    fn test_chord_mismatch_resets() {
        let mut keymap = Keymap::with_bindings(vec![Keybinding::chord(
            vec![ctrl('k'), ctrl('d')],
            Command::DeleteToLineEnd,
        )]);

        keymap.handle_keystroke(ctrl('k'), &ctx());
        assert_eq!(keymap.handle_keystroke(ctrl('s'), &ctx()), KeyAction::NoMatch);
        assert!(!keymap.has_pending_chord());
    }

    #[test]
    fn test_display_for_command() {
        let keymap = Keymap::with_bindings(vec![Keybinding::new(ctrl('w'), Command::CloseBuffer)]);

        let display = keymap.display_for(Command::CloseBuffer).unwrap();
        assert!(display.contains('W'));
        assert_eq!(keymap.display_for(Command::Submit), None);
    }

    #[test]
    fn test_reset_clears_pending() {
        let mut keymap = Keymap::with_bindings(vec![Keybinding::chord(
            vec![ctrl('k'), ctrl('d')],
            Command::DeleteToLineEnd,
        )]);

        keymap.handle_keystroke(ctrl('k'), &ctx());
        keymap.reset();
        assert!(!keymap.has_pending_chord());
    }
}
