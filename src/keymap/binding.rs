//! A key sequence bound to an overlay command

use super::command::Command;
use super::context::{Condition, KeyContext};
use super::types::Keystroke;

/// One or more keystrokes mapped to a [`Command`], optionally gated on
/// overlay state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    /// One keystroke, or two or more for a chord
    pub keystrokes: Vec<Keystroke>,
    pub command: Command,
    /// All must hold for the binding to fire; `None` fires unconditionally
    pub when: Option<Vec<Condition>>,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self::chord(vec![keystroke], command)
    }

    pub fn chord(keystrokes: Vec<Keystroke>, command: Command) -> Self {
        Self {
            keystrokes,
            command,
            when: None,
        }
    }

    pub fn when(mut self, conditions: Vec<Condition>) -> Self {
        self.when = Some(conditions);
        self
    }

    pub fn is_chord(&self) -> bool {
        self.keystrokes.len() > 1
    }

    pub fn is_conditional(&self) -> bool {
        self.when.is_some()
    }

    /// Conditional bindings are active when every condition holds
    pub fn is_active(&self, ctx: &KeyContext) -> bool {
        self.when
            .as_deref()
            .map_or(true, |conds| Condition::evaluate_all(conds, ctx))
    }

    /// Human-readable keys, e.g. `Ctrl+K Ctrl+D`
    pub fn display_string(&self) -> String {
        self.keystrokes
            .iter()
            .map(Keystroke::display_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
