//! Context system for conditional keybindings
//!
//! Enables bindings that only activate under certain conditions,
//! such as "Escape discards the composition while an input method is active".

use serde::Deserialize;

/// Engine and session state sampled for every routed event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    /// Whether there's an active text selection
    pub has_selection: bool,
    /// Whether an input method has provisional text in the buffer
    pub composing: bool,
    /// Whether the capture overlay is the visible, active window
    pub overlay_visible: bool,
    /// Buffer length in chars, for validating event-supplied ranges
    pub text_len: usize,
}

impl KeyContext {
    /// Visible overlay over an empty buffer
    pub fn visible() -> Self {
        Self {
            overlay_visible: true,
            ..Self::default()
        }
    }

    /// Overlay hidden; every event belongs to someone else
    pub fn hidden() -> Self {
        Self::default()
    }
}

/// Conditions that can be attached to keybindings
///
/// Multiple conditions on a binding are ANDed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Binding only active when text is selected
    HasSelection,
    /// Binding only active when no text is selected
    NoSelection,
    /// Binding only active while composing
    Composing,
    /// Binding only active while not composing
    NotComposing,
}

impl Condition {
    /// Evaluate this condition against the current context
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::HasSelection => ctx.has_selection,
            Condition::NoSelection => !ctx.has_selection,
            Condition::Composing => ctx.composing,
            Condition::NotComposing => !ctx.composing,
        }
    }

    /// Evaluate all conditions (AND logic)
    pub fn evaluate_all(conditions: &[Condition], ctx: &KeyContext) -> bool {
        conditions.iter().all(|c| c.evaluate(ctx))
    }
}
