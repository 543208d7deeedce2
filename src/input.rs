//! Keyboard and composition input routing
//!
//! Every event from the global intercept is classified here into exactly one
//! [`Routed`] outcome. The router never touches the engine itself; it only
//! decides what the event means given a [`KeyContext`] sampled from the
//! session at the moment the event is handled.

use std::ops::Range;

use serde::Serialize;

use crate::editable::TextEditMsg;
use crate::keymap::{KeyAction, KeyContext, Keybinding, Keymap, Keystroke};

/// Input-method event delivered alongside (or instead of) a key press
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionEvent {
    /// Provisional text changed
    SetMarked {
        text: String,
        /// Selection relative to the start of `text`
        selection: Range<usize>,
        replacement: Option<Range<usize>>,
    },
    /// Keep provisional text as committed
    Unmark,
    /// Final text from the input method
    Commit {
        text: String,
        replacement: Option<Range<usize>>,
    },
}

/// One event as captured by the OS hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawKeyEvent {
    pub keystroke: Keystroke,
    /// Text the key produces under the active layout, if any
    pub text: Option<String>,
    pub composition: Option<CompositionEvent>,
}

impl RawKeyEvent {
    /// A key press that produces no text
    pub fn key(keystroke: Keystroke) -> Self {
        Self {
            keystroke,
            text: None,
            composition: None,
        }
    }

    /// A key press that types `text`
    pub fn typed(keystroke: Keystroke, text: &str) -> Self {
        Self {
            keystroke,
            text: Some(text.to_string()),
            composition: None,
        }
    }

    /// A single typed character with no modifiers except Shift for capitals
    pub fn char(c: char) -> Self {
        let mut keystroke = Keystroke::char(c);
        if c.is_uppercase() {
            keystroke.mods = crate::keymap::Modifiers::SHIFT;
        }
        Self::typed(keystroke, c.encode_utf8(&mut [0u8; 4]))
    }

    /// An input-method event
    pub fn composition(event: CompositionEvent) -> Self {
        Self {
            keystroke: Keystroke::key(crate::keymap::KeyCode::Space),
            text: None,
            composition: Some(event),
        }
    }
}

/// Commands that act on the session rather than the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Submit,
    Cancel,
    NextBuffer,
    PrevBuffer,
    NewBuffer,
    CloseBuffer,
    /// 1-based buffer slot
    SwitchToBuffer(u8),
}

/// Commands that act on the current buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    Text(TextEditMsg),
    Copy,
    Cut,
    Paste,
}

/// Classification of one raw event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    Session(SessionCommand),
    Edit(EditAction),
    /// Not ours: hand the event back to the OS untouched
    PassThrough,
    /// Ours, but it does nothing (unbound key, pending chord)
    Ignored,
}

impl Routed {
    /// Whether the OS should stop delivering the event
    pub fn consumes(&self) -> bool {
        !matches!(self, Routed::PassThrough)
    }
}

/// Classifies raw events against the keymap
#[derive(Debug, Clone)]
pub struct InputRouter {
    keymap: Keymap,
}

impl InputRouter {
    pub fn new(keymap: Keymap) -> Self {
        Self { keymap }
    }

    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        Self::new(Keymap::with_bindings(bindings))
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Classify `event` given the state sampled in `ctx`
    pub fn route(&mut self, event: &RawKeyEvent, ctx: &KeyContext) -> Routed {
        if !ctx.overlay_visible {
            self.keymap.reset();
            return Routed::PassThrough;
        }

        if let Some(composition) = &event.composition {
            return route_composition(composition, ctx);
        }

        let routed = match self.keymap.handle_keystroke(event.keystroke, ctx) {
            KeyAction::Execute(command) => command.to_routed(),
            KeyAction::AwaitMore => Routed::Ignored,
            KeyAction::NoMatch => typed_text(event)
                .map(|text| Routed::Edit(EditAction::Text(TextEditMsg::InsertText(text))))
                .unwrap_or(Routed::Ignored),
        };

        tracing::trace!(keystroke = %event.keystroke, routed = ?routed, "routed key");
        routed
    }
}

/// Text to insert for an unbound key, if it produces any
fn typed_text(event: &RawKeyEvent) -> Option<String> {
    if event.keystroke.mods.is_shortcut() {
        return None;
    }
    let text = event.text.as_deref()?;
    if text.is_empty() || text.chars().any(char::is_control) {
        return None;
    }
    Some(text.to_string())
}

fn range_fits(range: &Range<usize>, len: usize) -> bool {
    range.start <= range.end && range.end <= len
}

/// Composition events carry ranges chosen by the input method; anything that
/// does not fit the buffer is handed back rather than applied.
fn route_composition(event: &CompositionEvent, ctx: &KeyContext) -> Routed {
    let msg = match event {
        CompositionEvent::SetMarked {
            text,
            selection,
            replacement,
        } => {
            let replacement_ok = replacement
                .as_ref()
                .map_or(true, |r| range_fits(r, ctx.text_len));
            if !replacement_ok || selection.start > selection.end {
                tracing::debug!(?event, "malformed composition event");
                return Routed::PassThrough;
            }
            TextEditMsg::SetMarkedText {
                text: text.clone(),
                selection: selection.clone(),
                replacement: replacement.clone(),
            }
        }
        CompositionEvent::Unmark => TextEditMsg::UnmarkText,
        CompositionEvent::Commit { text, replacement } => {
            if replacement
                .as_ref()
                .is_some_and(|r| !range_fits(r, ctx.text_len))
            {
                tracing::debug!(?event, "malformed composition event");
                return Routed::PassThrough;
            }
            TextEditMsg::CommitText {
                text: text.clone(),
                replacement: replacement.clone(),
            }
        }
    };
    Routed::Edit(EditAction::Text(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::MoveTarget;
    use crate::keymap::{default_bindings, Command, Condition, KeyCode, Modifiers};

    fn router() -> InputRouter {
        InputRouter::with_bindings(default_bindings())
    }

    fn visible(text_len: usize) -> KeyContext {
        KeyContext {
            text_len,
            ..KeyContext::visible()
        }
    }

    #[test]
    fn test_hidden_overlay_passes_everything_through() {
        let mut router = router();
        let ctx = KeyContext::hidden();
        assert_eq!(router.route(&RawKeyEvent::char('a'), &ctx), Routed::PassThrough);
        assert_eq!(
            router.route(&RawKeyEvent::key(Keystroke::key(KeyCode::Enter)), &ctx),
            Routed::PassThrough
        );
        assert!(!Routed::PassThrough.consumes());
    }

    #[test]
    fn test_printable_text_is_inserted() {
        let mut router = router();
        assert_eq!(
            router.route(&RawKeyEvent::char('A'), &visible(0)),
            Routed::Edit(EditAction::Text(TextEditMsg::InsertText("A".into())))
        );
        let space = RawKeyEvent::typed(Keystroke::key(KeyCode::Space), " ");
        assert_eq!(
            router.route(&space, &visible(0)),
            Routed::Edit(EditAction::Text(TextEditMsg::InsertText(" ".into())))
        );
    }

    #[test]
    fn test_shortcut_text_is_not_typed() {
        let mut router = router();
        let event = RawKeyEvent::typed(
            Keystroke::new(KeyCode::Char('q'), Modifiers::cmd()),
            "q",
        );
        assert_eq!(router.route(&event, &visible(0)), Routed::Ignored);
    }

    #[test]
    fn test_control_characters_are_ignored() {
        let mut router = router();
        let tab = RawKeyEvent::typed(Keystroke::key(KeyCode::Tab), "\t");
        assert_eq!(router.route(&tab, &visible(0)), Routed::Ignored);
    }

    #[test]
    fn test_bound_keys_map_to_commands() {
        let mut router = router();
        let left = RawKeyEvent::key(Keystroke::key(KeyCode::Left));
        assert_eq!(
            router.route(&left, &visible(3)),
            Routed::Edit(EditAction::Text(TextEditMsg::Move(MoveTarget::Left)))
        );

        let paste = RawKeyEvent::key(Keystroke::new(KeyCode::Char('v'), Modifiers::cmd()));
        assert_eq!(router.route(&paste, &visible(3)), Routed::Edit(EditAction::Paste));

        let two = RawKeyEvent::key(Keystroke::new(KeyCode::Char('2'), Modifiers::cmd()));
        assert_eq!(
            router.route(&two, &visible(3)),
            Routed::Session(SessionCommand::SwitchToBuffer(2))
        );
    }

    #[test]
    fn test_escape_while_composing_cancels_composition() {
        let mut router = router();
        let escape = RawKeyEvent::key(Keystroke::key(KeyCode::Escape));
        let ctx = KeyContext {
            composing: true,
            ..visible(2)
        };
        assert_eq!(
            router.route(&escape, &ctx),
            Routed::Edit(EditAction::Text(TextEditMsg::CancelComposition))
        );
        assert_eq!(
            router.route(&escape, &visible(2)),
            Routed::Session(SessionCommand::Cancel)
        );
    }

    #[test]
    fn test_composition_events_route_to_engine() {
        let mut router = router();
        let event = RawKeyEvent::composition(CompositionEvent::SetMarked {
            text: "ni".into(),
            selection: 2..2,
            replacement: None,
        });
        assert!(matches!(
            router.route(&event, &visible(0)),
            Routed::Edit(EditAction::Text(TextEditMsg::SetMarkedText { .. }))
        ));
    }

    #[test]
    fn test_malformed_composition_passes_through() {
        let mut router = router();
        let out_of_range = RawKeyEvent::composition(CompositionEvent::Commit {
            text: "x".into(),
            replacement: Some(2..9),
        });
        assert_eq!(router.route(&out_of_range, &visible(4)), Routed::PassThrough);

        #[allow(clippy::reversed_empty_ranges)]
        let inverted = RawKeyEvent::composition(CompositionEvent::SetMarked {
            text: "x".into(),
            selection: 1..0,
            replacement: None,
        });
        assert_eq!(router.route(&inverted, &visible(4)), Routed::PassThrough);
    }

    #[test]
    fn test_chord_prefix_is_consumed_and_hide_resets_it() {
        let ctrl_k = Keystroke::new(KeyCode::Char('k'), Modifiers::CTRL);
        let ctrl_d = Keystroke::new(KeyCode::Char('d'), Modifiers::CTRL);
        let mut router = InputRouter::with_bindings(vec![Keybinding::chord(
            vec![ctrl_k, ctrl_d],
            Command::DeleteToLineEnd,
        )
        .when(vec![Condition::NotComposing])]);

        assert_eq!(router.route(&RawKeyEvent::key(ctrl_k), &visible(0)), Routed::Ignored);
        assert!(router.keymap().has_pending_chord());

        router.route(&RawKeyEvent::key(ctrl_k), &KeyContext::hidden());
        assert!(!router.keymap().has_pending_chord());
    }
}
