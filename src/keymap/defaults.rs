//! Default keybindings for the overlay
//!
//! The shipped bindings live in `keymap.yaml` at the crate root and are
//! embedded at compile time; a hardcoded table backs them up if that file
//! ever fails to parse.

use std::path::Path;

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// The embedded default keymap source
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: embedded defaults + user overrides
///
/// User bindings with `command: Unbound` remove matching default bindings.
pub fn load_default_keymap() -> Vec<Keybinding> {
    let user_path = crate::config_paths::keymap_file();
    load_keymap_with_overrides(user_path.as_deref())
}

/// Embedded defaults merged with the bindings in `user_path`, if it exists
pub fn load_keymap_with_overrides(user_path: Option<&Path>) -> Vec<Keybinding> {
    let mut bindings = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::debug!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    };

    if let Some(user_path) = user_path.filter(|p| p.exists()) {
        match load_keymap_file(user_path) {
            Ok(user_bindings) => {
                tracing::info!(
                    "Merging user keymap from {} ({} bindings)",
                    user_path.display(),
                    user_bindings.len()
                );
                bindings = merge_bindings(bindings, user_bindings);
            }
            Err(e) => {
                tracing::warn!("Failed to load user keymap from {}: {}", user_path.display(), e);
            }
        }
    }

    bindings
}

/// Merge user bindings into base bindings
///
/// - same keystrokes + conditions as a base binding: replaces it
/// - command `Unbound`: removes every base binding on those keystrokes
/// - otherwise: appended
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystrokes != user_binding.keystrokes);
            continue;
        }

        let existing_idx = result.iter().position(|b| {
            b.keystrokes == user_binding.keystrokes && b.when == user_binding.when
        });

        match existing_idx {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded bindings for the current platform
///
/// Uses Cmd on macOS, Ctrl on Windows/Linux for the "command" modifier.
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();
    let cmd_shift = cmd | Modifiers::SHIFT;
    let shift = Modifiers::SHIFT;
    let ctrl = Modifiers::CTRL;
    let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;
    let none = Modifiers::NONE;

    let mut bindings = vec![
        // Session
        bind(KeyCode::Enter, none, Command::Submit).when(vec![Condition::NotComposing]),
        bind(KeyCode::Enter, cmd, Command::Submit).when(vec![Condition::NotComposing]),
        bind(KeyCode::Escape, none, Command::CancelComposition)
            .when(vec![Condition::Composing]),
        bind(KeyCode::Escape, none, Command::Cancel),

        // Scratch buffers
        bind(KeyCode::Char('n'), cmd, Command::NewBuffer),
        bind(KeyCode::Char('w'), cmd, Command::CloseBuffer),
        bind(KeyCode::Tab, ctrl, Command::NextBuffer),
        bind(KeyCode::Tab, ctrl_shift, Command::PrevBuffer),

        // Clipboard and selection
        bind(KeyCode::Char('c'), cmd, Command::Copy),
        bind(KeyCode::Char('x'), cmd, Command::Cut),
        bind(KeyCode::Char('v'), cmd, Command::Paste),
        bind(KeyCode::Char('a'), cmd, Command::SelectAll),
        bind(KeyCode::Char('d'), cmd, Command::SelectWord),
        bind(KeyCode::Char('l'), cmd, Command::SelectLine),

        // Basic navigation
        bind(KeyCode::Up, none, Command::MoveCursorUp),
        bind(KeyCode::Down, none, Command::MoveCursorDown),
        bind(KeyCode::Left, none, Command::MoveCursorLeft),
        bind(KeyCode::Right, none, Command::MoveCursorRight),
        bind(KeyCode::Home, none, Command::MoveCursorLineStart),
        bind(KeyCode::End, none, Command::MoveCursorLineEnd),
        bind(KeyCode::PageUp, none, Command::MoveCursorDocumentStart),
        bind(KeyCode::PageDown, none, Command::MoveCursorDocumentEnd),
        bind(KeyCode::Up, shift, Command::MoveCursorUpWithSelection),
        bind(KeyCode::Down, shift, Command::MoveCursorDownWithSelection),
        bind(KeyCode::Left, shift, Command::MoveCursorLeftWithSelection),
        bind(KeyCode::Right, shift, Command::MoveCursorRightWithSelection),
        bind(KeyCode::Home, shift, Command::MoveCursorLineStartWithSelection),
        bind(KeyCode::End, shift, Command::MoveCursorLineEndWithSelection),

        // Editing
        bind(KeyCode::Enter, shift, Command::InsertNewline),
        bind(KeyCode::Backspace, none, Command::DeleteBackward),
        bind(KeyCode::Backspace, shift, Command::DeleteBackward),
        bind(KeyCode::Delete, none, Command::DeleteForward),
    ];

    for n in 1..=9u8 {
        let digit = char::from(b'0' + n);
        bindings.push(bind(KeyCode::Char(digit), cmd, Command::SwitchToBuffer(n)));
    }

    #[cfg(target_os = "macos")]
    {
        let alt = Modifiers::ALT;
        let alt_shift = Modifiers::ALT | Modifiers::SHIFT;
        bindings.extend([
            bind(KeyCode::Left, alt, Command::MoveCursorWordLeft),
            bind(KeyCode::Right, alt, Command::MoveCursorWordRight),
            bind(KeyCode::Left, alt_shift, Command::MoveCursorWordLeftWithSelection),
            bind(KeyCode::Right, alt_shift, Command::MoveCursorWordRightWithSelection),
            bind(KeyCode::Left, cmd, Command::MoveCursorLineStart),
            bind(KeyCode::Right, cmd, Command::MoveCursorLineEnd),
            bind(KeyCode::Left, cmd_shift, Command::MoveCursorLineStartWithSelection),
            bind(KeyCode::Right, cmd_shift, Command::MoveCursorLineEndWithSelection),
            bind(KeyCode::Up, cmd, Command::MoveCursorDocumentStart),
            bind(KeyCode::Down, cmd, Command::MoveCursorDocumentEnd),
            bind(KeyCode::Up, cmd_shift, Command::MoveCursorDocumentStartWithSelection),
            bind(KeyCode::Down, cmd_shift, Command::MoveCursorDocumentEndWithSelection),
            bind(KeyCode::Backspace, alt, Command::DeleteWordBackward),
            bind(KeyCode::Delete, alt, Command::DeleteWordForward),
            bind(KeyCode::Backspace, cmd, Command::DeleteToLineStart),
            bind(KeyCode::Char('k'), ctrl, Command::DeleteToLineEnd),
            bind(KeyCode::Char('a'), ctrl, Command::MoveCursorLineStart),
            bind(KeyCode::Char('e'), ctrl, Command::MoveCursorLineEnd),
        ]);
    }

    #[cfg(not(target_os = "macos"))]
    {
        bindings.extend([
            bind(KeyCode::Left, ctrl, Command::MoveCursorWordLeft),
            bind(KeyCode::Right, ctrl, Command::MoveCursorWordRight),
            bind(KeyCode::Left, ctrl_shift, Command::MoveCursorWordLeftWithSelection),
            bind(KeyCode::Right, ctrl_shift, Command::MoveCursorWordRightWithSelection),
            bind(KeyCode::Home, ctrl, Command::MoveCursorDocumentStart),
            bind(KeyCode::End, ctrl, Command::MoveCursorDocumentEnd),
            bind(KeyCode::Home, ctrl_shift, Command::MoveCursorDocumentStartWithSelection),
            bind(KeyCode::End, ctrl_shift, Command::MoveCursorDocumentEndWithSelection),
            bind(KeyCode::Backspace, ctrl, Command::DeleteWordBackward),
            bind(KeyCode::Delete, ctrl, Command::DeleteWordForward),
            bind(KeyCode::Backspace, cmd_shift, Command::DeleteToLineStart),
            bind(KeyCode::Delete, cmd_shift, Command::DeleteToLineEnd),
        ]);
    }

    bindings
}

/// Helper to create a keybinding
fn bind(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}
