//! Configurable keyboard mapping
//!
//! This module provides a data-driven keybinding system that:
//! - Maps keystrokes from the global intercept to overlay commands
//! - Supports platform-specific modifier handling (Cmd on macOS, Ctrl elsewhere)
//! - Enables user customization via YAML config files
//! - Supports conditional bindings and multi-key chords
//!
//! # Architecture
//!
//! ```text
//! RawKeyEvent → Keystroke → Keymap::handle_keystroke() → Command → Routed
//! ```

mod binding;
mod command;
mod config;
mod context;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_sequence, parse_key_string, parse_keymap_yaml, KeymapError};
pub use context::{Condition, KeyContext};
pub use defaults::{
    default_bindings, get_default_keymap_yaml, load_default_keymap, load_keymap_with_overrides,
    merge_bindings,
};
pub use keymap::{KeyAction, Keymap};
pub use types::{KeyCode, Keystroke, Modifiers};

#[cfg(test)]
mod tests;
