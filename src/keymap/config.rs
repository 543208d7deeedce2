//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into Keybinding structs.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use super::binding::Keybinding;
use super::command::Command;
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    /// One keystroke, or several separated by spaces for a chord
    pub key: String,
    pub command: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub when: Option<Vec<String>>,
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse keybindings from YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let current_platform = get_current_platform();
    let mut bindings = Vec::with_capacity(config.bindings.len());

    for entry in config.bindings {
        if let Some(ref platform) = entry.platform {
            if platform != current_platform {
                continue;
            }
        }

        let keystrokes = parse_key_sequence(&entry.key)?;
        let command = parse_command(&entry.command)?;
        let conditions = parse_conditions(&entry.when)?;

        let mut binding = Keybinding::chord(keystrokes, command);
        if let Some(conds) = conditions {
            binding = binding.when(conds);
        }
        bindings.push(binding);
    }

    Ok(bindings)
}

/// Parse `"ctrl+k ctrl+d"` into its keystrokes
pub fn parse_key_sequence(keys: &str) -> Result<Vec<Keystroke>, KeymapError> {
    let strokes = keys
        .split_whitespace()
        .map(parse_key_string)
        .collect::<Result<Vec<_>, _>>()?;
    if strokes.is_empty() {
        return Err(KeymapError::InvalidKey(keys.to_string()));
    }
    Ok(strokes)
}

/// Parse a key string like "cmd+shift+s" into a Keystroke
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in key_str.split('+') {
        let part_lower = part.trim().to_lowercase();
        match part_lower.as_str() {
            "cmd" => mods = mods | Modifiers::cmd(),
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            "meta" | "super" | "win" => mods = mods | Modifiers::META,
            _ => {
                if key_part.is_some() {
                    return Err(KeymapError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                key_part = Some(parse_key_code(&part_lower)?);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(Keystroke::new(key, mods))
}

/// Parse a key code from string
fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match key {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" => Ok(KeyCode::Space),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),

        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdown" | "pgdn" => Ok(KeyCode::PageDown),

        "plus" => Ok(KeyCode::Char('+')),

        _ => Err(KeymapError::InvalidKey(format!("Unknown key: {}", key))),
    }
}

/// Parse a command name string into a Command enum
fn parse_command(cmd: &str) -> Result<Command, KeymapError> {
    Command::from_str(cmd).map_err(|_| KeymapError::InvalidCommand(cmd.to_string()))
}

/// Parse condition strings into Condition enums
fn parse_conditions(when: &Option<Vec<String>>) -> Result<Option<Vec<Condition>>, KeymapError> {
    let Some(conditions) = when else {
        return Ok(None);
    };

    conditions
        .iter()
        .map(|c| parse_condition(c))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Parse a single condition string
fn parse_condition(cond: &str) -> Result<Condition, KeymapError> {
    match cond.to_lowercase().as_str() {
        "has_selection" | "hasselection" | "selection" => Ok(Condition::HasSelection),
        "no_selection" | "noselection" => Ok(Condition::NoSelection),
        "composing" | "ime" | "marked_text" => Ok(Condition::Composing),
        "not_composing" | "notcomposing" | "no_ime" => Ok(Condition::NotComposing),
        _ => Err(KeymapError::InvalidCondition(cond.to_string())),
    }
}

/// Get the current platform identifier
fn get_current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidCommand(String),
    InvalidCondition(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidCommand(c) => write!(f, "Invalid command: {}", c),
            KeymapError::InvalidCondition(c) => write!(f, "Invalid condition: {}", c),
        }
    }
}

impl std::error::Error for KeymapError {}

// Implement FromStr for Command to parse from YAML
impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(n) = s.strip_prefix("SwitchToBuffer") {
            return match n.parse::<u8>() {
                Ok(n @ 1..=9) => Ok(Command::SwitchToBuffer(n)),
                _ => Err(()),
            };
        }

        match s {
            // Cursor movement
            "MoveCursorUp" => Ok(Command::MoveCursorUp),
            "MoveCursorDown" => Ok(Command::MoveCursorDown),
            "MoveCursorLeft" => Ok(Command::MoveCursorLeft),
            "MoveCursorRight" => Ok(Command::MoveCursorRight),
            "MoveCursorLineStart" => Ok(Command::MoveCursorLineStart),
            "MoveCursorLineEnd" => Ok(Command::MoveCursorLineEnd),
            "MoveCursorDocumentStart" => Ok(Command::MoveCursorDocumentStart),
            "MoveCursorDocumentEnd" => Ok(Command::MoveCursorDocumentEnd),
            "MoveCursorWordLeft" => Ok(Command::MoveCursorWordLeft),
            "MoveCursorWordRight" => Ok(Command::MoveCursorWordRight),

            // Selection movement
            "MoveCursorUpWithSelection" => Ok(Command::MoveCursorUpWithSelection),
            "MoveCursorDownWithSelection" => Ok(Command::MoveCursorDownWithSelection),
            "MoveCursorLeftWithSelection" => Ok(Command::MoveCursorLeftWithSelection),
            "MoveCursorRightWithSelection" => Ok(Command::MoveCursorRightWithSelection),
            "MoveCursorLineStartWithSelection" => Ok(Command::MoveCursorLineStartWithSelection),
            "MoveCursorLineEndWithSelection" => Ok(Command::MoveCursorLineEndWithSelection),
            "MoveCursorDocumentStartWithSelection" => {
                Ok(Command::MoveCursorDocumentStartWithSelection)
            }
            "MoveCursorDocumentEndWithSelection" => Ok(Command::MoveCursorDocumentEndWithSelection),
            "MoveCursorWordLeftWithSelection" => Ok(Command::MoveCursorWordLeftWithSelection),
            "MoveCursorWordRightWithSelection" => Ok(Command::MoveCursorWordRightWithSelection),

            // Selection commands
            "SelectAll" => Ok(Command::SelectAll),
            "SelectWord" => Ok(Command::SelectWord),
            "SelectLine" => Ok(Command::SelectLine),
            "ClearSelection" => Ok(Command::ClearSelection),

            // Text editing
            "InsertNewline" => Ok(Command::InsertNewline),
            "DeleteBackward" => Ok(Command::DeleteBackward),
            "DeleteForward" => Ok(Command::DeleteForward),
            "DeleteWordBackward" => Ok(Command::DeleteWordBackward),
            "DeleteWordForward" => Ok(Command::DeleteWordForward),
            "DeleteToLineStart" => Ok(Command::DeleteToLineStart),
            "DeleteToLineEnd" => Ok(Command::DeleteToLineEnd),

            // Clipboard
            "Copy" => Ok(Command::Copy),
            "Cut" => Ok(Command::Cut),
            "Paste" => Ok(Command::Paste),

            "CancelComposition" => Ok(Command::CancelComposition),

            // Session
            "Submit" => Ok(Command::Submit),
            "Cancel" => Ok(Command::Cancel),
            "NewBuffer" => Ok(Command::NewBuffer),
            "CloseBuffer" => Ok(Command::CloseBuffer),
            "NextBuffer" => Ok(Command::NextBuffer),
            "PrevBuffer" => Ok(Command::PrevBuffer),

            "Unbound" => Ok(Command::Unbound),

            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let stroke = parse_key_string("a").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('a'));
        assert!(stroke.mods.is_empty());
    }

    #[test]
    fn test_parse_key_with_multiple_modifiers() {
        let stroke = parse_key_string("ctrl+shift+tab").unwrap();
        assert_eq!(stroke.key, KeyCode::Tab);
        assert!(stroke.mods.ctrl());
        assert!(stroke.mods.shift());
    }

    #[test]
    fn test_parse_cmd_modifier() {
        let stroke = parse_key_string("cmd+1").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('1'));
        assert!(stroke.mods.has_cmd());
    }

    #[test]
    fn test_parse_non_ascii_char_key() {
        let stroke = parse_key_string("alt+é").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('é'));
    }

    #[test]
    fn test_parse_invalid_keys() {
        assert!(matches!(
            parse_key_string("ctrl+a+b"),
            Err(KeymapError::InvalidKey(_))
        ));
        assert!(matches!(
            parse_key_string("ctrl+shift"),
            Err(KeymapError::InvalidKey(_))
        ));
        assert!(parse_key_sequence("   ").is_err());
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::from_str("Submit"), Ok(Command::Submit));
        assert_eq!(
            Command::from_str("SwitchToBuffer4"),
            Ok(Command::SwitchToBuffer(4))
        );
        assert_eq!(Command::from_str("SwitchToBuffer0"), Err(()));
        assert_eq!(Command::from_str("SwitchToBuffer10"), Err(()));
        assert_eq!(Command::from_str("SaveFile"), Err(()));
    }

    #[test]
    fn test_parse_yaml_with_conditions_and_chords() {
        let yaml = r#"
bindings:
  - key: "escape"
    command: CancelComposition
    when: ["composing"]
  - key: "escape"
    command: Cancel
  - key: "ctrl+k ctrl+d"
    command: DeleteToLineEnd
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings[0].when, Some(vec![Condition::Composing]));
        assert!(bindings[1].when.is_none());
        assert!(bindings[2].is_chord());
    }

    #[test]
    fn test_parse_yaml_errors() {
        let bad_command = "bindings:\n  - key: a\n    command: Explode\n";
        assert_eq!(
            parse_keymap_yaml(bad_command),
            Err(KeymapError::InvalidCommand("Explode".into()))
        );

        let bad_condition = "bindings:\n  - key: a\n    command: Cut\n    when: [sidebar]\n";
        assert!(matches!(
            parse_keymap_yaml(bad_condition),
            Err(KeymapError::InvalidCondition(_))
        ));

        assert!(matches!(
            parse_keymap_yaml("bindings: 3"),
            Err(KeymapError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_yaml_with_platform() {
        let yaml = r#"
bindings:
  - key: "cmd+enter"
    command: Submit
  - key: "ctrl+k"
    command: DeleteToLineEnd
    platform: macos
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();

        #[cfg(target_os = "macos")]
        assert_eq!(bindings.len(), 2);

        #[cfg(not(target_os = "macos"))]
        assert_eq!(bindings.len(), 1);
    }
}
