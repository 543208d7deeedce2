//! Integration tests for the keymap system

use super::*;

fn embedded_keymap() -> Keymap {
    Keymap::with_bindings(
        parse_keymap_yaml(get_default_keymap_yaml())
            .expect("Embedded keymap.yaml should parse successfully"),
    )
}

fn visible() -> KeyContext {
    KeyContext::visible()
}

fn composing() -> KeyContext {
    KeyContext {
        composing: true,
        ..KeyContext::visible()
    }
}

#[test]
fn test_load_default_keymap() {
    let bindings = load_default_keymap();
    assert!(!bindings.is_empty(), "Default keymap should not be empty");
}

#[test]
fn test_enter_submits_unless_composing() {
    let keymap = embedded_keymap();
    let enter = Keystroke::key(KeyCode::Enter);

    assert_eq!(keymap.lookup(&enter, &visible()), Some(Command::Submit));
    assert_eq!(keymap.lookup(&enter, &composing()), None);
}

#[test]
fn test_escape_depends_on_composition() {
    let keymap = embedded_keymap();
    let escape = Keystroke::key(KeyCode::Escape);

    assert_eq!(keymap.lookup(&escape, &visible()), Some(Command::Cancel));
    assert_eq!(
        keymap.lookup(&escape, &composing()),
        Some(Command::CancelComposition)
    );
}

#[test]
fn test_buffer_switch_digits() {
    let keymap = embedded_keymap();
    for n in 1..=9u8 {
        let stroke = Keystroke::new(KeyCode::Char(char::from(b'0' + n)), Modifiers::cmd());
        assert_eq!(
            keymap.lookup(&stroke, &visible()),
            Some(Command::SwitchToBuffer(n))
        );
    }
}

#[test]
fn test_keymap_lookup_arrow_keys() {
    let keymap = embedded_keymap();

    assert_eq!(
        keymap.lookup(&Keystroke::key(KeyCode::Left), &visible()),
        Some(Command::MoveCursorLeft)
    );
    assert_eq!(
        keymap.lookup(&Keystroke::new(KeyCode::Right, Modifiers::SHIFT), &visible()),
        Some(Command::MoveCursorRightWithSelection)
    );
}

#[test]
fn test_word_navigation_per_platform() {
    let keymap = embedded_keymap();
    let word_mod = if cfg!(target_os = "macos") {
        Modifiers::ALT
    } else {
        Modifiers::CTRL
    };

    assert_eq!(
        keymap.lookup(&Keystroke::new(KeyCode::Left, word_mod), &visible()),
        Some(Command::MoveCursorWordLeft)
    );
    assert_eq!(
        keymap.lookup(&Keystroke::new(KeyCode::Backspace, word_mod), &visible()),
        Some(Command::DeleteWordBackward)
    );
}

#[test]
fn test_clipboard_bindings() {
    let keymap = embedded_keymap();
    let cmd = Modifiers::cmd();

    for (c, command) in [('c', Command::Copy), ('x', Command::Cut), ('v', Command::Paste)] {
        assert_eq!(
            keymap.lookup(&Keystroke::new(KeyCode::Char(c), cmd), &visible()),
            Some(command)
        );
    }
}

#[test]
fn test_plain_letters_are_unbound() {
    let keymap = embedded_keymap();
    for c in 'a'..='z' {
        assert_eq!(keymap.lookup(&Keystroke::char(c), &visible()), None, "{}", c);
    }
}

#[test]
fn test_unbinding_via_merge() {
    let cmd_w = Keystroke::new(KeyCode::Char('w'), Modifiers::cmd());
    let merged = merge_bindings(
        parse_keymap_yaml(get_default_keymap_yaml()).unwrap(),
        vec![Keybinding::new(cmd_w, Command::Unbound)],
    );
    let keymap = Keymap::with_bindings(merged);
    assert_eq!(keymap.lookup(&cmd_w, &visible()), None);
}
