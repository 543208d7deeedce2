//! Selection tests - select all/word/line, extension and clamping

mod common;

use common::{record_changes, test_engine, test_engine_with_selection};
use quickjot::editable::{EditEngine, Selection};

#[test]
fn test_select_all() {
    let mut engine = test_engine("hello\nworld", 3);
    engine.select_all();

    assert_eq!(engine.selection(), Selection::new(0, 11));
    assert_eq!(engine.selected_text(), "hello\nworld");
}

#[test]
fn test_select_all_empty_buffer() {
    let mut engine = EditEngine::new();
    engine.select_all();
    assert!(!engine.has_selection());
    assert_eq!(engine.cursor(), 0);
}

#[test]
fn test_select_word_under_cursor() {
    let mut engine = test_engine("hello brave world", 8);
    engine.select_word();
    assert_eq!(engine.selected_text(), "brave");
    assert_eq!(engine.selection(), Selection::new(6, 11));
}

#[test]
fn test_select_word_at_end_of_buffer() {
    let mut engine = test_engine("hello", 5);
    engine.select_word();
    assert_eq!(engine.selected_text(), "hello");
}

#[test]
fn test_select_word_on_punctuation_run() {
    let mut engine = test_engine("a --> b", 3);
    engine.select_word();
    assert_eq!(engine.selected_text(), "-->");
}

#[test]
fn test_select_line_includes_terminator() {
    let mut engine = test_engine("one\ntwo\nthree", 5);
    engine.select_line();
    assert_eq!(engine.selected_text(), "two\n");
}

#[test]
fn test_select_last_line() {
    let mut engine = test_engine("one\ntwo", 5);
    engine.select_line();
    assert_eq!(engine.selected_text(), "two");
}

#[test]
fn test_shift_motion_extends_from_anchor() {
    let mut engine = test_engine("hello world", 2);
    engine.move_right(true);
    engine.move_right(true);
    assert_eq!(engine.selection(), Selection::new(2, 4));

    engine.move_left(true);
    engine.move_left(true);
    engine.move_left(true);
    assert_eq!(engine.selection(), Selection::new(2, 1));
    assert_eq!(engine.selected_text(), "e");
}

#[test]
fn test_collapse_selection_keeps_head() {
    let mut engine = test_engine_with_selection("hello", 1, 4);
    engine.collapse_selection();
    assert_eq!(engine.selection(), Selection::collapsed(4));
}

#[test]
fn test_set_selection_clamps() {
    let mut engine = test_engine("abc", 0);
    engine.set_selection(1, 99);
    assert_eq!(engine.selection(), Selection::new(1, 3));
}

#[test]
fn test_selection_commands_notify() {
    let mut engine = test_engine("abc def", 1);
    let log = record_changes(&mut engine);

    engine.select_word();
    engine.select_line();
    engine.select_all();
    engine.collapse_selection();

    assert_eq!(log.borrow().len(), 4);
}
