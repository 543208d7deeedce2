//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use quickjot::editable::{ChangeNotification, EditEngine};
use quickjot::input::RawKeyEvent;
use quickjot::keymap::{KeyCode, Keystroke, Modifiers};
use quickjot::session::{Session, SessionOutcome};
use quickjot::OverlayConfig;

/// Create a test engine with given text and cursor position
pub fn test_engine(text: &str, cursor: usize) -> EditEngine {
    let mut engine = EditEngine::from_text(text);
    engine.set_selection(cursor, cursor);
    engine
}

/// Create a test engine with a selection from `anchor` to `head`
pub fn test_engine_with_selection(text: &str, anchor: usize, head: usize) -> EditEngine {
    let mut engine = EditEngine::from_text(text);
    engine.set_selection(anchor, head);
    engine
}

/// Subscribe a recorder and return the shared log it appends to
pub fn record_changes(engine: &mut EditEngine) -> Rc<RefCell<Vec<ChangeNotification>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.subscribe(Box::new(move |change| sink.borrow_mut().push(change.clone())));
    log
}

/// A headless session that is already showing
pub fn visible_session() -> Session {
    let mut session = Session::headless(OverlayConfig::default());
    session.show();
    session
}

/// Type every character of `text` into the session
pub fn type_text(session: &mut Session, text: &str) {
    for c in text.chars() {
        assert_eq!(session.handle(RawKeyEvent::char(c)), SessionOutcome::Consumed);
    }
}

pub fn press(session: &mut Session, code: KeyCode) -> SessionOutcome {
    session.handle(RawKeyEvent::key(Keystroke::key(code)))
}

pub fn press_with(session: &mut Session, code: KeyCode, mods: Modifiers) -> SessionOutcome {
    session.handle(RawKeyEvent::key(Keystroke::new(code, mods)))
}

/// The modifier the platform uses for word-wise motion
pub fn word_mod() -> Modifiers {
    if cfg!(target_os = "macos") {
        Modifiers::ALT
    } else {
        Modifiers::CTRL
    }
}
