//! The capture session: single owner of the engine, the scratch buffers and
//! the visibility flag shared with the input intake.

use std::fmt;

use serde::Serialize;

use crate::config::OverlayConfig;
use crate::editable::{ChangeListener, EditEngine};
use crate::input::{EditAction, InputRouter, RawKeyEvent, Routed, SessionCommand};
use crate::keymap::{default_bindings, load_default_keymap, KeyContext};
use crate::runtime::{self, InputIntake, IntakeQueue, Visibility};
use crate::tracing::SelectionSnapshot;

use super::buffer_set::{BufferId, BufferSet};
use super::clipboard::{Clipboard, MemoryClipboard, SystemClipboard};

/// What happened to one raw event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Handled inside the overlay
    Consumed,
    /// Not ours; the OS should deliver it normally
    PassThrough,
    /// The user submitted `text` from `buffer`; the overlay is now hidden
    Submitted { buffer: BufferId, text: String },
    /// The overlay was dismissed; content is kept
    Cancelled,
    /// Swallowed by the hook while visible but arrived after a hide; the
    /// platform layer should deliver it to the target
    Reinject { event: RawKeyEvent },
}

pub struct Session {
    engine: EditEngine,
    buffers: BufferSet,
    router: InputRouter,
    clipboard: Box<dyn Clipboard>,
    visibility: Visibility,
    config: OverlayConfig,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("engine", &self.engine)
            .field("buffers", &self.buffers)
            .field("visible", &self.visibility.get())
            .field("config", &self.config)
            .finish()
    }
}

impl Session {
    /// A hidden session with one empty buffer
    pub fn new(router: InputRouter, clipboard: Box<dyn Clipboard>, config: OverlayConfig) -> Self {
        let mut engine = EditEngine::new();
        engine.set_normalize_line_endings(config.normalize_line_endings);
        Self {
            engine,
            buffers: BufferSet::new(),
            router,
            clipboard,
            visibility: Visibility::new(false),
            config,
        }
    }

    /// Session wired to the user's keymap and the system clipboard
    pub fn system(config: OverlayConfig) -> Self {
        Self::new(
            InputRouter::with_bindings(load_default_keymap()),
            Box::new(SystemClipboard),
            config,
        )
    }

    /// Session with the built-in keymap and an in-memory clipboard
    pub fn headless(config: OverlayConfig) -> Self {
        Self::new(
            InputRouter::with_bindings(default_bindings()),
            Box::new(MemoryClipboard::new()),
            config,
        )
    }

    pub fn engine(&self) -> &EditEngine {
        &self.engine
    }

    pub fn buffers(&self) -> &BufferSet {
        &self.buffers
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn clipboard_mut(&mut self) -> &mut dyn Clipboard {
        self.clipboard.as_mut()
    }

    /// Register a change listener on the engine
    pub fn subscribe(&mut self, listener: ChangeListener) {
        self.engine.subscribe(listener);
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.get()
    }

    /// Create an intake for the OS hook plus the queue this session drains
    pub fn intake(&self) -> (InputIntake, IntakeQueue) {
        runtime::channel(&self.visibility)
    }

    /// Snapshot of the state the router needs to classify an event
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            has_selection: self.engine.has_selection(),
            composing: self.engine.is_composing(),
            overlay_visible: self.visibility.get(),
            text_len: self.engine.len_chars(),
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Present the overlay with the current buffer loaded
    pub fn show(&mut self) {
        if self.visibility.get() {
            return;
        }
        self.engine.restore_from(self.buffers.current());
        self.visibility.set(true);
        tracing::debug!(target: "session", buffer = %self.buffers.current().id, "shown");
    }

    /// Write the live buffer back and dismiss the overlay
    pub fn hide(&mut self) {
        if !self.visibility.get() {
            return;
        }
        self.engine.snapshot_into(self.buffers.current_mut());
        self.visibility.set(false);
        tracing::debug!(target: "session", buffer = %self.buffers.current().id, "hidden");
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    /// Route and act on one raw event
    pub fn handle(&mut self, event: RawKeyEvent) -> SessionOutcome {
        self.dispatch(&event)
    }

    /// Handle every event waiting in `queue`.
    ///
    /// The hook already swallowed everything in the queue, so an event the
    /// overlay no longer wants (it was hidden earlier in the batch) comes back
    /// as [`SessionOutcome::Reinject`] for the platform layer to replay.
    pub fn pump(&mut self, queue: &IntakeQueue) -> Vec<SessionOutcome> {
        queue
            .poll_events()
            .into_iter()
            .map(|event| match self.dispatch(&event) {
                SessionOutcome::PassThrough => {
                    tracing::debug!(target: "session", keystroke = %event.keystroke, "reinjecting");
                    SessionOutcome::Reinject { event }
                }
                outcome => outcome,
            })
            .collect()
    }

    fn dispatch(&mut self, event: &RawKeyEvent) -> SessionOutcome {
        let ctx = self.key_context();
        let before = SelectionSnapshot::from_engine(&self.engine);

        let outcome = match self.router.route(event, &ctx) {
            Routed::PassThrough => SessionOutcome::PassThrough,
            Routed::Ignored => SessionOutcome::Consumed,
            Routed::Edit(action) => {
                self.apply_edit(action);
                SessionOutcome::Consumed
            }
            Routed::Session(command) => self.run_command(command),
        };

        if let Some(diff) = before.diff(&SelectionSnapshot::from_engine(&self.engine)) {
            tracing::trace!(target: "selection", %diff, "state changed");
        }
        outcome
    }

    fn apply_edit(&mut self, action: EditAction) {
        match action {
            EditAction::Text(msg) => {
                self.engine.apply(msg);
            }
            EditAction::Copy => {
                if let Some(text) = self.engine.copy() {
                    self.clipboard.set_text(&text);
                }
            }
            EditAction::Cut => {
                if let Some(text) = self.engine.cut() {
                    self.clipboard.set_text(&text);
                }
            }
            EditAction::Paste => match self.clipboard.get_text() {
                Some(text) if !text.is_empty() => {
                    self.engine.paste(&text);
                }
                _ => tracing::debug!(target: "session", "nothing to paste"),
            },
        }
    }

    fn run_command(&mut self, command: SessionCommand) -> SessionOutcome {
        match command {
            SessionCommand::Submit => {
                if self.engine.is_composing() {
                    tracing::debug!(target: "session", "submit refused while composing");
                    return SessionOutcome::Consumed;
                }
                self.hide();
                let buffer = self.buffers.current();
                tracing::debug!(target: "session", buffer = %buffer.id, "submitted");
                return SessionOutcome::Submitted {
                    buffer: buffer.id,
                    text: buffer.content.clone(),
                };
            }
            SessionCommand::Cancel => {
                self.hide();
                return SessionOutcome::Cancelled;
            }
            SessionCommand::NextBuffer => {
                self.next_buffer();
            }
            SessionCommand::PrevBuffer => {
                self.prev_buffer();
            }
            SessionCommand::NewBuffer => {
                self.new_buffer();
            }
            SessionCommand::CloseBuffer => {
                self.close_buffer();
            }
            SessionCommand::SwitchToBuffer(slot) => {
                self.switch_buffer(usize::from(slot).saturating_sub(1));
            }
        }
        SessionOutcome::Consumed
    }

    // =========================================================================
    // Buffer switching
    // =========================================================================

    /// Snapshot the live buffer, run `op`, then load whatever is current.
    fn exchange(&mut self, op: impl FnOnce(&mut BufferSet) -> bool) -> bool {
        self.engine.snapshot_into(self.buffers.current_mut());
        if !op(&mut self.buffers) {
            return false;
        }
        self.engine.restore_from(self.buffers.current());
        self.buffers.assert_invariants();
        tracing::debug!(
            target: "session",
            buffer = %self.buffers.current().id,
            index = self.buffers.current_index(),
            count = self.buffers.len(),
            "switched buffer"
        );
        true
    }

    /// Switch to the buffer at 0-based `index`
    pub fn switch_buffer(&mut self, index: usize) -> bool {
        self.exchange(|buffers| buffers.switch_to(index))
    }

    pub fn next_buffer(&mut self) -> bool {
        self.exchange(BufferSet::next)
    }

    pub fn prev_buffer(&mut self) -> bool {
        self.exchange(BufferSet::prev)
    }

    /// Open a new empty buffer and switch to it. False at the cap.
    pub fn new_buffer(&mut self) -> bool {
        self.exchange(BufferSet::create)
    }

    /// Close the current buffer. False if it is the only one.
    pub fn close_buffer(&mut self) -> bool {
        self.exchange(|buffers| buffers.close_current().is_some())
    }

    // =========================================================================
    // Delivery
    // =========================================================================

    /// Report whether submitted text from `buffer` reached a valid target.
    ///
    /// Returns true if the buffer was cleared.
    pub fn delivery_finished(&mut self, buffer: BufferId, target_was_valid: bool) -> bool {
        if !target_was_valid {
            tracing::debug!(target: "session", %buffer, "no valid target, buffer retained");
            return false;
        }
        if !self.config.clear_after_submit {
            return false;
        }
        if !self.buffers.clear_buffer(buffer) {
            tracing::warn!("Delivered buffer {} is no longer open", buffer);
            return false;
        }
        if self.buffers.current().id == buffer {
            self.engine.clear();
        }
        tracing::debug!(target: "session", %buffer, "delivered and cleared");
        true
    }
}
