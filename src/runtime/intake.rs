//! Raw input intake from the global key intercept
//!
//! The OS hook runs on its own thread and must answer immediately whether it
//! swallows an event. [`InputIntake`] makes that decision from a shared
//! visibility flag and forwards swallowed events over a channel; the session
//! drains the channel on the thread that owns the edit engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::input::RawKeyEvent;

/// Answer given back to the OS hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookVerdict {
    /// Swallow the event; it has been queued for the session
    Consume,
    /// Let the OS deliver the event normally
    PassThrough,
}

/// Shared "overlay is visible" flag
#[derive(Debug, Clone, Default)]
pub struct Visibility(Arc<AtomicBool>);

impl Visibility {
    pub fn new(visible: bool) -> Self {
        Self(Arc::new(AtomicBool::new(visible)))
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, visible: bool) {
        self.0.store(visible, Ordering::Release);
    }
}

/// Hook-side handle. Cheap to clone and safe to move to the hook thread.
#[derive(Debug, Clone)]
pub struct InputIntake {
    tx: Sender<RawKeyEvent>,
    visibility: Visibility,
}

impl InputIntake {
    /// Queue `event` if the overlay is visible
    pub fn offer(&self, event: RawKeyEvent) -> HookVerdict {
        if !self.visibility.get() {
            return HookVerdict::PassThrough;
        }
        match self.tx.send(event) {
            Ok(()) => HookVerdict::Consume,
            Err(_) => {
                tracing::warn!("Input queue closed, passing event through");
                HookVerdict::PassThrough
            }
        }
    }
}

/// Session-side end of the intake channel
#[derive(Debug)]
pub struct IntakeQueue {
    rx: Receiver<RawKeyEvent>,
}

impl IntakeQueue {
    /// Drain every queued event (non-blocking)
    pub fn poll_events(&self) -> Vec<RawKeyEvent> {
        let events: Vec<_> = self.rx.try_iter().collect();
        if !events.is_empty() {
            tracing::trace!("Drained {} input events", events.len());
        }
        events
    }

    /// Block until the next event, or None once every intake is dropped
    pub fn recv(&self) -> Option<RawKeyEvent> {
        self.rx.recv().ok()
    }
}

/// Create a connected intake/queue pair gated by `visibility`
pub fn channel(visibility: &Visibility) -> (InputIntake, IntakeQueue) {
    let (tx, rx) = mpsc::channel();
    (
        InputIntake {
            tx,
            visibility: visibility.clone(),
        },
        IntakeQueue { rx },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{KeyCode, Keystroke};

    fn enter() -> RawKeyEvent {
        RawKeyEvent::key(Keystroke::key(KeyCode::Enter))
    }

    #[test]
    fn test_hidden_overlay_passes_through_without_queueing() {
        let visibility = Visibility::new(false);
        let (intake, queue) = channel(&visibility);

        assert_eq!(intake.offer(enter()), HookVerdict::PassThrough);
        assert!(queue.poll_events().is_empty());
    }

    #[test]
    fn test_visible_overlay_consumes_and_queues() {
        let visibility = Visibility::new(true);
        let (intake, queue) = channel(&visibility);

        assert_eq!(intake.offer(enter()), HookVerdict::Consume);
        assert_eq!(intake.offer(RawKeyEvent::char('x')), HookVerdict::Consume);
        assert_eq!(queue.poll_events(), vec![enter(), RawKeyEvent::char('x')]);
        assert!(queue.poll_events().is_empty());
    }

    #[test]
    fn test_offer_from_another_thread() {
        let visibility = Visibility::new(true);
        let (intake, queue) = channel(&visibility);

        let hook = std::thread::spawn(move || {
            (0..3)
                .map(|_| intake.offer(RawKeyEvent::char('a')))
                .collect::<Vec<_>>()
        });
        let verdicts = hook.join().unwrap();

        assert!(verdicts.iter().all(|v| *v == HookVerdict::Consume));
        assert_eq!(queue.poll_events().len(), 3);
        assert_eq!(queue.recv(), None);
    }

    #[test]
    fn test_closed_queue_passes_through() {
        let visibility = Visibility::new(true);
        let (intake, queue) = channel(&visibility);
        drop(queue);

        assert_eq!(intake.offer(enter()), HookVerdict::PassThrough);
    }

    #[test]
    fn test_visibility_is_shared() {
        let visibility = Visibility::new(false);
        let (intake, _queue) = channel(&visibility);
        visibility.set(true);
        assert_eq!(intake.offer(enter()), HookVerdict::Consume);
    }
}
