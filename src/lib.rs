//! quickjot - text capture engine for a floating quick-entry overlay
//!
//! This crate provides the editing core of the overlay: a rope-backed buffer
//! with selection and input-method composition, a set of scratch buffers, and
//! the router that decides which global key events the overlay consumes.
//! Windowing, rendering and text injection stay outside and talk to the
//! [`session::Session`] through its intake queue and outcomes.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod input;
pub mod keymap;
pub mod runtime;
pub mod script;
pub mod session;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use config::OverlayConfig;
pub use editable::EditEngine;
pub use session::{Session, SessionOutcome};
