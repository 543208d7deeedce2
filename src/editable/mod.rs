//! Text editing engine for the capture overlay.
//!
//! # Architecture
//!
//! The core components are:
//!
//! - [`TextBuffer`] / [`TextBufferMut`]: Traits abstracting over buffer implementations
//! - [`RopeBuffer`]: The buffer behind every scratch slot (backed by `ropey::Rope`)
//! - [`boundary`]: Pure line/word/document boundary queries
//! - [`Selection`]: Anchor/head pair over char offsets
//! - [`Composition`]: Marked text produced by an input method
//! - [`EditEngine`]: Facade keeping all of the above consistent
//! - [`TextEditMsg`]: Unified message type for all editing operations
//!
//! # Example
//!
//! ```
//! use quickjot::editable::EditEngine;
//!
//! let mut engine = EditEngine::from_text("hello");
//! engine.move_word_left(false);
//! engine.insert_text("say ");
//!
//! assert_eq!(engine.text(), "say hello");
//! ```

pub mod boundary;
mod buffer;
mod composition;
mod messages;
mod selection;
mod state;

// Re-export main types
pub use buffer::{RopeBuffer, TextBuffer, TextBufferMut};
pub use composition::{Composition, MarkedRange};
pub use messages::{MoveTarget, TextEditMsg};
pub use selection::Selection;
pub use state::{ChangeListener, ChangeNotification, EditEngine, EngineState};
