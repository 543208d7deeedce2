//! Session module - scratch buffers, the clipboard seam and the session that
//! owns them
//!
//! - `buffer_set` - Ordered set of up to nine scratch buffers
//! - `clipboard` - Plain-text clipboard trait with system and in-memory impls
//! - `session` - Visibility, event handling and snapshot-then-switch

mod buffer_set;
mod clipboard;
#[allow(clippy::module_inception)]
mod session;

pub use buffer_set::{BufferId, BufferSet, ScratchBuffer, MAX_BUFFERS};
pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use session::{Session, SessionOutcome};
