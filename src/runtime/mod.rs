//! Runtime module - the thread boundary between the OS hook and the session
//!
//! - `intake` - Visibility-gated event queue fed by the global key intercept

pub mod intake;

pub use intake::{channel, HookVerdict, InputIntake, IntakeQueue, Visibility};
