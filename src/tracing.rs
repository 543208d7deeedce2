//! Debug tracing infrastructure for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=selection=trace,session=debug` - scoped filtering
//! - `RUST_LOG=quickjot::input=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/quickjot/logs/quickjot.log` with daily rotation.
//! File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::EditEngine;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`.
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of the engine's cursor state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub len: usize,
    pub anchor: usize,
    pub head: usize,
    pub marked: Option<(usize, usize)>,
}

impl SelectionSnapshot {
    pub fn from_engine(engine: &EditEngine) -> Self {
        let selection = engine.selection();
        Self {
            len: engine.len_chars(),
            anchor: selection.anchor,
            head: selection.head,
            marked: engine.marked_range().map(|m| (m.range.start, m.range.end)),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SelectionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.len != other.len {
            changes.push(format!("len: {} → {}", self.len, other.len));
        }
        if self.head != other.head {
            changes.push(format!("head: {} → {}", self.head, other.head));
        }
        if self.anchor != other.anchor {
            changes.push(format!("anchor: {} → {}", self.anchor, other.anchor));
        }
        if self.marked != other.marked {
            match other.marked {
                Some((start, end)) => changes.push(format!("marked {}..{}", start, end)),
                None => changes.push("marked cleared".to_string()),
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_reports_cursor_motion() {
        let mut engine = EditEngine::from_text("hello");
        let before = SelectionSnapshot::from_engine(&engine);
        engine.move_left(false);
        let after = SelectionSnapshot::from_engine(&engine);

        assert_eq!(
            before.diff(&after).as_deref(),
            Some("head: 5 → 4; anchor: 5 → 4")
        );
        assert_eq!(after.diff(&after), None);
    }

    #[test]
    fn test_diff_reports_marked_text() {
        let mut engine = EditEngine::new();
        let before = SelectionSnapshot::from_engine(&engine);
        engine.set_marked_text("ni", 2..2, None);
        let after = SelectionSnapshot::from_engine(&engine);

        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("marked 0..2"));
        assert!(diff.contains("len: 0 → 2"));
    }
}
