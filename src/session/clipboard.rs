//! Clipboard seam used by copy, cut and paste.

/// Plain-text clipboard access. Failures are absorbed; a clipboard that
/// cannot be reached behaves like an empty one.
pub trait Clipboard {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: &str);
}

/// The system clipboard via `arboard`.
///
/// A fresh handle is opened per call so a clipboard owner that disappears
/// between calls does not poison later ones.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => clipboard.get_text().ok(),
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                None
            }
        }
    }

    fn set_text(&mut self, text: &str) {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(text) {
                    tracing::warn!("Failed to write clipboard: {}", e);
                }
            }
            Err(e) => tracing::warn!("Clipboard unavailable: {}", e),
        }
    }
}

/// In-process clipboard for headless runs and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    content: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            content: Some(text.to_string()),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.content.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.content = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_round_trip() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.get_text(), None);
        clipboard.set_text("copied");
        assert_eq!(clipboard.get_text().as_deref(), Some("copied"));
    }
}
