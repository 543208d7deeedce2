//! Overlay configuration persistence
//!
//! Stores user preferences in `~/.config/quickjot/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Overlay configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Clear a scratch buffer once its text reached a valid target
    #[serde(default = "default_true")]
    pub clear_after_submit: bool,
    /// Convert pasted `\r\n` and `\r` to `\n`
    #[serde(default = "default_true")]
    pub normalize_line_endings: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            clear_after_submit: true,
            normalize_line_endings: true,
        }
    }
}

impl OverlayConfig {
    /// Load config from the user config dir, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the user config dir
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = OverlayConfig::load_from(&dir.path().join("config.yaml"));
        assert_eq!(config, OverlayConfig::default());
        assert!(config.clear_after_submit);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "clear_after_submit: false\n").unwrap();

        let config = OverlayConfig::load_from(&path);
        assert!(!config.clear_after_submit);
        assert!(config.normalize_line_endings);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "clear_after_submit: [nope").unwrap();

        assert_eq!(OverlayConfig::load_from(&path), OverlayConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = OverlayConfig {
            clear_after_submit: false,
            normalize_line_endings: false,
        };

        config.save_to(&path).unwrap();
        assert_eq!(OverlayConfig::load_from(&path), config);
    }
}
