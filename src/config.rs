//! Editor configuration persistence
//!
//! Preferences are stored as YAML, e.g.
//!
//! ```yaml
//! indent_unit: "\t"
//! tab_width: 8
//! selectable: true
//! editable: true
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::editable::validate_indent_unit;
use crate::error::EditError;
use crate::util::TABULATOR_WIDTH;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Text inserted at each line start by indent, removed by outdent
    #[serde(default = "default_indent_unit")]
    pub indent_unit: String,
    /// Columns per tab stop, used for vertical movement and pointer mapping
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
    /// Selection commands are ignored when false
    #[serde(default = "default_true")]
    pub selectable: bool,
    /// Indent/outdent/undo are ignored when false
    #[serde(default = "default_true")]
    pub editable: bool,
}

fn default_indent_unit() -> String {
    "  ".to_string()
}

fn default_tab_width() -> usize {
    TABULATOR_WIDTH
}

fn default_true() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            indent_unit: default_indent_unit(),
            tab_width: default_tab_width(),
            selectable: true,
            editable: true,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if missing or invalid
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::from_path(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Read and validate a config file
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config at {}", path.display()))
    }

    /// Parse and validate YAML config text
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the core would otherwise reject at use time
    pub fn validate(&self) -> Result<(), EditError> {
        validate_indent_unit(&self.indent_unit)
    }

    /// Save config to disk
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.indent_unit, "  ");
        assert_eq!(config.tab_width, 4);
        assert!(config.selectable);
        assert!(config.editable);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = EditorConfig::from_yaml_str("indent_unit: \"\\t\"\n").unwrap();
        assert_eq!(config.indent_unit, "\t");
        assert_eq!(config.tab_width, 4);
        assert!(config.editable);
    }

    #[test]
    fn test_invalid_unit_is_rejected() {
        assert!(EditorConfig::from_yaml_str("indent_unit: \"\"\n").is_err());
        assert!(EditorConfig::from_yaml_str("indent_unit: \"a\\nb\"\n").is_err());
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        assert!(EditorConfig::from_yaml_str("tab_width: [1, 2").is_err());
    }
}
