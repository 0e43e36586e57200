use crate::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Terminal emulator used when neither the config nor `$TERM` names one.
pub const DEFAULT_TERMINAL: &str = "foot";

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Terminal emulator for `Terminal=true` entries
    #[serde(default)]
    pub terminal: Option<String>,

    #[serde(default = "default_icon_size")]
    pub icon_size: u32,

    #[serde(default = "default_columns")]
    pub columns: u32,

    #[serde(default = "default_spacing")]
    pub spacing: u32,

    /// CSS style sheet for the window
    #[serde(default)]
    pub style: Option<PathBuf>,

    /// Output (monitor) name to display on
    #[serde(default)]
    pub output: Option<String>,
}

fn default_icon_size() -> u32 {
    64
}
fn default_columns() -> u32 {
    6
}
fn default_spacing() -> u32 {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terminal: None,
            icon_size: default_icon_size(),
            columns: default_columns(),
            spacing: default_spacing(),
            style: None,
            output: None,
        }
    }
}

impl Config {
    /// Load config from file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Configured terminal, else one derived from `term` (the `$TERM` value).
    #[must_use]
    pub fn terminal_or(&self, term: Option<&str>) -> String {
        self.terminal
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map_or_else(|| default_terminal(term), str::to_string)
    }
}

/// `$TERM`, unless blank or `linux` (what key-binding daemons often pass), else `foot`.
#[must_use]
pub fn default_terminal(term: Option<&str>) -> String {
    match term.map(str::trim) {
        Some(t) if !t.is_empty() && t != "linux" => t.to_string(),
        _ => DEFAULT_TERMINAL.to_string(),
    }
}
