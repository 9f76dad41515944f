use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User settings from `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Truth tables over more distinct terms than this are refused.
    pub max_table_terms: usize,
    pub true_glyph: String,
    pub false_glyph: String,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_table_terms: 12,
            true_glyph: "𝕋".to_string(),
            false_glyph: "𝔽".to_string(),
            color: true,
        }
    }
}

impl Settings {
    pub fn glyphs(&self) -> (&str, &str) {
        (&self.true_glyph, &self.false_glyph)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    // ~/.folcheck/config.toml (under the user profile on Windows)
    dirs_next::home_dir().map(|h| h.join(".folcheck").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

/// Loads settings from `path`; a missing file (or no path at all) yields defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    if !path.exists() {
        crate::debug_log!("config: {} not found, using defaults", path.display());
        return Ok(Settings::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Read config {}", path.display()))?;
    let settings: Settings = toml::from_str(&text)
        .with_context(|| format!("Parse config {}", path.display()))?;
    crate::debug_log!("config: loaded {}", path.display());
    Ok(settings)
}
