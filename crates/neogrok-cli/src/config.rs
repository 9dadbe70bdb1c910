//! Preferences file loading.
//!
//! ```toml
//! match_sort_order = "score"
//! file_matches_cutoff = 10
//! ```

use anyhow::{Context, Result};
use neogrok_core::{Preferences, RawPreferences};
use std::path::Path;

pub fn load_preferences(path: &Path) -> Result<Preferences> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read preferences file: {}", path.display()))?;
    parse_preferences(&content)
        .with_context(|| format!("Invalid preferences file: {}", path.display()))
}

pub fn parse_preferences(content: &str) -> Result<Preferences> {
    let raw: RawPreferences =
        toml::from_str(content).with_context(|| "Failed to parse preferences")?;
    Ok(Preferences::try_from(raw)?)
}
