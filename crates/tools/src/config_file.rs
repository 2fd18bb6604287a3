//! TOML configuration loading for the map generator CLI.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mapgen::DungeonConfig;

/// Reads a TOML file whose tables mirror [`DungeonConfig`]. Missing tables
/// and fields fall back to their defaults.
pub fn load_dungeon_config(path: &Path) -> Result<DungeonConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: DungeonConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}
