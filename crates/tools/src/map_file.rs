use mapgen::Grid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

pub const MAP_FILE_FORMAT_VERSION: u32 = 1;

pub fn fingerprint_hex(fingerprint: u64) -> String {
    format!("0x{fingerprint:016x}")
}

/// JSON export of one generated level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MapFile {
    pub format_version: u32,
    pub seed: u64,
    pub level: u32,
    pub width: usize,
    pub height: usize,
    pub fingerprint_hex: String,
    pub rows: Vec<String>,
}

impl MapFile {
    pub fn new(seed: u64, level: u32, grid: &Grid, rows: Vec<String>) -> Self {
        Self {
            format_version: MAP_FILE_FORMAT_VERSION,
            seed,
            level,
            width: grid.width(),
            height: grid.height(),
            fingerprint_hex: fingerprint_hex(grid.fingerprint()),
            rows,
        }
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let map: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapgen::{MapConfig, generate_map};
    use tempfile::tempdir;

    #[test]
    fn test_fingerprint_is_zero_padded() {
        assert_eq!(fingerprint_hex(0xdead_beef), "0x00000000deadbeef");
        assert_eq!(fingerprint_hex(u64::MAX), "0xffffffffffffffff");
    }

    #[test]
    fn test_atomic_write_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exports").join("map.json");

        let grid = generate_map(MapConfig::with_size(31, 21), 7).unwrap();
        let map = MapFile::new(7, 0, &grid, grid.ascii_rows());

        map.write_atomic(&path).unwrap();
        assert!(path.exists());

        let loaded = MapFile::load(&path).unwrap();
        assert_eq!(map, loaded);
        assert_eq!(loaded.rows.len(), 21);
        assert!(loaded.rows.iter().all(|row| row.chars().count() == 31));

        // Verify tmp file is gone
        let tmp_path = path.with_extension("json.tmp");
        assert!(!tmp_path.exists());
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.json");
        fs::write(&path, "{ not json").unwrap();
        let error = MapFile::load(&path).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }
}
