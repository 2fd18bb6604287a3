use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mapgen::{Dungeon, DungeonConfig, DungeonRng, MapConfig, MapGenerator};
use std::path::{Path, PathBuf};

mod config_file;
mod map_file;

use config_file::load_dungeon_config;
use map_file::{MapFile, fingerprint_hex};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// TOML file with `[map]` and `[home]` tables
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overrides the map width (must be odd)
    #[arg(long)]
    width: Option<usize>,
    /// Overrides the map height (must be odd)
    #[arg(long)]
    height: Option<usize>,
    /// Generate a dungeon down to this level instead of a single map
    #[arg(short, long)]
    levels: Option<u32>,
    /// Export the deepest generated map as JSON
    #[arg(long)]
    json: Option<PathBuf>,
    /// Print a previously exported map instead of generating one
    #[arg(long, conflicts_with_all = ["config", "levels", "json"])]
    load: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(path) = &args.load {
        return print_saved(path);
    }

    let mut config = match &args.config {
        Some(path) => load_dungeon_config(path)?,
        None => DungeonConfig::default(),
    };
    if let Some(width) = args.width {
        config.map.width = width;
    }
    if let Some(height) = args.height {
        config.map.height = height;
    }

    let export = match args.levels {
        Some(depth) => print_dungeon(config, args.seed, depth)?,
        None => print_map(config.map, args.seed)?,
    };

    if let Some(path) = &args.json {
        export
            .write_atomic(path)
            .with_context(|| format!("Failed to write map file: {}", path.display()))?;
        info!("wrote level {} to {}", export.level, path.display());
    }

    Ok(())
}

fn print_map(config: MapConfig, seed: u64) -> Result<MapFile> {
    let mut generator = MapGenerator::new(config).context("Invalid map configuration")?;
    let summary = generator.generate(&mut DungeonRng::new(seed));
    let grid = generator.grid();

    println!("{}", grid.to_ascii());
    println!("Seed: {seed}");
    println!("Fingerprint: {}", fingerprint_hex(grid.fingerprint()));
    println!(
        "Rooms: {}  Caverns: {}  Floor tiles: {}",
        summary.rooms, summary.caverns, summary.floor_tiles
    );

    Ok(MapFile::new(seed, 0, grid, grid.ascii_rows()))
}

fn print_dungeon(config: DungeonConfig, seed: u64, depth: u32) -> Result<MapFile> {
    let mut dungeon = Dungeon::new(config, seed).context("Failed to build home level")?;
    dungeon
        .descend_to(depth)
        .with_context(|| format!("Failed to generate dungeon down to level {depth}"))?;

    for level in dungeon.levels() {
        println!("Level {} ({} attempts)", level.index, level.attempts);
        println!("{}", level.to_ascii());
        println!("Fingerprint: {}", fingerprint_hex(level.grid.fingerprint()));
        println!();
    }
    println!("Seed: {seed}");

    let deepest = dungeon.level(depth)?;
    let rows = deepest.to_ascii().lines().map(str::to_owned).collect();
    Ok(MapFile::new(seed, depth, &deepest.grid, rows))
}

fn print_saved(path: &Path) -> Result<()> {
    let saved = MapFile::load(path)
        .with_context(|| format!("Failed to load map file: {}", path.display()))?;

    println!("{}", saved.rows.join("\n"));
    println!("Seed: {}  Level: {}", saved.seed, saved.level);
    println!("Fingerprint: {}", saved.fingerprint_hex);
    Ok(())
}
