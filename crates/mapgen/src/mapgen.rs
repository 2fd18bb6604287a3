//! Procedural map generation split into one submodule per pipeline stage.

pub mod automaton;
pub mod model;

mod caves;
mod cleanup;
mod connectivity;
mod generator;
mod maze;
mod rooms;

pub use automaton::{CellBoard, CellularRule};
pub use caves::{CAVE_STEPS, CAVE_SURVIVE};
pub use connectivity::ConnectReport;
pub use generator::MapGenerator;
pub use model::GenerationSummary;
pub use rooms::Room;

use crate::config::MapConfig;
use crate::error::MapError;
use crate::grid::Grid;
use crate::rng::DungeonRng;

/// Generates one map from a fresh stream seeded with `seed`.
pub fn generate_map(config: MapConfig, seed: u64) -> Result<Grid, MapError> {
    let mut generator = MapGenerator::new(config)?;
    generator.generate(&mut DungeonRng::new(seed));
    Ok(generator.into_grid())
}
