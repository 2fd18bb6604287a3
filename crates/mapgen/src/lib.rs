pub mod config;
pub mod dungeon;
pub mod error;
pub mod grid;
pub mod mapgen;
pub mod rng;
pub mod types;

pub use config::{DungeonConfig, HomeLevelConfig, MAP_LIMITS, MapConfig};
pub use dungeon::{Dungeon, DungeonLevel};
pub use error::{ConfigIssue, DungeonError, MapError};
pub use grid::Grid;
pub use mapgen::{GenerationSummary, MapGenerator, Room, generate_map};
pub use rng::DungeonRng;
pub use types::*;
