//! High-level map generation orchestration over a single grid.

use log::debug;

use crate::config::MapConfig;
use crate::error::MapError;
use crate::grid::Grid;
use crate::rng::DungeonRng;
use crate::types::Tile;

use super::caves::{self, CaveSettings};
use super::cleanup;
use super::connectivity::{self, ConnectReport};
use super::maze;
use super::model::GenerationSummary;
use super::rooms::{self, Room, RoomPlacement, RoomSizeRange};

/// Owns one grid and the rooms placed on it. Every stage borrows the caller's
/// [`DungeonRng`], so several generators can share one seeded stream.
#[derive(Clone, Debug)]
pub struct MapGenerator {
    config: MapConfig,
    grid: Grid,
    rooms: Vec<Room>,
}

impl MapGenerator {
    pub fn new(config: MapConfig) -> Result<Self, MapError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;
        Ok(Self { config, grid, rooms: Vec::new() })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Runs the full pipeline. Stage order matters: connectivity repair
    /// expects the maze to have claimed all remaining rock, and the dead-end
    /// and island passes expect a single floor component.
    pub fn generate(&mut self, rng: &mut DungeonRng) -> GenerationSummary {
        let mut summary = GenerationSummary::default();

        self.fill();
        summary.rooms = self.generate_rooms(rng, self.config.num_room_attempts);
        summary.caverns = self.generate_caves(rng, self.config.num_caves);
        summary.maze_regions = self.generate_maze(rng);
        self.fix_temporary_walls();
        summary.record_connectivity(self.connect_components(rng));
        summary.extra_connectors = self.add_extra_connectors(rng);
        while self.kill_dead_ends() {
            summary.dead_end_sweeps += 1;
        }
        summary.islands_removed = self.kill_islands(self.config.island_threshold);
        self.fill_border(false);

        debug_assert!(
            !self.grid.tiles().iter().any(|tile| tile.is_scratch()),
            "scratch markers left behind after generation"
        );
        summary.floor_tiles = self.grid.count(Tile::Floor);
        debug!("generated {}x{} map: {summary:?}", self.grid.width(), self.grid.height());
        summary
    }

    pub fn fill(&mut self) {
        self.grid.fill();
    }

    /// Returns how many rooms were placed.
    pub fn generate_rooms(&mut self, rng: &mut DungeonRng, attempts: usize) -> usize {
        let mut placement = RoomPlacement {
            grid: &mut self.grid,
            rooms: &mut self.rooms,
            size: RoomSizeRange { min: self.config.min_room_size, max: self.config.max_room_size },
            allow_overlap: self.config.allow_room_overlap,
        };
        rooms::generate_rooms(&mut placement, rng, attempts);
        self.rooms.len()
    }

    /// Returns how many caverns were stamped.
    pub fn generate_caves(&mut self, rng: &mut DungeonRng, count: usize) -> usize {
        let settings = CaveSettings {
            width: self.config.cave_width,
            height: self.config.cave_height,
            wall_chance: self.config.cave_wall_chance,
            birth_setting: &self.config.cave_setting,
        };
        caves::generate_caves(&mut self.grid, rng, &settings, count)
    }

    /// Returns how many disjoint maze regions were carved.
    pub fn generate_maze(&mut self, rng: &mut DungeonRng) -> usize {
        maze::generate_maze(&mut self.grid, rng, self.config.straight_tendency)
    }

    pub fn fix_temporary_walls(&mut self) {
        caves::fix_temporary_walls(&mut self.grid);
    }

    pub fn connect_components(&mut self, rng: &mut DungeonRng) -> ConnectReport {
        connectivity::connect_components(&mut self.grid, rng)
    }

    pub fn add_extra_connectors(&mut self, rng: &mut DungeonRng) -> usize {
        connectivity::add_extra_connectors(
            &mut self.grid,
            rng,
            self.config.num_extra_connectors,
            self.config.connector_thickness,
        )
    }

    pub fn kill_dead_ends(&mut self) -> bool {
        cleanup::kill_dead_ends(&mut self.grid)
    }

    pub fn kill_islands(&mut self, max_size: usize) -> usize {
        cleanup::kill_islands(&mut self.grid, max_size)
    }

    pub fn fill_border(&mut self, fill_floor_interior: bool) {
        self.grid.fill_border(fill_floor_interior);
    }
}
