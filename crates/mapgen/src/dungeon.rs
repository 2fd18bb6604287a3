//! Multi-level dungeon built lazily from one seeded stream.
//!
//! Level 0 is the open home level. Every deeper level is a generated map whose
//! up staircase sits exactly where the level above put its down staircase, so
//! walking between levels never lands the player inside rock. A level is
//! regenerated until that cell comes out as floor, up to
//! [`DungeonConfig::max_generation_attempts`] times.

use log::{debug, trace};

use crate::config::DungeonConfig;
use crate::error::DungeonError;
use crate::grid::Grid;
use crate::mapgen::{GenerationSummary, MapGenerator};
use crate::rng::DungeonRng;
use crate::types::{Pos, is_floor_tile};

#[derive(Clone, Debug, PartialEq)]
pub struct DungeonLevel {
    pub index: u32,
    pub grid: Grid,
    /// `None` on the home level.
    pub up_stairs: Option<Pos>,
    pub down_stairs: Pos,
    /// How many full generation runs it took to line up the staircases.
    pub attempts: u32,
    /// `None` on the home level.
    pub summary: Option<GenerationSummary>,
}

impl DungeonLevel {
    /// ASCII rendering with `<` and `>` drawn over the staircases.
    pub fn to_ascii(&self) -> String {
        let mut rows: Vec<Vec<char>> =
            self.grid.ascii_rows().into_iter().map(|row| row.chars().collect()).collect();
        let up = self.up_stairs.map(|pos| (pos, '<'));
        for (pos, glyph) in up.into_iter().chain([(self.down_stairs, '>')]) {
            if let Some(cell) =
                rows.get_mut(pos.y as usize).and_then(|row| row.get_mut(pos.x as usize))
            {
                *cell = glyph;
            }
        }
        rows.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Clone, Debug)]
pub struct Dungeon {
    config: DungeonConfig,
    rng: DungeonRng,
    levels: Vec<DungeonLevel>,
}

impl Dungeon {
    /// Validates the level configuration and builds the home level.
    pub fn new(config: DungeonConfig, seed: u64) -> Result<Self, DungeonError> {
        config.map.validate()?;
        let mut rng = DungeonRng::new(seed);

        let grid = Grid::home_level(&config.home)?;
        let down_stairs = grid
            .random_floor_tile(&mut rng, &[])
            .ok_or(DungeonError::NoFloorTile { level: 0, purpose: "down staircase" })?;
        debug!("home level down staircase at {down_stairs:?}");

        let home = DungeonLevel {
            index: 0,
            grid,
            up_stairs: None,
            down_stairs,
            attempts: 0,
            summary: None,
        };
        Ok(Self { config, rng, levels: vec![home] })
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Index of the deepest level generated so far.
    pub fn depth(&self) -> u32 {
        self.levels.len().saturating_sub(1) as u32
    }

    pub fn levels(&self) -> &[DungeonLevel] {
        &self.levels
    }

    pub fn level(&self, index: u32) -> Result<&DungeonLevel, DungeonError> {
        self.levels.get(index as usize).ok_or(DungeonError::MissingLevel(index))
    }

    /// Generates every missing level down to `index` and returns it.
    pub fn descend_to(&mut self, index: u32) -> Result<&DungeonLevel, DungeonError> {
        while self.depth() < index {
            let level = self.generate_level(self.depth() + 1)?;
            self.levels.push(level);
        }
        self.level(index)
    }

    fn generate_level(&mut self, index: u32) -> Result<DungeonLevel, DungeonError> {
        let up_stairs = self.level(index - 1)?.down_stairs;
        let mut generator = MapGenerator::new(self.config.map.clone())?;

        let mut attempts = 0;
        let summary = loop {
            if attempts == self.config.max_generation_attempts {
                return Err(DungeonError::GenerationExhausted { level: index, attempts });
            }
            attempts += 1;
            let summary = generator.generate(&mut self.rng);
            if is_floor_tile(generator.grid().get_pos(up_stairs)) {
                break summary;
            }
            trace!("level {index} attempt {attempts} missed the up staircase at {up_stairs:?}");
        };

        let grid = generator.into_grid();
        let down_stairs = grid
            .random_floor_tile(&mut self.rng, &[up_stairs])
            .ok_or(DungeonError::NoFloorTile { level: index, purpose: "down staircase" })?;
        debug!(
            "level {index} ready after {attempts} attempts, stairs {up_stairs:?} -> {down_stairs:?}"
        );

        Ok(DungeonLevel {
            index,
            grid,
            up_stairs: Some(up_stairs),
            down_stairs,
            attempts,
            summary: Some(summary),
        })
    }
}
