//! Generation knobs for a single map and for a whole dungeon.

use serde::{Deserialize, Serialize};

use crate::error::{Axis, ConfigIssue, MapError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimensionLimits {
    pub min: usize,
    pub max: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapLimits {
    pub width: DimensionLimits,
    pub height: DimensionLimits,
}

pub const MAP_LIMITS: MapLimits = MapLimits {
    width: DimensionLimits { min: 15, max: 1999 },
    height: DimensionLimits { min: 15, max: 1999 },
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: usize,
    pub height: usize,
    pub min_room_size: usize,
    pub max_room_size: usize,
    pub allow_room_overlap: bool,
    pub num_room_attempts: usize,
    pub cave_width: usize,
    pub cave_height: usize,
    pub num_caves: usize,
    /// Explicit birth rule for the cave automaton. Empty means a random
    /// subset of {6, 7, 8} is drawn for every cavern.
    pub cave_setting: Vec<u8>,
    /// Probability that a cavern cell starts dead.
    pub cave_wall_chance: f64,
    pub num_extra_connectors: usize,
    pub connector_thickness: usize,
    pub straight_tendency: f64,
    pub island_threshold: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 61,
            height: 41,
            min_room_size: 5,
            max_room_size: 11,
            allow_room_overlap: false,
            num_room_attempts: 100,
            cave_width: 24,
            cave_height: 10,
            num_caves: 20,
            cave_setting: Vec::new(),
            cave_wall_chance: 0.35,
            num_extra_connectors: 10,
            connector_thickness: 1,
            straight_tendency: 0.5,
            island_threshold: 15,
        }
    }
}

impl MapConfig {
    pub fn with_size(width: usize, height: usize) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), MapError> {
        validate_dimensions(self.width, self.height)?;
        if self.min_room_size == 0 || self.min_room_size > self.max_room_size {
            return Err(
                ConfigIssue::RoomSizeRange { min: self.min_room_size, max: self.max_room_size }
                    .into(),
            );
        }
        if self.cave_width == 0 || self.cave_height == 0 {
            return Err(ConfigIssue::ZeroCaveDimension {
                width: self.cave_width,
                height: self.cave_height,
            }
            .into());
        }
        if self.connector_thickness == 0 {
            return Err(ConfigIssue::ZeroConnectorThickness.into());
        }
        check_probability("straight_tendency", self.straight_tendency)?;
        check_probability("cave_wall_chance", self.cave_wall_chance)?;
        if let Some(&value) = self.cave_setting.iter().find(|&&value| value > 8) {
            return Err(ConfigIssue::CaveSettingOutOfRange(value).into());
        }
        Ok(())
    }
}

pub fn validate_dimensions(width: usize, height: usize) -> Result<(), MapError> {
    check_dimension(Axis::Width, width, MAP_LIMITS.width)?;
    check_dimension(Axis::Height, height, MAP_LIMITS.height)
}

fn check_dimension(axis: Axis, value: usize, limits: DimensionLimits) -> Result<(), MapError> {
    if value < limits.min || value > limits.max {
        return Err(ConfigIssue::DimensionOutOfRange {
            axis,
            value,
            min: limits.min,
            max: limits.max,
        }
        .into());
    }
    if value % 2 == 0 {
        return Err(ConfigIssue::EvenDimension { axis, value }.into());
    }
    Ok(())
}

fn check_probability(field: &'static str, value: f64) -> Result<(), MapError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigIssue::ProbabilityOutOfRange { field, value }.into());
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeLevelConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for HomeLevelConfig {
    fn default() -> Self {
        Self { width: 41, height: 21 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub map: MapConfig,
    pub home: HomeLevelConfig,
    pub max_generation_attempts: u32,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            home: HomeLevelConfig::default(),
            max_generation_attempts: 100,
        }
    }
}
