//! Error types for map construction and multi-level dungeon generation.

use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigIssue {
    #[error("map {axis} must be odd, got {value}")]
    EvenDimension { axis: Axis, value: usize },
    #[error("map {axis} must be within {min}..{max}, got {value}")]
    DimensionOutOfRange { axis: Axis, value: usize, min: usize, max: usize },
    #[error("room sizes must satisfy 1 <= min <= max, got min={min} max={max}")]
    RoomSizeRange { min: usize, max: usize },
    #[error("cave dimensions must be non-zero, got {width}x{height}")]
    ZeroCaveDimension { width: usize, height: usize },
    #[error("connector thickness must be at least 1")]
    ZeroConnectorThickness,
    #[error("{field} must be within 0..=1, got {value}")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },
    #[error("cave birth rule entry {0} is not a valid neighbour count")]
    CaveSettingOutOfRange(u8),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum MapError {
    #[error("invalid map configuration: {0}")]
    InvalidMapConfiguration(#[from] ConfigIssue),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum DungeonError {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error("could not place {purpose} because level {level} has no floor tiles")]
    NoFloorTile { level: u32, purpose: &'static str },
    #[error("level {level} did not line up with its staircases after {attempts} attempts")]
    GenerationExhausted { level: u32, attempts: u32 },
    #[error("level {0} has not been generated")]
    MissingLevel(u32),
}
