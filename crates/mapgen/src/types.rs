use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn step(self, direction: Direction, distance: i32) -> Self {
        let delta = direction.delta();
        Self { y: self.y + delta.y * distance, x: self.x + delta.x * distance }
    }
}

/// Terrain kind of a single cell.
///
/// `ScratchA` and `ScratchB` only exist while a map is being generated.
/// `ScratchA` marks cells that will become floor once they are proven
/// reachable; `ScratchB` marks cave exterior that must end up as wall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Nothing,
    Floor,
    Wall,
    ScratchA,
    ScratchB,
    Door,
}

impl Tile {
    pub fn is_scratch(self) -> bool {
        matches!(self, Tile::ScratchA | Tile::ScratchB)
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            Tile::Nothing => 0,
            Tile::Floor => 1,
            Tile::Wall => 2,
            Tile::ScratchA => 3,
            Tile::ScratchB => 4,
            Tile::Door => 5,
        }
    }
}

/// Fog-of-war state, tracked independently from the tile itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeenStatus {
    #[default]
    Unseen,
    Seen,
    Mapped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

pub const DIRECTIONS: [Direction; 4] =
    [Direction::North, Direction::East, Direction::South, Direction::West];

impl Direction {
    pub fn delta(self) -> Pos {
        match self {
            Direction::North => Pos { y: -1, x: 0 },
            Direction::East => Pos { y: 0, x: 1 },
            Direction::South => Pos { y: 1, x: 0 },
            Direction::West => Pos { y: 0, x: -1 },
        }
    }
}

/// True for tiles an actor can stand on.
pub fn is_floor_tile(tile: Tile) -> bool {
    tile == Tile::Floor
}
