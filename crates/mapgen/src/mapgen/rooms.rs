//! Random rectangular room placement on the stride-2 lattice.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::rng::DungeonRng;
use crate::types::Tile;

/// Axis-aligned room. Corners and extents are even so the interior lines up
/// with the maze lattice; the walls sit on the even rows and columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open interval overlap on both axes.
    pub fn overlaps(&self, other: &Room) -> bool {
        if self.x + self.w <= other.x || other.x + other.w <= self.x {
            return false;
        }
        !(self.y >= other.y + other.h || other.y >= self.y + self.h)
    }

    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.x >= 0
            && self.y >= 0
            && ((self.x + self.w) as usize) < width
            && ((self.y + self.h) as usize) < height
    }

    fn random(rng: &mut DungeonRng, width: usize, height: usize, size: RoomSizeRange) -> Self {
        let x = rng.next_int(0, ((width - 1) / 2) as i32) * 2;
        let y = rng.next_int(0, ((height - 1) / 2) as i32) * 2;
        let w = rng.next_int(size.min_half(), size.max_half()) * 2;
        let h = rng.next_int(size.min_half(), size.max_half()) * 2;
        Self { x, y, w, h }
    }

    /// Walls the outline and marks the inside as pending floor.
    fn draw_on(&self, grid: &mut Grid) {
        for x in self.x..=self.x + self.w {
            for y in self.y..=self.y + self.h {
                let on_edge =
                    x == self.x || y == self.y || x == self.x + self.w || y == self.y + self.h;
                grid.set(x, y, if on_edge { Tile::Wall } else { Tile::ScratchA });
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct RoomSizeRange {
    pub(super) min: usize,
    pub(super) max: usize,
}

impl RoomSizeRange {
    fn min_half(self) -> i32 {
        ((self.min - 1) / 2) as i32
    }

    fn max_half(self) -> i32 {
        ((self.max + 1) / 2) as i32
    }
}

pub(super) struct RoomPlacement<'a> {
    pub(super) grid: &'a mut Grid,
    pub(super) rooms: &'a mut Vec<Room>,
    pub(super) size: RoomSizeRange,
    pub(super) allow_overlap: bool,
}

/// Tries `attempts` random rooms and keeps the ones that fit. The room list
/// is reset first.
pub(super) fn generate_rooms(
    placement: &mut RoomPlacement<'_>,
    rng: &mut DungeonRng,
    attempts: usize,
) {
    placement.rooms.clear();
    let width = placement.grid.width();
    let height = placement.grid.height();

    for _ in 0..attempts {
        let room = Room::random(rng, width, height, placement.size);
        if !room.fits_within(width, height) {
            continue;
        }
        if !placement.allow_overlap && placement.rooms.iter().any(|other| room.overlaps(other)) {
            continue;
        }
        trace!("placing room {room:?}");
        room.draw_on(placement.grid);
        placement.rooms.push(room);
    }

    debug!("placed {} rooms from {attempts} attempts", placement.rooms.len());
}
