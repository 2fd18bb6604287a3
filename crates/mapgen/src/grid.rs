//! Dense tile buffer with a parallel fog-of-war buffer and the tile-space
//! queries shared by every generation stage.

use xxhash_rust::xxh3::xxh3_64;

use crate::config::{HomeLevelConfig, validate_dimensions};
use crate::error::MapError;
use crate::rng::DungeonRng;
use crate::types::{DIRECTIONS, Pos, SeenStatus, Tile, is_floor_tile};

/// Number of random probes `random_floor_tile` makes before giving up.
pub const RANDOM_FLOOR_ATTEMPTS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    seen: Vec<SeenStatus>,
}

impl Grid {
    /// Creates an unset grid. Both dimensions must be odd and inside `MAP_LIMITS`.
    pub fn new(width: usize, height: usize) -> Result<Self, MapError> {
        validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            tiles: vec![Tile::Nothing; width * height],
            seen: vec![SeenStatus::Unseen; width * height],
        })
    }

    /// Surface level: an open walled field that the player already knows.
    pub fn home_level(config: &HomeLevelConfig) -> Result<Self, MapError> {
        let mut grid = Self::new(config.width, config.height)?;
        grid.fill_border(true);
        grid.seen.fill(SeenStatus::Seen);
        Ok(grid)
    }

    /// Parses rows drawn with the [`Grid::to_ascii`] alphabet. Short rows are
    /// padded with `Nothing`.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, MapError> {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, rows.len())?;
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                grid.set(x as i32, y as i32, tile_from_glyph(glyph));
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| (y as usize) * self.width + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map_or(Tile::Nothing, |index| self.tiles[index])
    }

    pub fn get_pos(&self, pos: Pos) -> Tile {
        self.get(pos.x, pos.y)
    }

    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(index) = self.index(x, y) {
            self.tiles[index] = tile;
        }
    }

    pub fn set_pos(&mut self, pos: Pos, tile: Tile) {
        self.set(pos.x, pos.y, tile);
    }

    pub fn get_seen(&self, x: i32, y: i32) -> SeenStatus {
        self.index(x, y).map_or(SeenStatus::Unseen, |index| self.seen[index])
    }

    pub fn set_seen(&mut self, x: i32, y: i32, status: SeenStatus) {
        if let Some(index) = self.index(x, y) {
            self.seen[index] = status;
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn fill(&mut self) {
        self.tiles.fill(Tile::Wall);
    }

    /// Walls off the outer ring. With `fill_floor_interior` everything inside
    /// the ring becomes floor; otherwise the interior is left untouched.
    pub fn fill_border(&mut self, fill_floor_interior: bool) {
        for y in 0..self.height {
            for x in 0..self.width {
                let on_border =
                    x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1;
                if on_border {
                    self.tiles[y * self.width + x] = Tile::Wall;
                } else if fill_floor_interior {
                    self.tiles[y * self.width + x] = Tile::Floor;
                }
            }
        }
    }

    /// Replaces every occurrence of `from` with `to`.
    pub(crate) fn replace_all(&mut self, from: Tile, to: Tile) {
        for tile in self.tiles.iter_mut().filter(|tile| **tile == from) {
            *tile = to;
        }
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&candidate| candidate == tile).count()
    }

    pub(crate) fn count_interior(&self, tile: Tile) -> usize {
        let mut count = 0;
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                if self.tiles[y * self.width + x] == tile {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn positions_of(&self, tile: Tile) -> impl Iterator<Item = Pos> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, candidate)| **candidate == tile)
            .map(move |(index, _)| Pos { y: (index / width) as i32, x: (index % width) as i32 })
    }

    /// 4-connected fill of the region containing `(x, y)` with `new_tile`.
    /// Returns how many cells actually changed.
    pub fn flood_fill(&mut self, x: i32, y: i32, new_tile: Tile) -> usize {
        let old_tile = self.get(x, y);
        if !self.in_bounds(x, y) || old_tile == new_tile {
            return 0;
        }

        let mut changed = 0;
        let mut stack = vec![Pos::new(x, y)];
        while let Some(pos) = stack.pop() {
            if !self.in_bounds(pos.x, pos.y) || self.get_pos(pos) != old_tile {
                continue;
            }
            self.set_pos(pos, new_tile);
            changed += 1;
            for direction in DIRECTIONS {
                let next = pos.step(direction, 1);
                if self.get_pos(next) == old_tile {
                    stack.push(next);
                }
            }
        }
        changed
    }

    /// Number of cardinal neighbours of `(x, y)` equal to `tile`.
    pub fn count_tiles_around(&self, x: i32, y: i32, tile: Tile) -> usize {
        DIRECTIONS
            .iter()
            .filter(|&&direction| self.get_pos(Pos::new(x, y).step(direction, 1)) == tile)
            .count()
    }

    /// True when the opposite neighbours of `(x, y)` on either axis are one
    /// each of `from` and `to`.
    pub fn is_connector(&self, x: i32, y: i32, from: Tile, to: Tile) -> bool {
        let joins = |a: Tile, b: Tile| (a == from && b == to) || (a == to && b == from);
        joins(self.get(x, y + 1), self.get(x, y - 1))
            || joins(self.get(x + 1, y), self.get(x - 1, y))
    }

    /// Interior wall cells that separate a `from` tile from a `to` tile.
    /// Scanned column by column.
    pub fn connectors(&self, from: Tile, to: Tile) -> Vec<Pos> {
        let mut connectors = Vec::new();
        for x in 1..(self.width as i32 - 1) {
            for y in 1..(self.height as i32 - 1) {
                if self.get(x, y) == Tile::Wall && self.is_connector(x, y, from, to) {
                    connectors.push(Pos::new(x, y));
                }
            }
        }
        connectors
    }

    /// Probes random interior cells for a floor tile not listed in `exclude`.
    /// Returns `None` once the probe budget is spent.
    pub fn random_floor_tile(&self, rng: &mut DungeonRng, exclude: &[Pos]) -> Option<Pos> {
        for _ in 0..RANDOM_FLOOR_ATTEMPTS {
            let pos = Pos::new(
                rng.next_int(1, self.width as i32),
                rng.next_int(1, self.height as i32),
            );
            if exclude.contains(&pos) {
                continue;
            }
            if is_floor_tile(self.get_pos(pos)) {
                return Some(pos);
            }
        }
        None
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.tiles.len());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.tiles.iter().map(|tile| tile.code()));
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    pub fn to_ascii(&self) -> String {
        self.ascii_rows().join("\n")
    }

    pub fn ascii_rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width)
            .map(|row| row.iter().map(|&tile| glyph(tile)).collect())
            .collect()
    }
}

pub fn glyph(tile: Tile) -> char {
    match tile {
        Tile::Nothing => ' ',
        Tile::Floor => '.',
        Tile::Wall => '#',
        Tile::ScratchA => 'a',
        Tile::ScratchB => 'b',
        Tile::Door => '+',
    }
}

fn tile_from_glyph(glyph: char) -> Tile {
    match glyph {
        '.' => Tile::Floor,
        '#' => Tile::Wall,
        'a' => Tile::ScratchA,
        'b' => Tile::ScratchB,
        '+' => Tile::Door,
        _ => Tile::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Axis, ConfigIssue};

    fn walled(width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height).expect("valid dimensions");
        grid.fill();
        grid
    }

    #[test]
    fn out_of_bounds_reads_are_nothing_and_writes_are_ignored() {
        let mut grid = walled(15, 15);
        assert_eq!(grid.get(-1, 0), Tile::Nothing);
        assert_eq!(grid.get(15, 3), Tile::Nothing);
        assert_eq!(grid.get(3, 15), Tile::Nothing);
        assert_eq!(grid.get_seen(-1, -1), SeenStatus::Unseen);

        let before = grid.clone();
        grid.set(15, 0, Tile::Floor);
        grid.set(-3, 2, Tile::Floor);
        grid.set_seen(0, 99, SeenStatus::Mapped);
        assert_eq!(grid, before);
    }

    #[test]
    fn seen_buffer_is_independent_of_tiles() {
        let mut grid = walled(15, 15);
        grid.set_seen(4, 5, SeenStatus::Mapped);
        assert_eq!(grid.get_seen(4, 5), SeenStatus::Mapped);
        assert_eq!(grid.get(4, 5), Tile::Wall);
        assert_eq!(grid.get_seen(5, 4), SeenStatus::Unseen);
    }

    #[test]
    fn construction_rejects_even_and_out_of_range_dimensions() {
        assert!(Grid::new(15, 15).is_ok());
        assert_eq!(
            Grid::new(16, 15).expect_err("even width"),
            MapError::InvalidMapConfiguration(ConfigIssue::EvenDimension {
                axis: Axis::Width,
                value: 16
            })
        );
        assert!(Grid::new(14, 15).is_err());
        assert!(Grid::new(2000, 15).is_err());
        assert!(Grid::new(15, 0).is_err());
    }

    #[test]
    fn fill_border_optionally_floods_interior() {
        let mut grid = walled(15, 17);
        grid.set(7, 7, Tile::Door);
        grid.fill_border(false);
        assert_eq!(grid.get(7, 7), Tile::Door);
        assert_eq!(grid.get(3, 3), Tile::Wall);

        grid.fill_border(true);
        assert_eq!(grid.get(7, 7), Tile::Floor);
        for x in 0..15 {
            assert_eq!(grid.get(x, 0), Tile::Wall);
            assert_eq!(grid.get(x, 16), Tile::Wall);
        }
        for y in 0..17 {
            assert_eq!(grid.get(0, y), Tile::Wall);
            assert_eq!(grid.get(14, y), Tile::Wall);
        }
        assert_eq!(grid.count(Tile::Floor), 13 * 15);
    }

    #[test]
    fn home_level_is_open_and_fully_seen() {
        let grid = Grid::home_level(&HomeLevelConfig::default()).expect("home level");
        assert_eq!((grid.width(), grid.height()), (41, 21));
        assert_eq!(grid.count(Tile::Floor), 39 * 19);
        assert_eq!(grid.get(0, 10), Tile::Wall);
        assert_eq!(grid.get_seen(0, 0), SeenStatus::Seen);
        assert_eq!(grid.get_seen(20, 10), SeenStatus::Seen);
        assert!(Grid::home_level(&HomeLevelConfig { width: 40, height: 21 }).is_err());
    }

    #[test]
    fn flood_fill_counts_each_converted_cell_once() {
        let mut grid = walled(15, 15);
        for x in 2..7 {
            grid.set(x, 3, Tile::ScratchA);
        }
        for y in 3..6 {
            grid.set(6, y, Tile::ScratchA);
        }
        grid.set(10, 10, Tile::ScratchA);

        assert_eq!(grid.flood_fill(2, 3, Tile::Floor), 7);
        assert_eq!(grid.get(6, 5), Tile::Floor);
        assert_eq!(grid.get(10, 10), Tile::ScratchA, "disjoint region must be untouched");
        assert_eq!(grid.flood_fill(2, 3, Tile::Floor), 0);
        assert_eq!(grid.flood_fill(-1, 3, Tile::Floor), 0);
    }

    #[test]
    fn connectors_require_opposite_neighbours() {
        let mut grid = walled(15, 15);
        grid.set(3, 5, Tile::Floor);
        grid.set(5, 5, Tile::ScratchA);
        grid.set(7, 7, Tile::Floor);
        grid.set(8, 8, Tile::ScratchA);

        assert!(grid.is_connector(4, 5, Tile::ScratchA, Tile::Floor));
        assert!(grid.is_connector(4, 5, Tile::Floor, Tile::ScratchA));
        assert!(
            !grid.is_connector(7, 8, Tile::ScratchA, Tile::Floor),
            "diagonal is not a connector"
        );
        assert_eq!(grid.connectors(Tile::ScratchA, Tile::Floor), vec![Pos::new(4, 5)]);
    }

    #[test]
    fn random_floor_tile_reports_failure_on_solid_rock() {
        let grid = walled(15, 15);
        let mut rng = DungeonRng::new(5);
        assert_eq!(grid.random_floor_tile(&mut rng, &[]), None);
    }

    #[test]
    fn random_floor_tile_respects_exclusions() {
        let mut grid = walled(15, 15);
        grid.fill_border(true);
        let mut rng = DungeonRng::new(17);
        let first = grid.random_floor_tile(&mut rng, &[]).expect("open level has floor");
        assert_eq!(grid.get_pos(first), Tile::Floor);

        let mut exclude: Vec<Pos> = grid.positions_of(Tile::Floor).collect();
        let keep = exclude.pop().expect("at least one floor tile");
        for _ in 0..5 {
            if let Some(pos) = grid.random_floor_tile(&mut rng, &exclude) {
                assert_eq!(pos, keep);
            }
        }
    }

    #[test]
    fn ascii_round_trip_preserves_tiles() {
        let mut grid = walled(15, 15);
        grid.fill_border(true);
        grid.set(3, 4, Tile::Door);
        grid.set(5, 6, Tile::ScratchB);
        let rows = grid.ascii_rows();
        let parsed =
            Grid::from_ascii(&rows.iter().map(String::as_str).collect::<Vec<_>>()).expect("parse");
        assert_eq!(parsed, grid);
        assert_eq!(parsed.fingerprint(), grid.fingerprint());
    }
}
