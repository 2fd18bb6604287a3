//! Organic cavern blobs grown with a cellular automaton and stamped into the map.

use log::{debug, trace};

use crate::grid::Grid;
use crate::rng::DungeonRng;
use crate::types::Tile;

use super::automaton::{CellBoard, CellularRule};

pub const CAVE_STEPS: usize = 5;
pub const CAVE_SURVIVE: [u8; 5] = [4, 5, 6, 7, 8];
const DEFAULT_CAVE_BIRTH: [u8; 3] = [6, 7, 8];

#[derive(Clone, Debug, PartialEq)]
pub(super) struct CaveSettings<'a> {
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) wall_chance: f64,
    pub(super) birth_setting: &'a [u8],
}

/// Birth rule for one cavern. An explicit setting is used as is; otherwise
/// each of 6, 7 and 8 is included with even odds, falling back to all three.
pub(super) fn cave_birth_rule(rng: &mut DungeonRng, birth_setting: &[u8]) -> Vec<u8> {
    if !birth_setting.is_empty() {
        return birth_setting.to_vec();
    }
    let birth: Vec<u8> = DEFAULT_CAVE_BIRTH.into_iter().filter(|_| rng.chance(0.5)).collect();
    if birth.is_empty() { DEFAULT_CAVE_BIRTH.to_vec() } else { birth }
}

pub(super) fn generate_cavern(rng: &mut DungeonRng, settings: &CaveSettings<'_>) -> CellBoard {
    let mut board = CellBoard::from_fn(settings.width, settings.height, |_, _| {
        !rng.chance(settings.wall_chance)
    });
    let rule = CellularRule {
        birth: cave_birth_rule(rng, settings.birth_setting),
        survive: CAVE_SURVIVE.to_vec(),
    };
    trace!("cavern birth rule {:?}", rule.birth);
    board.run(&rule, CAVE_STEPS);
    board
}

/// Stamps `count` caverns at random odd offsets. Live cells become pending
/// floor and dead cells become `ScratchB` so the maze cannot thread between
/// them. Caverns too large for the interior are skipped.
pub(super) fn generate_caves(
    grid: &mut Grid,
    rng: &mut DungeonRng,
    settings: &CaveSettings<'_>,
    count: usize,
) -> usize {
    let span_x = (grid.width() as i32 - settings.width as i32) / 2;
    let span_y = (grid.height() as i32 - settings.height as i32) / 2;
    if count > 0 && (span_x < 2 || span_y < 2) {
        debug!(
            "{}x{} caverns do not fit a {}x{} map, skipping",
            settings.width,
            settings.height,
            grid.width(),
            grid.height()
        );
        return 0;
    }

    for _ in 0..count {
        let cavern = generate_cavern(rng, settings);
        let offset_x = rng.next_int(1, span_x) * 2 + 1;
        let offset_y = rng.next_int(1, span_y) * 2 + 1;
        for cy in 0..cavern.height() {
            for cx in 0..cavern.width() {
                let tile = if cavern.is_alive(cx as i64, cy as i64) {
                    Tile::ScratchA
                } else {
                    Tile::ScratchB
                };
                grid.set(offset_x + cx as i32, offset_y + cy as i32, tile);
            }
        }
    }

    debug!("stamped {count} caverns");
    count
}

/// Turns every cave-exterior marker into solid wall.
pub(super) fn fix_temporary_walls(grid: &mut Grid) {
    grid.replace_all(Tile::ScratchB, Tile::Wall);
}
