//! Final shaping passes: trimming dead-end corridors and erasing small wall islands.

use log::{debug, trace};

use crate::grid::Grid;
use crate::types::Tile;

/// One in-place sweep over the interior, column by column. Every floor cell
/// with exactly three cardinal wall neighbours becomes wall. Returns whether
/// anything changed.
pub(super) fn kill_dead_ends(grid: &mut Grid) -> bool {
    let mut changed = false;
    for x in 1..(grid.width() as i32 - 1) {
        for y in 1..(grid.height() as i32 - 1) {
            if grid.get(x, y) == Tile::Floor && grid.count_tiles_around(x, y, Tile::Wall) == 3 {
                grid.set(x, y, Tile::Wall);
                changed = true;
            }
        }
    }
    changed
}

/// Erases every wall component reachable from the interior that has fewer
/// than `max_size` cells. Returns how many components were turned into floor.
pub(super) fn kill_islands(grid: &mut Grid, max_size: usize) -> usize {
    let mut removed = 0;
    for x in 1..(grid.width() as i32 - 1) {
        for y in 1..(grid.height() as i32 - 1) {
            if grid.get(x, y) != Tile::Wall {
                continue;
            }
            let size = grid.flood_fill(x, y, Tile::ScratchA);
            if size < max_size {
                trace!("erasing {size}-cell wall island at ({x}, {y})");
                grid.flood_fill(x, y, Tile::Floor);
                removed += 1;
            }
        }
    }
    grid.replace_all(Tile::ScratchA, Tile::Wall);
    debug!("removed {removed} wall islands smaller than {max_size}");
    removed
}
