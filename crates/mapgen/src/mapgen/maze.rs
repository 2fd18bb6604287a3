//! Growing-tree maze carving on the odd-coordinate lattice.

use log::{debug, trace};

use crate::grid::Grid;
use crate::rng::DungeonRng;
use crate::types::{DIRECTIONS, Direction, Pos, Tile};

/// First odd-aligned cell, scanning column by column, that is still solid wall.
pub(super) fn first_blank(grid: &Grid) -> Option<Pos> {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    (1..width - 1)
        .step_by(2)
        .flat_map(|x| (1..height - 1).step_by(2).map(move |y| Pos::new(x, y)))
        .find(|&pos| grid.get_pos(pos) == Tile::Wall)
}

/// Fills every untouched wall pocket with a perfect maze of pending floor.
/// Returns how many disjoint maze regions were carved.
pub(super) fn generate_maze(
    grid: &mut Grid,
    rng: &mut DungeonRng,
    straight_tendency: f64,
) -> usize {
    let mut regions = 0;
    while let Some(start) = first_blank(grid) {
        trace!("maze region {regions} starts at {start:?}");
        carve_region(grid, rng, start, straight_tendency);
        regions += 1;
    }
    debug!("carved {regions} maze regions");
    regions
}

fn carve_region(grid: &mut Grid, rng: &mut DungeonRng, start: Pos, straight_tendency: f64) {
    let mut stack = vec![start];
    let mut visited = vec![start];
    let mut last_direction: Option<Direction> = None;

    while let Some(pos) = stack.pop() {
        visited.push(pos);
        grid.set_pos(pos, Tile::ScratchA);

        let candidates: Vec<Direction> = DIRECTIONS
            .into_iter()
            .filter(|&direction| grid.get_pos(pos.step(direction, 2)) == Tile::Wall)
            .collect();

        if candidates.is_empty() {
            visited.pop();
            if let Some(previous) = visited.pop() {
                stack.push(previous);
            }
            continue;
        }

        let keep_straight = last_direction
            .is_some_and(|direction| candidates.contains(&direction))
            && rng.chance(straight_tendency);
        let direction = match last_direction {
            Some(direction) if keep_straight => direction,
            _ => {
                let Some(&direction) = rng.sample(&candidates) else {
                    continue;
                };
                last_direction = Some(direction);
                direction
            }
        };

        grid.set_pos(pos.step(direction, 1), Tile::ScratchA);
        let next = pos.step(direction, 2);
        grid.set_pos(next, Tile::ScratchA);
        stack.push(next);
    }
}
