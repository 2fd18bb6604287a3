//! Merging pending regions into one floor component and punching extra loops.

use log::{debug, trace, warn};

use crate::grid::Grid;
use crate::rng::DungeonRng;
use crate::types::{Pos, Tile};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConnectReport {
    /// Regions joined onto the seed region through a connector.
    pub merged_regions: usize,
    /// Pending cells that could not be reached and were turned back into wall.
    pub unreached_cells: usize,
}

/// Floods one random pending region into floor, then keeps opening connector
/// walls between pending cells and floor until every pending cell has been
/// absorbed or no connector is left. Whatever is still pending afterwards
/// becomes wall.
pub(super) fn connect_components(grid: &mut Grid, rng: &mut DungeonRng) -> ConnectReport {
    let mut remaining = grid.count_interior(Tile::ScratchA);
    let mut report = ConnectReport::default();
    if remaining == 0 {
        return report;
    }

    let start = loop {
        let pos = Pos::new(
            rng.next_int(1, grid.width() as i32),
            rng.next_int(1, grid.height() as i32),
        );
        if grid.get_pos(pos) == Tile::ScratchA {
            break pos;
        }
    };
    remaining = remaining.saturating_sub(grid.flood_fill(start.x, start.y, Tile::Floor));
    trace!("seed region at {start:?}, {remaining} pending cells left");

    while remaining > 0 {
        let connectors = grid.connectors(Tile::ScratchA, Tile::Floor);
        let Some(&connector) = rng.sample(&connectors) else {
            break;
        };
        if grid.get_pos(connector) != Tile::Wall {
            continue;
        }

        grid.set_pos(connector, Tile::ScratchA);
        let filled = grid.flood_fill(connector.x, connector.y, Tile::Floor).saturating_sub(1);
        if filled == 0 {
            grid.set_pos(connector, Tile::Wall);
        } else {
            remaining = remaining.saturating_sub(filled);
            report.merged_regions += 1;
        }
    }

    report.unreached_cells = grid.count(Tile::ScratchA);
    if report.unreached_cells > 0 {
        warn!("{} pending cells had no connector and were walled in", report.unreached_cells);
    }
    grid.replace_all(Tile::ScratchA, Tile::Wall);
    debug!("merged {} regions into the main floor", report.merged_regions);
    report
}

/// Opens up to `budget` random floor-to-floor connectors as square blocks of
/// side `2 * thickness - 1`, clipped to the interior. Returns how many were opened.
pub(super) fn add_extra_connectors(
    grid: &mut Grid,
    rng: &mut DungeonRng,
    budget: usize,
    thickness: usize,
) -> usize {
    let mut connectors = grid.connectors(Tile::Floor, Tile::Floor);
    let reach = thickness.saturating_sub(1) as i32;
    let max_x = grid.width() as i32 - 1;
    let max_y = grid.height() as i32 - 1;

    let mut opened = 0;
    while opened < budget {
        let Some(connector) = rng.sample_and_remove(&mut connectors) else {
            break;
        };
        for x in (connector.x - reach)..=(connector.x + reach) {
            for y in (connector.y - reach)..=(connector.y + reach) {
                if x > 0 && x < max_x && y > 0 && y < max_y {
                    grid.set(x, y, Tile::Floor);
                }
            }
        }
        opened += 1;
    }

    debug!("opened {opened} extra connectors");
    opened
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_is_connected(grid: &Grid) -> bool {
        let mut copy = grid.clone();
        let Some(start) = copy.positions_of(Tile::Floor).next() else {
            return true;
        };
        let total = copy.count(Tile::Floor);
        copy.flood_fill(start.x, start.y, Tile::Door) == total
    }

    fn chambers(with_distant_chamber: bool) -> Grid {
        let distant = if with_distant_chamber { "#aaaa##########" } else { "###############" };
        Grid::from_ascii(&[
            "###############",
            "#aaa#aaaa#aaaa#",
            "#aaa#aaaa#aaaa#",
            "#aaa#aaaa#aaaa#",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            distant,
            distant,
            distant,
            "###############",
        ])
        .expect("fixture")
    }

    #[test]
    fn adjacent_regions_merge_into_one_floor_component() {
        let mut grid = chambers(false);
        let report = connect_components(&mut grid, &mut DungeonRng::new(6));

        assert_eq!(report.merged_regions, 2);
        assert_eq!(report.unreached_cells, 0);
        assert_eq!(grid.count(Tile::ScratchA), 0);
        assert!(floor_is_connected(&grid));
        // Every chamber cell plus one opened wall per merge.
        assert_eq!(grid.count(Tile::Floor), 9 + 12 + 12 + 2);
    }

    #[test]
    fn unreachable_region_is_walled_in() {
        let mut seeded_in_top_row = false;
        for seed in 0..32 {
            let mut grid = chambers(true);
            let report = connect_components(&mut grid, &mut DungeonRng::new(seed));
            assert!(floor_is_connected(&grid));
            assert_eq!(grid.count(Tile::ScratchA), 0);
            if report.unreached_cells == 12 {
                assert_eq!(grid.get(2, 12), Tile::Wall);
                seeded_in_top_row = true;
            } else {
                assert_eq!(report.unreached_cells, 9 + 12 + 12);
                assert_eq!(grid.count(Tile::Floor), 12);
            }
        }
        assert!(seeded_in_top_row);
    }

    #[test]
    fn nothing_pending_is_a_no_op() {
        let mut grid = Grid::new(15, 15).expect("grid");
        grid.fill_border(true);
        let before = grid.clone();
        let report = connect_components(&mut grid, &mut DungeonRng::new(1));
        assert_eq!(report, ConnectReport::default());
        assert_eq!(grid, before);
    }

    #[test]
    fn extra_connectors_open_loops_between_floor() {
        let mut grid = Grid::from_ascii(&[
            "###############",
            "#.............#",
            "#.............#",
            "#.............#",
            "###############",
            "#.............#",
            "#.............#",
            "#.............#",
            "###############",
            "#.............#",
            "#.............#",
            "#.............#",
            "###############",
            "###############",
            "###############",
        ])
        .expect("fixture");
        let walls_before = grid.count(Tile::Wall);
        let opened = add_extra_connectors(&mut grid, &mut DungeonRng::new(2), 3, 1);
        assert_eq!(opened, 3);
        assert_eq!(grid.count(Tile::Wall), walls_before - 3);
    }

    #[test]
    fn extra_connectors_stop_when_candidates_run_out() {
        let mut grid = Grid::from_ascii(&[
            "###############",
            "#.............#",
            "###.###########",
            "#.............#",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
        ])
        .expect("fixture");
        let candidates = grid.connectors(Tile::Floor, Tile::Floor).len();
        assert_eq!(candidates, 12);
        let opened = add_extra_connectors(&mut grid, &mut DungeonRng::new(2), 50, 1);
        assert_eq!(opened, candidates);
        assert_eq!(grid.connectors(Tile::Floor, Tile::Floor).len(), 0);
    }

    #[test]
    fn thick_connectors_are_clipped_to_the_interior() {
        let mut grid = Grid::from_ascii(&[
            "###############",
            "#.#############",
            "###############",
            "#.#############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
            "###############",
        ])
        .expect("fixture");
        let opened = add_extra_connectors(&mut grid, &mut DungeonRng::new(3), 1, 2);
        assert_eq!(opened, 1);
        // 3x3 block centred on (1, 2) minus the clipped border column.
        for y in 1..=3 {
            assert_eq!(grid.get(1, y), Tile::Floor);
            assert_eq!(grid.get(2, y), Tile::Floor);
            assert_eq!(grid.get(0, y), Tile::Wall);
        }
    }
}
