//! Per-run statistics reported by the map generator.

use serde::{Deserialize, Serialize};

use super::connectivity::ConnectReport;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub rooms: usize,
    pub caverns: usize,
    pub maze_regions: usize,
    pub merged_regions: usize,
    /// Pending cells that no connector could reach. Zero on a healthy run.
    pub unreached_cells: usize,
    pub extra_connectors: usize,
    pub dead_end_sweeps: usize,
    pub islands_removed: usize,
    pub floor_tiles: usize,
}

impl GenerationSummary {
    pub(super) fn record_connectivity(&mut self, report: ConnectReport) {
        self.merged_regions = report.merged_regions;
        self.unreached_cells = report.unreached_cells;
    }
}
