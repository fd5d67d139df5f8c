//! Output of one scheduling run.

use serde::{Deserialize, Serialize};

use super::{RunLog, ScheduleStats};
use crate::models::{AssignmentGrid, Day, Shift, WorkLedger};

/// Immutable bundle produced by [`ShiftScheduler::generate`](super::ShiftScheduler::generate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingResult {
    grid: AssignmentGrid,
    stats: ScheduleStats,
    log: RunLog,
    work_counts: WorkLedger,
}

impl SchedulingResult {
    pub(crate) fn new(
        grid: AssignmentGrid,
        stats: ScheduleStats,
        log: RunLog,
        work_counts: WorkLedger,
    ) -> Self {
        Self {
            grid,
            stats,
            log,
            work_counts,
        }
    }

    /// Final assignment grid.
    pub fn grid(&self) -> &AssignmentGrid {
        &self.grid
    }

    /// Satisfaction statistics.
    pub fn stats(&self) -> &ScheduleStats {
        &self.stats
    }

    /// Run log.
    pub fn log(&self) -> &RunLog {
        &self.log
    }

    /// Log lines in order.
    pub fn log_lines(&self) -> Vec<&str> {
        self.log.lines().collect()
    }

    /// Days worked per worker.
    pub fn work_counts(&self) -> &WorkLedger {
        &self.work_counts
    }

    /// Cells left below `min_per_shift`.
    pub fn understaffed(&self, min_per_shift: usize) -> Vec<(Day, Shift, usize)> {
        self.grid
            .cells()
            .filter(|(_, _, workers)| workers.len() < min_per_shift)
            .map(|(day, shift, workers)| (day, shift, workers.len()))
            .collect()
    }
}
