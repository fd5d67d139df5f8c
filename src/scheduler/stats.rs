//! Preference satisfaction statistics.
//!
//! Computed once from a finished grid. Each assignment is classified
//! against the worker's *original* preference for that day, regardless of
//! which phase placed it.
//!
//! # Tiers
//!
//! | Preference on that day | Assigned shift | Tier |
//! |------------------------|----------------|------|
//! | None | any | backfill |
//! | Single(s) | s | first choice |
//! | Ranked, shift has rank 1/2/3 | that shift | first/second/third |
//! | Ranked, rank outside 1..=3 | that shift | unmatched |
//! | Single(s) | other than s | unmatched |
//! | Ranked without that shift | any | unmatched |
//!
//! Unmatched assignments count toward the total but no tier, so
//! `total = first + second + third + backfills + unmatched`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{AssignmentGrid, Preference, Worker};

/// Satisfaction metrics for one scheduling run.
///
/// Percentages are of `total_assignments`, in 0.0..=100.0, and are 0.0
/// when there are no assignments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStats {
    /// Number of (worker, day, shift) assignments in the grid.
    pub total_assignments: usize,
    /// Assignments matching a single preference or a rank-1 choice.
    pub first_choice: usize,
    /// Assignments matching a rank-2 choice.
    pub second_choice: usize,
    /// Assignments matching a rank-3 choice.
    pub third_choice: usize,
    /// Assignments on days the worker stated no preference.
    pub backfills: usize,
    /// Assignments counted in the total but in no tier.
    pub unmatched: usize,
    pub first_choice_pct: f64,
    pub second_choice_pct: f64,
    pub third_choice_pct: f64,
    pub backfill_pct: f64,
}

impl ScheduleStats {
    /// Computes statistics from a finished grid and the roster it came from.
    pub fn calculate(grid: &AssignmentGrid, workers: &[Worker]) -> Self {
        let by_name: HashMap<&str, &Worker> =
            workers.iter().map(|w| (w.name.as_str(), w)).collect();
        let mut stats = Self::default();

        for (day, shift, assigned) in grid.cells() {
            for name in assigned {
                stats.total_assignments += 1;

                let Some(worker) = by_name.get(name.as_str()) else {
                    stats.unmatched += 1;
                    continue;
                };

                match worker.preference(day) {
                    Preference::None => stats.backfills += 1,
                    Preference::Single(wanted) if *wanted == shift => stats.first_choice += 1,
                    Preference::Single(_) => stats.unmatched += 1,
                    ranked @ Preference::Ranked(_) => match ranked.rank_of(shift) {
                        Some(1) => stats.first_choice += 1,
                        Some(2) => stats.second_choice += 1,
                        Some(3) => stats.third_choice += 1,
                        _ => stats.unmatched += 1,
                    },
                }
            }
        }

        stats.first_choice_pct = percent(stats.first_choice, stats.total_assignments);
        stats.second_choice_pct = percent(stats.second_choice, stats.total_assignments);
        stats.third_choice_pct = percent(stats.third_choice, stats.total_assignments);
        stats.backfill_pct = percent(stats.backfills, stats.total_assignments);
        stats
    }

    /// Share of assignments that honored a stated preference (any tier), 0.0..=100.0.
    pub fn satisfied_pct(&self) -> f64 {
        self.first_choice_pct + self.second_choice_pct + self.third_choice_pct
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}
