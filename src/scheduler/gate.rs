//! Placement gate: the admission check and commit shared by every phase.
//!
//! A placement is admissible iff:
//! 1. the worker holds no shift on that day,
//! 2. the cell is below `min_per_shift` (the cap equals the staffing target),
//! 3. the worker is below `max_days_per_worker`.
//!
//! Every phase calls [`can_place`] before [`place`]. Keeping both here is
//! what makes the grid invariants hold after each phase.

use crate::config::SchedulerConfig;
use crate::models::{AssignmentGrid, Day, Shift, WorkLedger};

/// Whether `worker` may be placed in (day, shift).
pub fn can_place(
    grid: &AssignmentGrid,
    ledger: &WorkLedger,
    config: &SchedulerConfig,
    worker: &str,
    day: Day,
    shift: Shift,
) -> bool {
    !grid.is_scheduled(day, worker)
        && grid.occupancy(day, shift) < config.min_per_shift
        && ledger.days_worked(worker) < config.max_days_per_worker
}

/// Commits a placement. Callers must have checked [`can_place`].
pub fn place(
    grid: &mut AssignmentGrid,
    ledger: &mut WorkLedger,
    worker: &str,
    day: Day,
    shift: Shift,
) {
    debug_assert!(
        !grid.is_scheduled(day, worker),
        "{worker} already scheduled on {day}"
    );
    grid.push(day, shift, worker);
    ledger.increment(worker);
}

/// Places `worker` in the first shift of `shifts` that passes the gate.
pub(crate) fn place_first(
    grid: &mut AssignmentGrid,
    ledger: &mut WorkLedger,
    config: &SchedulerConfig,
    worker: &str,
    day: Day,
    shifts: impl IntoIterator<Item = Shift>,
) -> Option<Shift> {
    let shift = shifts
        .into_iter()
        .find(|&s| can_place(grid, ledger, config, worker, day, s))?;
    place(grid, ledger, worker, day, shift);
    Some(shift)
}
