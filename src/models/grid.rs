//! Assignment grid and work ledger.
//!
//! The grid maps every (day, shift) cell to the workers placed there, in
//! placement order. The ledger tracks how many days each worker has been
//! placed on. Both are created fresh for every scheduling run.
//!
//! Placement order inside a cell is kept for display and export only;
//! scheduling decisions read occupancy counts and membership.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Day, Shift};

/// Day × Shift → ordered worker identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentGrid {
    cells: BTreeMap<Day, BTreeMap<Shift, Vec<String>>>,
}

impl AssignmentGrid {
    /// Creates a grid with every cell present and empty.
    pub fn new() -> Self {
        let cells = Day::ALL
            .into_iter()
            .map(|day| {
                let shifts: BTreeMap<Shift, Vec<String>> =
                    Shift::ALL.into_iter().map(|s| (s, Vec::new())).collect();
                (day, shifts)
            })
            .collect::<BTreeMap<_, _>>();
        Self { cells }
    }

    /// Workers assigned to a cell, in placement order.
    pub fn assigned(&self, day: Day, shift: Shift) -> &[String] {
        self.cells
            .get(&day)
            .and_then(|shifts| shifts.get(&shift))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of workers in a cell.
    #[inline]
    pub fn occupancy(&self, day: Day, shift: Shift) -> usize {
        self.assigned(day, shift).len()
    }

    /// Shift the worker holds on `day`, if any.
    pub fn shift_of(&self, day: Day, worker: &str) -> Option<Shift> {
        Shift::ALL
            .into_iter()
            .find(|&shift| self.assigned(day, shift).iter().any(|w| w == worker))
    }

    /// Whether the worker holds any shift on `day`.
    #[inline]
    pub fn is_scheduled(&self, day: Day, worker: &str) -> bool {
        self.shift_of(day, worker).is_some()
    }

    /// Appends a worker to a cell.
    pub fn push(&mut self, day: Day, shift: Shift, worker: impl Into<String>) {
        self.cells
            .entry(day)
            .or_default()
            .entry(shift)
            .or_default()
            .push(worker.into());
    }

    /// Iterates all cells in (day, shift) enumeration order.
    pub fn cells(&self) -> impl Iterator<Item = (Day, Shift, &[String])> + '_ {
        Day::ALL.into_iter().flat_map(move |day| {
            Shift::ALL
                .into_iter()
                .map(move |shift| (day, shift, self.assigned(day, shift)))
        })
    }

    /// Total number of assignments across all cells.
    pub fn assignment_count(&self) -> usize {
        self.cells().map(|(_, _, workers)| workers.len()).sum()
    }

    /// Number of grid appearances per worker.
    pub fn appearances(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for (_, _, workers) in self.cells() {
            for worker in workers {
                *counts.entry(worker.clone()).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl Default for AssignmentGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Worker identifier → number of days worked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLedger {
    counts: BTreeMap<String, usize>,
}

impl WorkLedger {
    /// Creates a ledger with every named worker at zero.
    pub fn for_workers<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            counts: names.into_iter().map(|n| (n.to_string(), 0)).collect(),
        }
    }

    /// Days worked so far (0 for unknown workers).
    #[inline]
    pub fn days_worked(&self, worker: &str) -> usize {
        self.counts.get(worker).copied().unwrap_or(0)
    }

    /// Records one more worked day.
    pub fn increment(&mut self, worker: &str) {
        *self.counts.entry(worker.to_string()).or_insert(0) += 1;
    }

    /// All counts, ordered by worker identifier.
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Number of tracked workers.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no workers are tracked.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
