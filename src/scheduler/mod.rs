//! Shift placement pipeline and run statistics.
//!
//! # Algorithm
//!
//! `ShiftScheduler` runs four greedy phases over a fresh grid: preference,
//! same-day alternative, next-day spillover, and seeded random backfill.
//! Every phase admits placements through the same gate, so the capacity,
//! one-shift-per-day and day-cap invariants hold after each phase. It is a
//! heuristic, not an optimizer.
//!
//! # Statistics
//!
//! `ScheduleStats` classifies each final assignment against the worker's
//! original preference for that day (first/second/third choice, backfill).

mod gate;
mod log;
mod picker;
mod pipeline;
mod result;
mod stats;

pub use gate::{can_place, place};
pub use log::{EntryKind, LogEntry, Phase, RunLog};
pub use picker::{Picker, SeededPicker};
pub use pipeline::ShiftScheduler;
pub use result::SchedulingResult;
pub use stats::ScheduleStats;
