//! Deterministic weekly shift-assignment engine.
//!
//! Given a roster of workers with optional per-day shift preferences, builds
//! a complete day × shift grid that honors hard capacity and fairness limits:
//! preferences first, fallbacks next, seeded random backfill last.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Day`, `Shift`, `Preference`, `Worker`,
//!   `AssignmentGrid`, `WorkLedger`
//! - **`scheduler`**: `ShiftScheduler` (four-phase pipeline), placement gate,
//!   run log, `ScheduleStats`
//! - **`config`**: `SchedulerConfig` (staffing level, day cap, seed)
//! - **`validation`**: Roster integrity checks (duplicate and blank names)
//! - **`io`**: JSON roster/result codec and CSV grid export
//!
//! # Example
//!
//! ```
//! use shift_roster::io::parse_roster;
//! use shift_roster::scheduler::ShiftScheduler;
//!
//! let roster = parse_roster(r#"[
//!     {"name": "Ana", "preferences": {"Mon": {"single": "MORNING"}}},
//!     {"name": "Ben", "preferences": {"Mon": {"ranked": {"MORNING": 1, "EVENING": 2}}}},
//!     {"name": "Cleo"}
//! ]"#)?;
//!
//! let result = ShiftScheduler::with_seed(42).generate(&roster)?;
//! assert!(result.stats().total_assignments > 0);
//! # Ok::<(), shift_roster::error::ScheduleError>(())
//! ```
//!
//! # Guarantees
//!
//! After every phase: a worker holds at most one shift per day, no shift
//! exceeds `min_per_shift`, and no worker exceeds `max_days_per_worker`.
//! Identical seed and roster reproduce identical results. There is no
//! optimality guarantee.

pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::SchedulerConfig;
pub use error::{Result, ScheduleError};
pub use scheduler::{SchedulingResult, ShiftScheduler};
