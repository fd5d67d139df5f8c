//! Roster domain models.
//!
//! Provides the data types a scheduling run consumes and produces:
//! the weekly calendar, per-day preferences, workers, and the
//! assignment grid with its work ledger.
//!
//! # Domain Mappings
//!
//! | shift-roster | Retail | Healthcare | Support Desk |
//! |--------------|--------|------------|--------------|
//! | Worker | Sales associate | Nurse | Agent |
//! | Shift | Store shift | Ward shift | Coverage block |
//! | Preference | Availability form | Shift bid | Rota request |
//! | AssignmentGrid | Weekly rota | Ward roster | On-call plan |

mod calendar;
mod grid;
mod preference;
mod worker;

pub use calendar::{Day, Shift};
pub use grid::{AssignmentGrid, WorkLedger};
pub use preference::{Preference, RankedChoice, RankedChoices};
pub use worker::Worker;
