//! Weekly calendar enumerations.
//!
//! A roster week is a fixed grid of [`Day`] × [`Shift`]. Both enumerations
//! are ordered: declaration order drives the alternative, spillover and
//! backfill search order, so reordering variants changes schedules.
//!
//! # Token Parsing
//! - Days parse exactly (`"Mon"`, not `"mon"` or `"Monday"`).
//! - Shifts parse case-insensitively against their names
//!   (`"Morning"`, `"MORNING"`, `"morning"`).
//!
//! Anything else is a [`ScheduleError::UnknownDay`] /
//! [`ScheduleError::UnknownShift`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Day of the roster week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    /// All days in enumeration order.
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// Number of days in the week.
    pub const COUNT: usize = Self::ALL.len();

    /// Zero-based ordinal position.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day at the given ordinal, wrapping around the week.
    #[inline]
    pub fn from_index_wrapping(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    /// The day `offset` positions after this one, wrapping past `Sun`.
    #[inline]
    pub fn offset(self, offset: usize) -> Self {
        Self::from_index_wrapping(self.index() + offset)
    }

    /// Wire token (`"Mon"` .. `"Sun"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = ScheduleError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == token)
            .ok_or_else(|| ScheduleError::UnknownDay {
                token: token.to_string(),
            })
    }
}

/// A shift within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
}

impl Shift {
    /// All shifts in enumeration order.
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Evening];

    /// Number of shifts per day.
    pub const COUNT: usize = Self::ALL.len();

    /// Zero-based ordinal position.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Shift::Morning => "MORNING",
            Shift::Afternoon => "AFTERNOON",
            Shift::Evening => "EVENING",
        }
    }

    /// Whether `token` names this shift, ignoring ASCII case.
    pub fn matches(self, token: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(token)
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = ScheduleError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|s| s.matches(token))
            .ok_or_else(|| ScheduleError::UnknownShift {
                token: token.to_string(),
            })
    }
}
