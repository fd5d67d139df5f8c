//! Per-day shift preference model.
//!
//! A worker states, for each day, either nothing, exactly one shift, or a
//! ranked list of acceptable shifts. The three forms are mutually exclusive,
//! so they are a single tagged enum rather than a pair of optional fields.
//!
//! # Ranked Ordering
//! Ranked choices are normalized on construction:
//! - sorted ascending by rank (lower = more preferred);
//! - equal ranks break by [`Shift`] enumeration order;
//! - a shift listed twice keeps its last rank;
//! - an empty list collapses to [`Preference::None`].
//!
//! [`RankedChoices`] can only be built through [`Preference::ranked`], and
//! deserialization goes through the same path, so a `Ranked` value is never
//! empty or out of order.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use super::Shift;

/// A single ranked choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedChoice {
    /// Requested shift.
    pub shift: Shift,
    /// Rank (1 = first choice). Values outside 1..=3 are kept as given.
    pub rank: u32,
}

/// Non-empty ranked choices in attempt order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedChoices(Vec<RankedChoice>);

impl Deref for RankedChoices {
    type Target = [RankedChoice];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a RankedChoices {
    type Item = &'a RankedChoice;
    type IntoIter = std::slice::Iter<'a, RankedChoice>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A worker's preference for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "PreferenceRepr")]
pub enum Preference {
    /// No preference; the worker is only placed by backfill.
    #[default]
    None,
    /// Exactly one acceptable shift.
    Single(Shift),
    /// Ranked alternatives, normalized (see module docs).
    Ranked(RankedChoices),
}

/// Unnormalized shape accepted on deserialize.
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum PreferenceRepr {
    None,
    Single(Shift),
    Ranked(Vec<RankedChoice>),
}

impl From<PreferenceRepr> for Preference {
    fn from(repr: PreferenceRepr) -> Self {
        match repr {
            PreferenceRepr::None => Self::None,
            PreferenceRepr::Single(shift) => Self::Single(shift),
            PreferenceRepr::Ranked(choices) => {
                Self::ranked(choices.into_iter().map(|c| (c.shift, c.rank)))
            }
        }
    }
}

impl Preference {
    /// Creates a single-shift preference.
    pub fn single(shift: Shift) -> Self {
        Self::Single(shift)
    }

    /// Creates a ranked preference from `(shift, rank)` pairs.
    ///
    /// Returns [`Preference::None`] if `choices` is empty.
    pub fn ranked(choices: impl IntoIterator<Item = (Shift, u32)>) -> Self {
        let mut normalized: Vec<RankedChoice> = Vec::new();
        for (shift, rank) in choices {
            match normalized.iter_mut().find(|c| c.shift == shift) {
                Some(existing) => existing.rank = rank,
                None => normalized.push(RankedChoice { shift, rank }),
            }
        }

        if normalized.is_empty() {
            return Self::None;
        }

        normalized.sort_by_key(|c| (c.rank, c.shift));
        Self::Ranked(RankedChoices(normalized))
    }

    /// Whether any preference is stated.
    pub fn has_preference(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Shifts to attempt, most preferred first.
    pub fn attempt_order(&self) -> Vec<Shift> {
        match self {
            Self::None => Vec::new(),
            Self::Single(shift) => vec![*shift],
            Self::Ranked(choices) => choices.iter().map(|c| c.shift).collect(),
        }
    }

    /// Stored rank for `shift`, if it is one of the ranked choices.
    pub fn rank_of(&self, shift: Shift) -> Option<u32> {
        match self {
            Self::Ranked(choices) => choices.iter().find(|c| c.shift == shift).map(|c| c.rank),
            _ => None,
        }
    }

    /// Short human-readable description, used in run log lines.
    pub fn describe(&self) -> String {
        match self {
            Self::None => "no preference".to_string(),
            Self::Single(shift) => format!("single preference: {shift}"),
            Self::Ranked(choices) => {
                let parts: Vec<String> = choices
                    .iter()
                    .map(|c| format!("{}={}", c.shift, c.rank))
                    .collect();
                format!("ranked preferences: {}", parts.join(", "))
            }
        }
    }
}
