//! Worker model.
//!
//! A worker is identified by its display name. Scheduling state (grid
//! membership, day counts) is keyed by that name, so names must be unique
//! within a roster; see [`crate::validation::validate_roster`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Day, Preference, Shift};

/// A worker with per-day shift preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique display identifier.
    pub name: String,
    /// Stated preferences. Days absent from the map have no preference.
    pub preferences: BTreeMap<Day, Preference>,
}

impl Worker {
    /// Creates a worker with no preferences.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            preferences: BTreeMap::new(),
        }
    }

    /// Sets the preference for a day, replacing any previous one.
    pub fn with_preference(mut self, day: Day, preference: Preference) -> Self {
        self.set_preference(day, preference);
        self
    }

    /// Prefers exactly one shift on `day`.
    pub fn with_single(self, day: Day, shift: Shift) -> Self {
        self.with_preference(day, Preference::single(shift))
    }

    /// Ranks shifts on `day` (1 = first choice).
    pub fn with_ranked(self, day: Day, choices: impl IntoIterator<Item = (Shift, u32)>) -> Self {
        self.with_preference(day, Preference::ranked(choices))
    }

    /// Sets the preference for a day. `Preference::None` clears it.
    pub fn set_preference(&mut self, day: Day, preference: Preference) {
        if preference.has_preference() {
            self.preferences.insert(day, preference);
        } else {
            self.preferences.remove(&day);
        }
    }

    /// Preference for a day (`Preference::None` if unset).
    pub fn preference(&self, day: Day) -> &Preference {
        static NONE: Preference = Preference::None;
        self.preferences.get(&day).unwrap_or(&NONE)
    }

    /// Number of days with a stated preference.
    pub fn preferred_day_count(&self) -> usize {
        self.preferences.values().filter(|p| p.has_preference()).count()
    }
}
