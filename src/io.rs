//! Wire formats for rosters and results.
//!
//! # Roster JSON
//!
//! ```json
//! [
//!   {
//!     "name": "Ana",
//!     "preferences": {
//!       "Mon": {"single": "MORNING"},
//!       "Tue": {"ranked": {"EVENING": 1, "AFTERNOON": 2}},
//!       "Wed": "none"
//!     }
//!   }
//! ]
//! ```
//!
//! Day keys must match exactly (`"Mon"` .. `"Sun"`); shift tokens match
//! case-insensitively. A preference may also be `null`, and an object with a
//! null `single` falls through to its `ranked` map, where an empty map means
//! no preference.
//!
//! # Grid CSV
//!
//! One row per cell in (day, shift) order: `Day,Shift,Employees`, with the
//! cell's workers joined by `"; "` in placement order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};

use crate::error::{Result, ScheduleError};
use crate::models::{AssignmentGrid, Day, Preference, Shift, Worker};
use crate::scheduler::SchedulingResult;

/// Roster entry as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub name: String,
    #[serde(default)]
    pub preferences: BTreeMap<String, Option<PreferenceRecord>>,
}

/// Preference as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceRecord {
    Empty(NoPreference),
    Single { single: String },
    Ranked { ranked: BTreeMap<String, u32> },
}

/// The literal `"none"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoPreference {
    None,
}

impl PreferenceRecord {
    fn into_preference(self) -> Result<Preference> {
        match self {
            Self::Empty(_) => Ok(Preference::None),
            Self::Single { single } => Ok(Preference::single(single.parse()?)),
            Self::Ranked { ranked } => {
                let choices = ranked
                    .into_iter()
                    .map(|(token, rank)| Ok((token.parse::<Shift>()?, rank)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Preference::ranked(choices))
            }
        }
    }
}

impl From<&Preference> for PreferenceRecord {
    fn from(preference: &Preference) -> Self {
        match preference {
            Preference::None => Self::Empty(NoPreference::None),
            Preference::Single(shift) => Self::Single {
                single: shift.to_string(),
            },
            Preference::Ranked(choices) => Self::Ranked {
                ranked: choices
                    .iter()
                    .map(|c| (c.shift.to_string(), c.rank))
                    .collect(),
            },
        }
    }
}

impl TryFrom<WorkerRecord> for Worker {
    type Error = ScheduleError;

    fn try_from(record: WorkerRecord) -> Result<Self> {
        let mut worker = Worker::new(record.name);
        for (day_token, preference) in record.preferences {
            let day: Day = day_token.parse()?;
            let preference = match preference {
                Some(p) => p.into_preference()?,
                None => Preference::None,
            };
            worker.set_preference(day, preference);
        }
        Ok(worker)
    }
}

impl From<&Worker> for WorkerRecord {
    fn from(worker: &Worker) -> Self {
        Self {
            name: worker.name.clone(),
            preferences: worker
                .preferences
                .iter()
                .map(|(day, p)| (day.to_string(), Some(PreferenceRecord::from(p))))
                .collect(),
        }
    }
}

/// Parses a roster from JSON.
///
/// # Errors
/// - [`ScheduleError::Json`] if the document is not a roster.
/// - [`ScheduleError::UnknownDay`] / [`ScheduleError::UnknownShift`] if a
///   token is outside the fixed enumerations.
pub fn parse_roster(json: &str) -> Result<Vec<Worker>> {
    let records: Vec<WorkerRecord> = serde_json::from_str(json)?;
    records.into_iter().map(Worker::try_from).collect()
}

/// Reads a roster from a JSON stream.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<Worker>> {
    let records: Vec<WorkerRecord> = serde_json::from_reader(reader)?;
    records.into_iter().map(Worker::try_from).collect()
}

/// Serializes a roster to pretty-printed JSON in the roster format.
pub fn roster_to_json(workers: &[Worker]) -> Result<String> {
    let records: Vec<WorkerRecord> = workers.iter().map(WorkerRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Serializes a full scheduling result to pretty-printed JSON.
pub fn result_to_json(result: &SchedulingResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Writes the grid as CSV.
pub fn write_grid_csv<W: Write>(grid: &AssignmentGrid, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Day", "Shift", "Employees"])?;
    for (day, shift, workers) in grid.cells() {
        csv.write_record([day.as_str(), shift.as_str(), workers.join("; ").as_str()])?;
    }
    csv.flush()?;
    Ok(())
}
