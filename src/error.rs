//! Error types.
//!
//! Contention (a preference that cannot be honored, a shift that cannot be
//! fully staffed) is never an error: it is resolved by a later phase or
//! recorded as a run-log warning. Errors are reserved for input that cannot
//! be scheduled at all and for codec failures.

use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A preference names a shift outside the fixed enumeration.
    #[error("unknown shift token '{token}'")]
    UnknownShift { token: String },

    /// A preference is keyed by a day outside the fixed enumeration.
    #[error("unknown day token '{token}'")]
    UnknownDay { token: String },

    /// The roster failed structural validation.
    #[error("invalid roster: {}", summarize(.0))]
    InvalidRoster(Vec<ValidationError>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
