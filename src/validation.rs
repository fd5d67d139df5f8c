//! Input validation for rosters.
//!
//! Checks structural integrity of a roster before scheduling. Detects:
//! - Duplicate worker identifiers
//! - Blank worker identifiers
//!
//! Scheduling state is keyed by worker identifier, so a duplicate would
//! merge two workers' day counts and "already scheduled" checks. All
//! problems are collected rather than stopping at the first.
//!
//! Unknown shift or day tokens cannot reach this layer: they are rejected
//! when wire records are converted into typed [`Worker`]s.

use std::collections::HashSet;

use crate::models::Worker;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two workers share the same identifier.
    DuplicateId,
    /// A worker identifier is empty or whitespace.
    BlankId,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster.
///
/// Checks:
/// 1. No worker identifier is blank
/// 2. No two workers share an identifier
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(workers: &[Worker]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    for (position, worker) in workers.iter().enumerate() {
        if worker.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankId,
                format!("Worker #{} has a blank name", position + 1),
            ));
            continue;
        }

        if !seen.insert(worker.name.as_str()) && reported.insert(worker.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate worker: {}", worker.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
