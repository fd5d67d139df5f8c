//! Run log: the ordered trace of every scheduling decision.
//!
//! Each entry carries a kind and a human-readable line. Phase headers are
//! distinct, greppable markers so callers can split the log by phase.
//! Every entry is also emitted as a `tracing` event at a level matching
//! its kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::Level;

/// A pipeline phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Preference,
    SameDayAlternative,
    Spillover,
    Backfill,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Phase; 4] = [
        Phase::Preference,
        Phase::SameDayAlternative,
        Phase::Spillover,
        Phase::Backfill,
    ];

    /// Header line that opens this phase in the run log.
    pub fn header(self) -> &'static str {
        match self {
            Phase::Preference => "=== Preference Pass ===",
            Phase::SameDayAlternative => "=== Same-Day Alternatives Pass ===",
            Phase::Spillover => "=== Next-Day Spillover Pass ===",
            Phase::Backfill => "=== Backfill Pass ===",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Preference => "preference",
            Phase::SameDayAlternative => "same-day-alternative",
            Phase::Spillover => "spillover",
            Phase::Backfill => "backfill",
        };
        f.write_str(name)
    }
}

/// Classification of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Phase header.
    Header,
    /// A worker was placed by a request-driven phase.
    Placement,
    /// A stated preference could not be honored in the preference pass.
    Conflict,
    /// A request survived the same-day alternative pass.
    Unresolved,
    /// A request was abandoned after the full spillover cycle.
    Failure,
    /// A worker was placed by backfill.
    Backfill,
    /// A shift could not be staffed to target.
    Warning,
}

impl EntryKind {
    /// Level of the mirrored `tracing` event.
    pub fn level(self) -> Level {
        match self {
            EntryKind::Placement | EntryKind::Backfill => Level::DEBUG,
            EntryKind::Header | EntryKind::Unresolved => Level::INFO,
            EntryKind::Conflict | EntryKind::Failure | EntryKind::Warning => Level::WARN,
        }
    }
}

/// One line of the run log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: EntryKind,
    pub message: String,
}

/// Append-only run log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLog {
    entries: Vec<LogEntry>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a phase.
    pub fn phase(&mut self, phase: Phase) {
        tracing::info!(%phase, "{}", phase.header());
        self.entries.push(LogEntry {
            kind: EntryKind::Header,
            message: phase.header().to_string(),
        });
    }

    /// Appends an entry.
    pub fn push(&mut self, kind: EntryKind, message: impl Into<String>) {
        let message = message.into();
        let level = kind.level();
        if level == Level::WARN {
            tracing::warn!(?kind, "{message}");
        } else if level == Level::INFO {
            tracing::info!(?kind, "{message}");
        } else {
            tracing::debug!(?kind, "{message}");
        }
        self.entries.push(LogEntry { kind, message });
    }

    /// All entries in append order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// All lines in append order.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.message.as_str())
    }

    /// Lines of a given kind.
    pub fn of_kind(&self, kind: EntryKind) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| e.message.as_str())
    }

    /// Entries between `phase`'s header and the next header.
    pub fn phase_entries(&self, phase: Phase) -> &[LogEntry] {
        let header = phase.header();
        let Some(start) = self
            .entries
            .iter()
            .position(|e| e.kind == EntryKind::Header && e.message == header)
        else {
            return &[];
        };
        let body = &self.entries[start + 1..];
        let end = body
            .iter()
            .position(|e| e.kind == EntryKind::Header)
            .unwrap_or(body.len());
        &body[..end]
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
