//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// Staffing target per shift. Also the hard occupancy cap of a shift.
pub const MIN_PER_SHIFT: usize = 2;

/// Maximum number of days a worker may be placed on per week.
pub const MAX_DAYS_PER_EMP: usize = 5;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Tunables for one [`ShiftScheduler`](crate::scheduler::ShiftScheduler).
///
/// Deserializes from partial input; missing fields take their defaults.
///
/// ```
/// use shift_roster::config::SchedulerConfig;
///
/// let config: SchedulerConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.min_per_shift, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Workers per shift: the backfill target and the placement cap.
    pub min_per_shift: usize,
    /// Days a single worker may be placed on.
    pub max_days_per_worker: usize,
    /// Seed for the backfill random stream.
    pub seed: u64,
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-shift staffing level.
    pub fn with_min_per_shift(mut self, min_per_shift: usize) -> Self {
        self.min_per_shift = min_per_shift;
        self
    }

    /// Sets the per-worker day cap.
    pub fn with_max_days_per_worker(mut self, max_days: usize) -> Self {
        self.max_days_per_worker = max_days;
        self
    }

    /// Sets the backfill seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_per_shift: MIN_PER_SHIFT,
            max_days_per_worker: MAX_DAYS_PER_EMP,
            seed: DEFAULT_SEED,
        }
    }
}
