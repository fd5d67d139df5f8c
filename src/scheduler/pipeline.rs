//! Four-phase placement pipeline.
//!
//! # Algorithm
//!
//! 1. **Preference**: workers in roster order, days in week order. A single
//!    preference tries only its shift; a ranked preference tries shifts in
//!    rank order. Failures become unresolved requests.
//! 2. **Same-day alternative**: each unresolved request tries every shift of
//!    the requested day in enumeration order.
//! 3. **Next-day spillover**: each remaining request tries the following
//!    days (wrapping past `Sun`), every shift in order. A request that finds
//!    nothing after a full cycle is abandoned.
//! 4. **Backfill**: every cell below `min_per_shift` draws uniformly at
//!    random from the workers still free that day and under their day cap,
//!    until it is full or nobody is eligible.
//!
//! Only backfill consumes randomness. Identical seed and roster (same order)
//! reproduce the same grid and the same log.
//!
//! # Complexity
//! O(w · d² · s) for the request phases and O(d · s · c · w) for backfill,
//! where w = workers, d = days, s = shifts, c = `min_per_shift`.

use tracing::instrument;

use super::gate::{can_place, place, place_first};
use super::log::{EntryKind, Phase, RunLog};
use super::picker::{Picker, SeededPicker};
use super::{ScheduleStats, SchedulingResult};
use crate::config::SchedulerConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{AssignmentGrid, Day, Preference, Shift, WorkLedger, Worker};
use crate::validation::validate_roster;

/// A preference that a phase could not honor, carried to the next phase.
#[derive(Debug, Clone, Copy)]
struct UnresolvedRequest<'a> {
    worker: &'a str,
    day: Day,
    preference: &'a Preference,
}

/// Deterministic weekly shift scheduler.
///
/// # Example
///
/// ```
/// use shift_roster::models::{Day, Shift, Worker};
/// use shift_roster::scheduler::ShiftScheduler;
///
/// let roster = vec![
///     Worker::new("Ana").with_single(Day::Mon, Shift::Morning),
///     Worker::new("Ben").with_ranked(Day::Mon, [(Shift::Evening, 1), (Shift::Morning, 2)]),
///     Worker::new("Cleo"),
/// ];
///
/// let result = ShiftScheduler::with_seed(42).generate(&roster).unwrap();
/// assert_eq!(result.grid().shift_of(Day::Mon, "Ana"), Some(Shift::Morning));
/// assert_eq!(result.grid().shift_of(Day::Mon, "Ben"), Some(Shift::Evening));
/// assert!(result.log_lines().contains(&"=== Backfill Pass ==="));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShiftScheduler {
    config: SchedulerConfig,
}

impl ShiftScheduler {
    /// Creates a scheduler with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler with default limits and the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(SchedulerConfig::default().with_seed(seed))
    }

    /// Creates a scheduler from an explicit configuration.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules a roster.
    ///
    /// Every call seeds a fresh random stream from the configured seed, so
    /// repeated calls on the same roster return identical results.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidRoster`] if worker names are blank or repeated.
    #[instrument(skip_all, fields(workers = workers.len(), seed = self.config.seed))]
    pub fn generate(&self, workers: &[Worker]) -> Result<SchedulingResult> {
        let mut picker = SeededPicker::from_seed(self.config.seed);
        self.generate_with(workers, &mut picker)
    }

    /// Schedules a roster drawing backfill choices from `picker`.
    pub fn generate_with<P: Picker + ?Sized>(
        &self,
        workers: &[Worker],
        picker: &mut P,
    ) -> Result<SchedulingResult> {
        validate_roster(workers).map_err(ScheduleError::InvalidRoster)?;

        let mut run = Run::new(&self.config, workers);
        let unresolved = run.preference_pass();
        let unresolved = run.same_day_pass(unresolved);
        run.spillover_pass(unresolved);
        run.backfill_pass(picker);

        let stats = ScheduleStats::calculate(&run.grid, workers);
        tracing::info!(
            assignments = stats.total_assignments,
            first_choice_pct = stats.first_choice_pct,
            backfills = stats.backfills,
            "schedule generated"
        );

        Ok(SchedulingResult::new(run.grid, stats, run.log, run.ledger))
    }
}

/// Mutable state of one invocation.
struct Run<'a> {
    config: &'a SchedulerConfig,
    workers: &'a [Worker],
    grid: AssignmentGrid,
    ledger: WorkLedger,
    log: RunLog,
}

impl<'a> Run<'a> {
    fn new(config: &'a SchedulerConfig, workers: &'a [Worker]) -> Self {
        Self {
            config,
            workers,
            grid: AssignmentGrid::new(),
            ledger: WorkLedger::for_workers(workers.iter().map(|w| w.name.as_str())),
            log: RunLog::new(),
        }
    }

    fn preference_pass(&mut self) -> Vec<UnresolvedRequest<'a>> {
        self.log.phase(Phase::Preference);
        let mut unresolved = Vec::new();

        for worker in self.workers {
            for day in Day::ALL {
                let preference = worker.preference(day);
                let placed = match preference {
                    Preference::None => continue,
                    Preference::Single(shift) => self.try_single(&worker.name, day, *shift),
                    Preference::Ranked(_) => self.try_ranked(&worker.name, day, preference),
                };

                if !placed {
                    self.log.push(
                        EntryKind::Conflict,
                        format!(
                            "CONFLICT: {} could not be placed on {} ({})",
                            worker.name,
                            day,
                            preference.describe()
                        ),
                    );
                    unresolved.push(UnresolvedRequest {
                        worker: &worker.name,
                        day,
                        preference,
                    });
                }
            }
        }

        unresolved
    }

    fn try_single(&mut self, worker: &str, day: Day, shift: Shift) -> bool {
        if !can_place(&self.grid, &self.ledger, self.config, worker, day, shift) {
            return false;
        }
        place(&mut self.grid, &mut self.ledger, worker, day, shift);
        self.log.push(
            EntryKind::Placement,
            format!("Placed {worker} on {day} {shift} (single preference)"),
        );
        true
    }

    fn try_ranked(&mut self, worker: &str, day: Day, preference: &Preference) -> bool {
        let Preference::Ranked(choices) = preference else {
            return false;
        };

        for choice in choices {
            if can_place(&self.grid, &self.ledger, self.config, worker, day, choice.shift) {
                place(&mut self.grid, &mut self.ledger, worker, day, choice.shift);
                self.log.push(
                    EntryKind::Placement,
                    format!(
                        "Placed {worker} on {day} {} (priority {})",
                        choice.shift, choice.rank
                    ),
                );
                return true;
            }
        }
        false
    }

    fn same_day_pass(&mut self, requests: Vec<UnresolvedRequest<'a>>) -> Vec<UnresolvedRequest<'a>> {
        self.log.phase(Phase::SameDayAlternative);
        let mut still_unresolved = Vec::new();

        for request in requests {
            let placed = place_first(
                &mut self.grid,
                &mut self.ledger,
                self.config,
                request.worker,
                request.day,
                Shift::ALL,
            );

            match placed {
                Some(shift) => self.log.push(
                    EntryKind::Placement,
                    format!(
                        "Placed {} on {} {shift} (same-day alternative)",
                        request.worker, request.day
                    ),
                ),
                None => {
                    self.log.push(
                        EntryKind::Unresolved,
                        format!("Still unresolved: {} on {}", request.worker, request.day),
                    );
                    still_unresolved.push(request);
                }
            }
        }

        still_unresolved
    }

    fn spillover_pass(&mut self, requests: Vec<UnresolvedRequest<'a>>) {
        self.log.phase(Phase::Spillover);

        for request in requests {
            let placed = (1..Day::COUNT).find_map(|offset| {
                let candidate = request.day.offset(offset);
                place_first(
                    &mut self.grid,
                    &mut self.ledger,
                    self.config,
                    request.worker,
                    candidate,
                    Shift::ALL,
                )
                .map(|shift| (candidate, shift))
            });

            match placed {
                Some((day, shift)) => self.log.push(
                    EntryKind::Placement,
                    format!(
                        "Placed {} on {day} {shift} (spillover from {})",
                        request.worker, request.day
                    ),
                ),
                None => self.log.push(
                    EntryKind::Failure,
                    format!(
                        "FAILED TO PLACE: {} on {} ({}; all days attempted)",
                        request.worker,
                        request.day,
                        request.preference.describe()
                    ),
                ),
            }
        }
    }

    fn backfill_pass<P: Picker + ?Sized>(&mut self, picker: &mut P) {
        self.log.phase(Phase::Backfill);
        let target = self.config.min_per_shift;

        for day in Day::ALL {
            for shift in Shift::ALL {
                while self.grid.occupancy(day, shift) < target {
                    let pool = self.eligible_pool(day);
                    if pool.is_empty() {
                        self.log.push(
                            EntryKind::Warning,
                            format!(
                                "WARNING: Cannot backfill {day} {shift} - no eligible workers ({}/{target} assigned)",
                                self.grid.occupancy(day, shift)
                            ),
                        );
                        break;
                    }

                    let chosen = pool[picker.pick(pool.len())];
                    place(&mut self.grid, &mut self.ledger, chosen, day, shift);
                    self.log.push(
                        EntryKind::Backfill,
                        format!("BACKFILL: Added {chosen} to {day} {shift}"),
                    );
                }
            }
        }
    }

    /// Workers free on `day` and under their day cap, in roster order.
    fn eligible_pool(&self, day: Day) -> Vec<&'a str> {
        self.workers
            .iter()
            .map(|w| w.name.as_str())
            .filter(|name| {
                !self.grid.is_scheduled(day, name)
                    && self.ledger.days_worked(name) < self.config.max_days_per_worker
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::picker::testing::ScriptedPicker;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn init_test_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();
    }

    fn names(workers: &[&str]) -> Vec<Worker> {
        workers.iter().map(|&n| Worker::new(n)).collect()
    }

    /// Roster with varied, reproducible preferences.
    fn generated_roster(size: usize, seed: u64) -> Vec<Worker> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..size)
            .map(|i| {
                let mut worker = Worker::new(format!("W{i:02}"));
                for day in Day::ALL {
                    let preference = match rng.random_range(0..4) {
                        0 => Preference::None,
                        1 => Preference::single(Shift::ALL[rng.random_range(0..Shift::COUNT)]),
                        _ => {
                            let mut choices = Vec::new();
                            for shift in Shift::ALL {
                                if rng.random_bool(0.7) {
                                    choices.push((shift, rng.random_range(1..=3)));
                                }
                            }
                            Preference::ranked(choices)
                        }
                    };
                    worker.set_preference(day, preference);
                }
                worker
            })
            .collect()
    }

    fn assert_invariants(result: &SchedulingResult, config: &SchedulerConfig) {
        let grid = result.grid();

        for day in Day::ALL {
            let mut seen = HashSet::new();
            for shift in Shift::ALL {
                let assigned = grid.assigned(day, shift);
                assert!(
                    assigned.len() <= config.min_per_shift,
                    "{day} {shift} over capacity: {}",
                    assigned.len()
                );
                for worker in assigned {
                    assert!(seen.insert(worker.clone()), "{worker} twice on {day}");
                }
            }
        }

        let appearances = grid.appearances();
        for (worker, &days) in result.work_counts().counts() {
            assert!(days <= config.max_days_per_worker, "{worker} works {days} days");
            assert_eq!(appearances.get(worker).copied().unwrap_or(0), days);
        }

        let warnings: Vec<&str> = result.log().of_kind(EntryKind::Warning).collect();
        for (day, shift, count) in result.understaffed(config.min_per_shift) {
            let cell = format!("Cannot backfill {day} {shift} ");
            assert!(
                warnings.iter().any(|w| w.contains(&cell)),
                "{day} {shift} has {count} workers but no warning"
            );
        }
    }

    #[test]
    fn test_empty_roster_warns_every_cell() {
        init_test_logging();
        let result = ShiftScheduler::new().generate(&[]).unwrap();

        assert_eq!(result.grid().assignment_count(), 0);
        assert_eq!(
            result.log().of_kind(EntryKind::Warning).count(),
            Day::COUNT * Shift::COUNT
        );
        assert_eq!(result.stats().total_assignments, 0);
        assert_eq!(result.stats().first_choice_pct, 0.0);
    }

    #[test]
    fn test_phase_headers_in_order() {
        let result = ShiftScheduler::new().generate(&names(&["A"])).unwrap();
        let headers: Vec<&str> = result.log().of_kind(EntryKind::Header).collect();
        let expected: Vec<&str> = Phase::ALL.iter().map(|p| p.header()).collect();
        assert_eq!(headers, expected);
    }

    #[test]
    fn test_three_workers_one_day_backfill() {
        let roster = names(&["A", "B", "C"]);
        let mut picker = ScriptedPicker::new(vec![0]);
        let result = ShiftScheduler::new()
            .generate_with(&roster, &mut picker)
            .unwrap();
        let grid = result.grid();

        // Pool [A,B,C] → A, [B,C] → B, then [C] → C, then empty.
        assert_eq!(grid.assigned(Day::Mon, Shift::Morning), ["A", "B"]);
        assert_eq!(grid.assigned(Day::Mon, Shift::Afternoon), ["C"]);
        assert!(grid.assigned(Day::Mon, Shift::Evening).is_empty());

        let warnings: Vec<&str> = result.log().of_kind(EntryKind::Warning).collect();
        assert!(warnings.contains(
            &"WARNING: Cannot backfill Mon AFTERNOON - no eligible workers (1/2 assigned)"
        ));
        assert!(warnings.contains(
            &"WARNING: Cannot backfill Mon EVENING - no eligible workers (0/2 assigned)"
        ));
    }

    #[test]
    fn test_three_workers_week_respects_day_cap() {
        let roster = names(&["A", "B", "C"]);
        let config = SchedulerConfig::default();
        let result = ShiftScheduler::with_config(config.clone())
            .generate(&roster)
            .unwrap();

        // Everyone works Mon..Fri, nobody is left for the weekend.
        for name in ["A", "B", "C"] {
            assert_eq!(result.work_counts().days_worked(name), 5);
        }
        for shift in Shift::ALL {
            assert_eq!(result.grid().occupancy(Day::Sat, shift), 0);
            assert_eq!(result.grid().occupancy(Day::Sun, shift), 0);
        }
        assert_eq!(result.stats().backfills, 15);
        assert_invariants(&result, &config);
    }

    #[test]
    fn test_ranked_falls_to_second_choice() {
        let roster = vec![
            Worker::new("A").with_single(Day::Mon, Shift::Afternoon),
            Worker::new("B").with_single(Day::Mon, Shift::Afternoon),
            Worker::new("C").with_ranked(Day::Mon, [(Shift::Afternoon, 1), (Shift::Evening, 2)]),
        ];
        let result = ShiftScheduler::new().generate(&roster).unwrap();

        assert_eq!(result.grid().shift_of(Day::Mon, "C"), Some(Shift::Evening));
        assert!(result
            .log_lines()
            .contains(&"Placed C on Mon EVENING (priority 2)"));
        assert_eq!(result.log().of_kind(EntryKind::Conflict).count(), 0);
    }

    #[test]
    fn test_ranked_tries_lowest_rank_first() {
        let listed = Preference::ranked([(Shift::Evening, 2), (Shift::Afternoon, 1)]);
        let roster = vec![Worker::new("A").with_preference(Day::Mon, listed)];
        let result = ShiftScheduler::new().generate(&roster).unwrap();

        assert_eq!(result.grid().shift_of(Day::Mon, "A"), Some(Shift::Afternoon));
        assert!(result
            .log_lines()
            .contains(&"Placed A on Mon AFTERNOON (priority 1)"));
    }

    #[test]
    fn test_deserialized_worker_keeps_rank_order() {
        let json = r#"{"name": "B", "preferences": {"Mon": {"ranked": [
            {"shift": "EVENING", "rank": 2},
            {"shift": "AFTERNOON", "rank": 1}
        ]}}}"#;
        let worker: Worker = serde_json::from_str(json).unwrap();
        let result = ShiftScheduler::new().generate(&[worker]).unwrap();

        assert_eq!(result.grid().shift_of(Day::Mon, "B"), Some(Shift::Afternoon));
        assert!(result
            .log_lines()
            .contains(&"Placed B on Mon AFTERNOON (priority 1)"));
    }

    #[test]
    fn test_deserialized_empty_ranked_is_no_request() {
        let json = r#"{"name": "C", "preferences": {"Mon": {"ranked": []}}}"#;
        let worker: Worker = serde_json::from_str(json).unwrap();
        assert_eq!(worker.preference(Day::Mon), &Preference::None);

        let result = ShiftScheduler::new().generate(&[worker]).unwrap();
        assert_eq!(result.log().of_kind(EntryKind::Conflict).count(), 0);
        assert_eq!(result.log().of_kind(EntryKind::Unresolved).count(), 0);
        assert_eq!(result.log().of_kind(EntryKind::Failure).count(), 0);
    }

    #[test]
    fn test_single_conflict_resolved_same_day() {
        let roster = vec![
            Worker::new("A").with_single(Day::Mon, Shift::Morning),
            Worker::new("B").with_single(Day::Mon, Shift::Morning),
            Worker::new("C").with_single(Day::Mon, Shift::Morning),
        ];
        let result = ShiftScheduler::new().generate(&roster).unwrap();
        let prefs = result.log().phase_entries(Phase::Preference);

        assert!(prefs.iter().any(|e| e.kind == EntryKind::Conflict
            && e.message == "CONFLICT: C could not be placed on Mon (single preference: MORNING)"));
        assert!(result
            .log_lines()
            .contains(&"Placed C on Mon AFTERNOON (same-day alternative)"));
        assert_eq!(result.grid().shift_of(Day::Mon, "C"), Some(Shift::Afternoon));
    }

    #[test]
    fn test_spillover_to_next_day() {
        let config = SchedulerConfig::default().with_min_per_shift(1);
        let roster = vec![
            Worker::new("A").with_single(Day::Mon, Shift::Morning),
            Worker::new("B").with_single(Day::Mon, Shift::Afternoon),
            Worker::new("C").with_single(Day::Mon, Shift::Evening),
            Worker::new("D").with_single(Day::Mon, Shift::Morning),
        ];
        let result = ShiftScheduler::with_config(config.clone())
            .generate(&roster)
            .unwrap();

        assert!(result.log_lines().contains(&"Still unresolved: D on Mon"));
        assert!(result
            .log_lines()
            .contains(&"Placed D on Tue MORNING (spillover from Mon)"));
        assert_eq!(result.grid().shift_of(Day::Mon, "D"), None);
        assert_invariants(&result, &config);
    }

    #[test]
    fn test_spillover_wraps_to_monday() {
        let config = SchedulerConfig::default().with_min_per_shift(1);
        let roster = vec![
            Worker::new("A").with_single(Day::Sun, Shift::Morning),
            Worker::new("B").with_single(Day::Sun, Shift::Afternoon),
            Worker::new("C").with_single(Day::Sun, Shift::Evening),
            Worker::new("D").with_ranked(Day::Sun, [(Shift::Evening, 1)]),
        ];
        let result = ShiftScheduler::with_config(config).generate(&roster).unwrap();

        assert!(result
            .log_lines()
            .contains(&"Placed D on Mon MORNING (spillover from Sun)"));
    }

    #[test]
    fn test_request_abandoned_when_day_cap_reached() {
        let config = SchedulerConfig::default().with_max_days_per_worker(1);
        let roster = vec![Worker::new("D")
            .with_single(Day::Mon, Shift::Morning)
            .with_single(Day::Tue, Shift::Morning)];
        let result = ShiftScheduler::with_config(config.clone())
            .generate(&roster)
            .unwrap();

        let failures: Vec<&str> = result.log().of_kind(EntryKind::Failure).collect();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].starts_with("FAILED TO PLACE: D on Tue"));
        assert_eq!(result.work_counts().days_worked("D"), 1);
        assert_invariants(&result, &config);
    }

    #[test]
    fn test_only_backfill_draws() {
        let roster = vec![
            Worker::new("A").with_single(Day::Mon, Shift::Morning),
            Worker::new("B"),
            Worker::new("C"),
            Worker::new("D"),
        ];
        let mut picker = ScriptedPicker::new(vec![3, 1, 4, 1, 5, 9, 2, 6]);
        let result = ShiftScheduler::new()
            .generate_with(&roster, &mut picker)
            .unwrap();

        let backfilled = result.log().of_kind(EntryKind::Backfill).count();
        assert_eq!(picker.calls.len(), backfilled);
        assert!(picker.calls.iter().all(|&len| len > 0));
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let roster = generated_roster(12, 7);
        let scheduler = ShiftScheduler::with_seed(42);

        let first = scheduler.generate(&roster).unwrap();
        let second = scheduler.generate(&roster).unwrap();
        let fresh = ShiftScheduler::with_seed(42).generate(&roster).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, fresh);
    }

    #[test]
    fn test_seed_changes_backfill_only() {
        let roster = names(&["A", "B", "C", "D", "E", "F", "G", "H"]);
        let results: Vec<SchedulingResult> = (0..8)
            .map(|seed| ShiftScheduler::with_seed(seed).generate(&roster).unwrap())
            .collect();

        // Without preferences every placement is backfill, so different
        // seeds should not all agree.
        assert!(results.windows(2).any(|w| w[0].grid() != w[1].grid()));
        for result in &results {
            assert_eq!(result.log().of_kind(EntryKind::Placement).count(), 0);
        }
    }

    #[test]
    fn test_invariants_on_generated_rosters() {
        init_test_logging();
        for (size, seed) in [(1, 1), (4, 2), (9, 3), (15, 4), (30, 5)] {
            let roster = generated_roster(size, seed);
            for config in [
                SchedulerConfig::default().with_seed(seed),
                SchedulerConfig::default()
                    .with_min_per_shift(3)
                    .with_max_days_per_worker(4)
                    .with_seed(seed),
                SchedulerConfig::default().with_min_per_shift(1).with_seed(seed),
            ] {
                let result = ShiftScheduler::with_config(config.clone())
                    .generate(&roster)
                    .unwrap();
                assert_invariants(&result, &config);

                let s = result.stats();
                assert_eq!(
                    s.total_assignments,
                    s.first_choice + s.second_choice + s.third_choice + s.backfills + s.unmatched
                );
                for pct in [
                    s.first_choice_pct,
                    s.second_choice_pct,
                    s.third_choice_pct,
                    s.backfill_pct,
                ] {
                    assert!((0.0..=100.0).contains(&pct));
                }
            }
        }
    }

    #[test]
    fn test_large_roster_fully_staffed() {
        let roster = generated_roster(20, 11);
        let config = SchedulerConfig::default();
        let result = ShiftScheduler::with_config(config.clone())
            .generate(&roster)
            .unwrap();

        // 20 workers × 5 days = 100 slots ≥ 7 × 3 × 2 = 42 needed.
        assert!(result.understaffed(config.min_per_shift).is_empty());
        assert_eq!(result.log().of_kind(EntryKind::Warning).count(), 0);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let roster = names(&["A", "B", "A"]);
        let err = ShiftScheduler::new().generate(&roster).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRoster(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_zero_capacity_places_nobody() {
        let config = SchedulerConfig::default().with_min_per_shift(0);
        let roster = vec![Worker::new("A").with_single(Day::Mon, Shift::Morning)];
        let result = ShiftScheduler::with_config(config).generate(&roster).unwrap();

        assert_eq!(result.grid().assignment_count(), 0);
        assert_eq!(result.log().of_kind(EntryKind::Failure).count(), 1);
        assert_eq!(result.log().of_kind(EntryKind::Warning).count(), 0);
    }
}
