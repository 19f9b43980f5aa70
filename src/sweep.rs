//! Sensitivity sweep harness
//!
//! Runs one full trial per candidate sensitivity, back to back, each from a
//! freshly reset vehicle state, and ranks them by performance score.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{COLLISION_PENALTY, TRIAL_TIMEOUT_SECS};
use crate::settings::SimParams;
use crate::sim::{Course, JitterSource, RngState, RunPhase, StepInput, VehicleState, step};

/// Lower is better: seconds taken plus a fixed penalty per collision
#[inline]
pub fn performance_score(elapsed_time: f32, collision_count: u32) -> f32 {
    elapsed_time + collision_count as f32 * COLLISION_PENALTY
}

/// Outcome of a single trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub sensitivity: f32,
    /// Simulated seconds (the timeout if the run timed out)
    pub elapsed_time: f32,
    pub collision_count: u32,
    pub performance_score: f32,
    /// `Completed` or `TimedOut`
    pub outcome: RunPhase,
}

impl RunResult {
    fn from_state(sensitivity: f32, state: &VehicleState) -> Self {
        Self {
            sensitivity,
            elapsed_time: state.elapsed,
            collision_count: state.collisions,
            performance_score: performance_score(state.elapsed, state.collisions),
            outcome: state.phase,
        }
    }
}

/// Run one trial to completion or timeout.
///
/// `should_abort` is polled once per step; returns `None` if it fires.
pub fn run_trial<J: JitterSource + ?Sized>(
    course: &Course,
    params: &SimParams,
    sensitivity: f32,
    jitter: &mut J,
    should_abort: &mut dyn FnMut() -> bool,
) -> Option<RunResult> {
    let mut params = params.with_sensitivity(sensitivity);
    params.timeout_secs = params.timeout_secs.or(Some(TRIAL_TIMEOUT_SECS));

    let mut state = VehicleState::new(course);
    let input = StepInput::default();

    while !state.is_finished() {
        if should_abort() {
            log::info!("Trial with sensitivity {sensitivity} aborted");
            return None;
        }
        step(&mut state, &input, course, &params, jitter);
    }

    Some(RunResult::from_state(sensitivity, &state))
}

/// Results of a sweep, in candidate order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepOutcome {
    pub results: Vec<RunResult>,
    /// True if the sweep stopped early; `results` holds the finished trials
    pub aborted: bool,
}

impl SweepOutcome {
    /// Lowest score; ties go to the earliest candidate
    pub fn best(&self) -> Option<&RunResult> {
        self.results
            .iter()
            .min_by(|a, b| a.performance_score.total_cmp(&b.performance_score))
    }

    /// Plain-text results table
    pub fn summary_table(&self) -> String {
        self.to_string()
    }

    /// Write the results as pretty JSON
    pub fn save_report(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Sweep report saved to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for SweepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sensitivity | Time (s) | Collisions | Score   | Outcome")?;
        writeln!(f, "{}", "-".repeat(60))?;
        for r in &self.results {
            writeln!(
                f,
                "{:<11.1} | {:<8.2} | {:<10} | {:<7.2} | {}",
                r.sensitivity,
                r.elapsed_time,
                r.collision_count,
                r.performance_score,
                r.outcome.as_str()
            )?;
        }
        match self.best() {
            Some(best) => writeln!(
                f,
                "\nBest sensitivity: {:.1} (Score: {:.2})",
                best.sensitivity, best.performance_score
            ),
            None => writeln!(f, "\nNo completed trials"),
        }
    }
}

/// Run every candidate in order with a given jitter source per trial
pub fn run_sweep_with<J, F>(
    course: &Course,
    params: &SimParams,
    candidates: &[f32],
    mut make_jitter: F,
    should_abort: &mut dyn FnMut() -> bool,
) -> SweepOutcome
where
    J: JitterSource,
    F: FnMut() -> J,
{
    let mut outcome = SweepOutcome::default();

    for &sensitivity in candidates {
        log::info!("Running trial with sensitivity = {sensitivity}");
        let mut jitter = make_jitter();
        match run_trial(course, params, sensitivity, &mut jitter, should_abort) {
            Some(result) => {
                log::info!(
                    "Sensitivity {}: {} in {:.2}s with {} collisions (score {:.2})",
                    sensitivity,
                    result.outcome.as_str(),
                    result.elapsed_time,
                    result.collision_count,
                    result.performance_score
                );
                outcome.results.push(result);
            }
            None => {
                outcome.aborted = true;
                break;
            }
        }
    }

    if let Some(best) = outcome.best() {
        log::info!(
            "Best sensitivity: {} (score {:.2})",
            best.sensitivity,
            best.performance_score
        );
    }

    outcome
}

/// Run every candidate in order.
///
/// Each trial gets a fresh `Pcg32` from `seed`, so all candidates face the same
/// recovery kicks and re-running a candidate reproduces its result.
pub fn run_sweep(
    course: &Course,
    params: &SimParams,
    candidates: &[f32],
    seed: u64,
    should_abort: &mut dyn FnMut() -> bool,
) -> SweepOutcome {
    let rng_state = RngState::new(seed);
    run_sweep_with::<Pcg32, _>(course, params, candidates, || rng_state.to_rng(), should_abort)
}
