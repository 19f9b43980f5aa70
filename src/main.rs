//! Braitenberg Maze entry point
//!
//! Headless runner: `braitenberg-maze --help` lists the modes and flags.

use std::path::Path;
use std::time::Instant;

use clap::Parser;

use braitenberg_maze::cli::{Cli, Mode};
use braitenberg_maze::consts::TRIAL_TIMEOUT_SECS;
use braitenberg_maze::sim::{Course, RngState, StepInput, VehicleState, clearance, step};
use braitenberg_maze::{Settings, SimParams, run_sweep};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Mode::InitConfig { path } = &cli.mode {
        if let Err(e) = Settings::default().save(path) {
            log::error!("Failed to write {}: {e}", path.display());
            std::process::exit(1);
        }
        println!("Wrote default settings to {}", path.display());
        return;
    }

    let settings = cli.resolve_settings();
    let course = Course::standard();

    match cli.mode {
        Mode::Sweep => sweep(&course, &settings),
        Mode::Run => single_run(&course, &settings),
        Mode::InitConfig { .. } => {}
    }
}

fn sweep(course: &Course, settings: &Settings) {
    log::info!(
        "Starting sensitivity sweep over {:?}",
        settings.sweep.candidates
    );

    let started = Instant::now();
    let budget = settings.sweep.max_wall_secs;
    let mut out_of_time = || budget.is_some_and(|b| started.elapsed().as_secs_f64() > b);

    let outcome = run_sweep(
        course,
        &settings.params,
        &settings.sweep.candidates,
        settings.sweep.seed,
        &mut out_of_time,
    );

    println!("\nSensitivity Analysis Results:");
    print!("{outcome}");
    if outcome.aborted {
        println!("(sweep stopped early: wall-clock budget exhausted)");
    }

    if let Some(path) = &settings.sweep.report_path {
        if let Err(e) = outcome.save_report(Path::new(path)) {
            log::error!("Failed to write sweep report to {path}: {e}");
        }
    }
}

fn single_run(course: &Course, settings: &Settings) {
    // Always bounded, even if the settings disable the timeout
    let params = &SimParams {
        timeout_secs: settings.params.timeout_secs.or(Some(TRIAL_TIMEOUT_SECS)),
        ..settings.params.clone()
    };
    let mut state = VehicleState::new(course);
    let mut rng = RngState::new(settings.sweep.seed).to_rng();
    let input = StepInput::default();

    log::info!("Autonomous run with sensitivity {}", params.sensitivity);
    while !state.is_finished() {
        step(&mut state, &input, course, params, &mut rng);
    }

    println!(
        "Run {}: time = {:.2}s, collisions = {}, final position = ({:.1}, {:.1}), heading = {:.1}, wall clearance = {:.1}",
        state.phase.as_str(),
        state.elapsed,
        state.collisions,
        state.pose.position.x,
        state.pose.position.y,
        state.pose.display_heading(),
        clearance(state.pose.position, &course.walls)
    );
}
