//! Command-line interface for the headless runner

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::settings::{Settings, UserInputs};

/// Braitenberg vehicle maze runner
///
/// Rendering lives outside this crate; this only drives the simulation and
/// reports results. Set `RUST_LOG=info` (or `debug` for per-collision detail)
/// to see progress.
#[derive(Parser, Debug)]
#[command(name = "braitenberg-maze")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub mode: Mode,

    /// Settings file (JSON); defaults are used when absent or unreadable
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(flatten)]
    pub inputs: InputArgs,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Run one trial per sensitivity candidate and rank them
    Sweep,
    /// Single autonomous run through the standard maze
    Run,
    /// Write the default settings file
    InitConfig {
        /// Output path
        #[arg(default_value = "settings.json")]
        path: PathBuf,
    },
}

/// The four vehicle scalars.
///
/// Taken as text so a malformed value falls back to the default with a
/// warning instead of aborting.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Robot max speed (default 5)
    #[arg(long, global = true)]
    pub max_speed: Option<String>,

    /// Turning rate in degrees per step (default 2)
    #[arg(long, global = true)]
    pub turn_rate: Option<String>,

    /// Sensor range (default 150)
    #[arg(long, global = true)]
    pub sensor_range: Option<String>,

    /// Sensitivity factor, 0.2-1.0 (default 0.6)
    #[arg(long, global = true)]
    pub sensitivity: Option<String>,
}

impl InputArgs {
    pub fn to_user_inputs(&self) -> UserInputs {
        UserInputs::parse(
            self.max_speed.as_deref(),
            self.turn_rate.as_deref(),
            self.sensor_range.as_deref(),
            self.sensitivity.as_deref(),
        )
    }
}

impl Cli {
    /// Settings from the file (if any) with command-line scalars applied
    pub fn resolve_settings(&self) -> Settings {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path),
            None => Settings::default(),
        };
        settings.params = settings.params.with_user_inputs(&self.inputs.to_user_inputs());
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_is_not_a_mode() {
        let err = Cli::try_parse_from(["braitenberg-maze", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = Cli::try_parse_from(["braitenberg-maze", "run", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_modes() {
        let cli = Cli::try_parse_from(["braitenberg-maze", "sweep"]).unwrap();
        assert_eq!(cli.mode, Mode::Sweep);

        let cli = Cli::try_parse_from(["braitenberg-maze", "init-config"]).unwrap();
        assert_eq!(
            cli.mode,
            Mode::InitConfig {
                path: PathBuf::from("settings.json")
            }
        );
    }

    #[test]
    fn test_vehicle_flags_apply_over_defaults() {
        let cli = Cli::try_parse_from([
            "braitenberg-maze",
            "run",
            "--max-speed",
            "8",
            "--sensitivity",
            "0.4",
            "--turn-rate",
            "fast",
        ])
        .unwrap();
        let settings = cli.resolve_settings();
        assert_eq!(settings.params.max_speed, 8.0);
        assert_eq!(settings.params.sensitivity, 0.4);
        // Malformed value falls back to the default
        assert_eq!(settings.params.turn_rate, 2.0);
        assert_eq!(settings.params.sensor_range, 150.0);
    }

    #[test]
    fn test_flags_override_settings_file() {
        let path = std::env::temp_dir().join(format!(
            "braitenberg_cli_settings_{}.json",
            std::process::id()
        ));
        let mut file_settings = Settings::default();
        file_settings.params.sensor_range = 90.0;
        file_settings.params.max_speed = 3.0;
        file_settings.save(&path).unwrap();

        let cli = Cli::try_parse_from([
            "braitenberg-maze",
            "sweep",
            "--settings",
            path.to_str().unwrap(),
            "--max-speed",
            "4",
        ])
        .unwrap();
        let settings = cli.resolve_settings();
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings.params.max_speed, 4.0);
        assert_eq!(settings.params.sensor_range, 90.0);
    }
}
