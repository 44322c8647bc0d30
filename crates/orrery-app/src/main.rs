//! Orrery viewer: plays back recorded orbits as shaded spheres.

use std::process::ExitCode;

use clap::Parser;
use orrery_app::{PlatformDirs, run};
use orrery_config::{CliArgs, Config};
use orrery_scene::{Scene, load_trajectories};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve(args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to resolve config directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create {}: {e}", dirs.config_dir.display());
    }

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    if let Err(e) = config.apply_cli_overrides(&args) {
        eprintln!("Invalid command line: {e}");
        return ExitCode::FAILURE;
    }

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Config directory: {}", dirs.config_dir.display());

    let paths = config.scene.trajectory_paths();
    let trajectories = match load_trajectories(&paths) {
        Ok(trajectories) => trajectories,
        Err(e) => {
            error!("{e}, refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let scene = Scene::from_config(&config, trajectories);
    match run(&config, scene) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
