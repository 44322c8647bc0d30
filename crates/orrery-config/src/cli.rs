//! Command-line argument parsing for the orrery viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, ConfigError};

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "orrery", about = "Play back recorded orbits as shaded spheres")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Directory containing the trajectory files.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Recorded rows advanced per tick.
    #[arg(long)]
    pub step: Option<u32>,

    /// Sphere mesh subdivision depth.
    #[arg(long)]
    pub subdivisions: Option<u32>,

    /// Start with playback paused.
    #[arg(long)]
    pub paused: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config, then validate the result.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) -> Result<(), ConfigError> {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref dir) = args.data_dir {
            self.scene.data_dir = dir.clone();
        }
        if let Some(step) = args.step {
            self.playback.step_multiplier = step;
        }
        if let Some(depth) = args.subdivisions {
            self.render.sphere_subdivisions = depth;
        }
        if args.paused {
            self.playback.start_paused = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs {
            width: None,
            height: None,
            data_dir: None,
            step: None,
            subdivisions: None,
            paused: false,
            log_level: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1200),
            data_dir: Some(PathBuf::from("/tmp/run-3")),
            step: Some(25),
            paused: true,
            ..empty_args()
        };
        config.apply_cli_overrides(&args).unwrap();
        assert_eq!(config.window.width, 1200);
        assert_eq!(config.scene.data_dir, PathBuf::from("/tmp/run-3"));
        assert_eq!(config.playback.step_multiplier, 25);
        assert!(config.playback.start_paused);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 800);
        assert_eq!(config.render.sphere_subdivisions, 6);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&empty_args()).unwrap();
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_subdivisions_within_limit() {
        let mut config = Config::default();
        let args = CliArgs {
            subdivisions: Some(orrery_mesh::MAX_SUBDIVISIONS),
            ..empty_args()
        };
        config.apply_cli_overrides(&args).unwrap();
        assert_eq!(config.render.sphere_subdivisions, orrery_mesh::MAX_SUBDIVISIONS);
    }

    #[test]
    fn test_cli_rejects_excessive_subdivisions() {
        let args = CliArgs::try_parse_from(["orrery", "--subdivisions", "40"]).unwrap();
        let mut config = Config::default();
        let err = config.apply_cli_overrides(&args).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { value: 40, .. }));
        assert!(err.to_string().contains("render.sphere_subdivisions"), "{err}");
    }

    #[test]
    fn test_cli_parses_flags() {
        let args =
            CliArgs::try_parse_from(["orrery", "--step", "50", "--paused", "--log-level", "debug"])
                .unwrap();
        assert_eq!(args.step, Some(50));
        assert!(args.paused);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.width.is_none());
    }
}
