//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use orrery_mesh::{DEFAULT_SUBDIVISIONS, MAX_SUBDIVISIONS};

use crate::error::ConfigError;

const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Rendering settings.
    pub render: RenderConfig,
    /// Playback settings.
    pub playback: PlaybackConfig,
    /// Initial camera placement.
    pub camera: CameraConfig,
    /// Bodies and their trajectory files.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration. The window is created at this size and never resized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in physical pixels.
    pub width: u32,
    /// Window height in physical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Subdivision depth of the shared sphere mesh.
    pub sphere_subdivisions: u32,
    /// Initial half-extent of the orthographic view volume, in world units.
    pub view_bound: f32,
    /// Background clear color (linear RGB).
    pub clear_color: [f64; 3],
}

/// Playback configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Recorded rows advanced per tick.
    pub step_multiplier: u32,
    /// Amount added to or removed from the step multiplier per speed key press.
    pub speed_step: u32,
    /// Start with playback paused.
    pub start_paused: bool,
}

/// Initial camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position.
    pub eye: [f32; 3],
    /// Viewing direction (need not be normalized).
    pub view_dir: [f32; 3],
    /// Up vector.
    pub up: [f32; 3],
    /// Eye translation per key press, as a fraction of the view bound.
    pub pan_fraction: f32,
}

/// How body material colors are chosen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MaterialPolicy {
    /// Use each body's configured `color`.
    Fixed,
    /// Draw a random color per body, each channel in `[0.3, 1.0)`.
    /// A `None` seed picks a fresh seed every launch.
    Random { seed: Option<u64> },
}

/// One body to display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyConfig {
    /// Display name used in logs.
    pub name: String,
    /// Trajectory file, relative to [`SceneConfig::data_dir`].
    pub file: PathBuf,
    /// Uniform display scale (sphere radius in world units).
    pub scale: f32,
    /// Material color used under [`MaterialPolicy::Fixed`].
    #[serde(default)]
    pub color: Option<[f32; 3]>,
}

/// Scene configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Directory the trajectory files are resolved against.
    pub data_dir: PathBuf,
    /// Material color policy.
    pub material: MaterialPolicy,
    /// Bodies in draw order. Index `i` is addressed by digit key `i + 1`.
    pub bodies: Vec<BodyConfig>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            vsync: true,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sphere_subdivisions: DEFAULT_SUBDIVISIONS,
            view_bound: 2.0e11,
            clear_color: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            step_multiplier: 100,
            speed_step: 10,
            start_paused: false,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 10.0],
            view_dir: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            pan_fraction: 0.05,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let base_scale = 1.0e10_f32;
        let bodies = ["sun", "planet-1", "planet-2"]
            .iter()
            .enumerate()
            .map(|(i, name)| BodyConfig {
                name: (*name).to_string(),
                file: PathBuf::from(format!("body_num_{i}.txt")),
                scale: base_scale / (5 * i + 1) as f32,
                color: None,
            })
            .collect();

        Self {
            data_dir: PathBuf::from("."),
            material: MaterialPolicy::Random { seed: None },
            bodies,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl SceneConfig {
    /// Resolve every body's trajectory path against `data_dir`, in body order.
    pub fn trajectory_paths(&self) -> Vec<PathBuf> {
        self.bodies
            .iter()
            .map(|body| self.data_dir.join(&body.file))
            .collect()
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::ReadError {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config =
                ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
                    path: config_path.clone(),
                    source,
                })?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let write_error = |source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        };

        std::fs::create_dir_all(config_dir).map_err(write_error)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(write_error)?;
        Ok(())
    }

    /// Reject settings that parse but cannot be honored.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let depth = self.render.sphere_subdivisions;
        if depth > MAX_SUBDIVISIONS {
            return Err(ConfigError::OutOfRange {
                field: "render.sphere_subdivisions",
                value: depth,
                max: MAX_SUBDIVISIONS,
            });
        }
        Ok(())
    }
}
