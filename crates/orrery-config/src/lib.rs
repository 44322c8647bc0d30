//! Configuration system for the orrery viewer.
//!
//! Settings persist to disk as a RON file, every section falls back to its
//! defaults when missing, and CLI flags parsed with clap override the file.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BodyConfig, CameraConfig, Config, DebugConfig, MaterialPolicy, PlaybackConfig, RenderConfig,
    SceneConfig, WindowConfig,
};
pub use error::ConfigError;
