//! Scene state for orbital playback: recorded trajectories, the bodies that
//! follow them, the playback clock and the camera.

pub mod body;
pub mod loader;
pub mod playback;
pub mod scene;
pub mod trajectory;

pub use body::Body;
pub use loader::{FileFailure, LoadError, load_trajectories};
pub use playback::Playback;
pub use scene::{SCALE_FACTOR, ScaleMode, Scene, resolve_colors};
pub use trajectory::{Trajectory, TrajectoryError, parse_trajectory};
