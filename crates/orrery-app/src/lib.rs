//! Orrery application: platform directories, the fixed-timestep frame loop
//! and the winit window that drives playback and rendering.

pub mod game_loop;
pub mod platform;
pub mod window;

pub use game_loop::{FIXED_DT, GameLoop, MAX_FRAME_TIME};
pub use platform::{PlatformDirs, PlatformError};
pub use window::{AppError, AppState, run};
