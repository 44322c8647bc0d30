//! Apply actions to the scene.

use glam::Vec3;
use orrery_render::ROTATE_STEP_DEGREES;
use orrery_scene::{ScaleMode, Scene};
use tracing::debug;

use crate::action::Action;

/// Whether the event loop should keep running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Mutate the scene for one action.
pub fn apply(scene: &mut Scene, action: Action) -> Control {
    let step = scene.camera.pan_step(scene.pan_fraction);

    match action {
        Action::MoveUp => scene.camera.pan(Vec3::Y * step),
        Action::MoveDown => scene.camera.pan(Vec3::NEG_Y * step),
        Action::MoveLeft => scene.camera.pan(Vec3::NEG_X * step),
        Action::MoveRight => scene.camera.pan(Vec3::X * step),
        Action::MoveForward => scene.camera.pan(Vec3::NEG_Z * step),
        Action::MoveBackward => scene.camera.pan(Vec3::Z * step),
        Action::RotateLeft => scene.camera.rotate_view(ROTATE_STEP_DEGREES),
        Action::RotateRight => scene.camera.rotate_view(-ROTATE_STEP_DEGREES),
        Action::ScaleModeIncrease => scene.scale_mode = ScaleMode::Increase,
        Action::ScaleModeDecrease => scene.scale_mode = ScaleMode::Decrease,
        Action::ScaleBody(index) => {
            scene.scale_body(index);
        }
        Action::ZoomIn => scene.camera.zoom_in(),
        Action::ZoomOut => scene.camera.zoom_out(),
        Action::Faster => scene.playback.faster(),
        Action::Slower => scene.playback.slower(),
        Action::TogglePause => scene.playback.toggle_pause(),
        Action::Reset => scene.playback.reset(),
        Action::Quit => return Control::Quit,
    }

    debug!(?action, "Applied");
    Control::Continue
}
