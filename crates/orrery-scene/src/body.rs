//! A single orbiting body.

use glam::{DVec3, Vec3};
use orrery_render::SphereInstance;

use crate::trajectory::Trajectory;

/// A body following a recorded trajectory. Scale and color may change at
/// runtime; the trajectory never does.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub trajectory: Trajectory,
    /// Uniform display scale (sphere radius in world units).
    pub scale: f32,
    /// Material color, each channel in `[0, 1]`.
    pub color: Vec3,
}

impl Body {
    pub fn new(name: impl Into<String>, trajectory: Trajectory, scale: f32, color: Vec3) -> Self {
        Self {
            name: name.into(),
            trajectory,
            scale,
            color,
        }
    }

    /// Recorded position at `row`.
    pub fn position(&self, row: usize) -> DVec3 {
        self.trajectory.position(row)
    }

    /// Draw parameters for this body at `row`.
    pub fn instance(&self, row: usize) -> SphereInstance {
        SphereInstance {
            position: self.position(row).as_vec3(),
            scale: self.scale,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_uses_row_position() {
        let trajectory = Trajectory::from_positions(vec![
            DVec3::new(1.0e11, 0.0, 0.0),
            DVec3::new(0.0, 1.0e11, 0.0),
        ]);
        let body = Body::new("earth", trajectory, 1.0e9, Vec3::new(0.2, 0.4, 0.9));

        let instance = body.instance(1);
        assert_eq!(instance.position, Vec3::new(0.0, 1.0e11, 0.0));
        assert_eq!(instance.scale, 1.0e9);
        assert_eq!(instance.color, Vec3::new(0.2, 0.4, 0.9));
    }
}
