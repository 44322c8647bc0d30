//! Scene: bodies, playback clock, camera and the live scale mode.

use glam::Vec3;
use orrery_config::{Config, MaterialPolicy, SceneConfig};
use orrery_render::{Camera, SphereInstance};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use crate::body::Body;
use crate::playback::Playback;
use crate::trajectory::Trajectory;

/// Multiplicative step applied to a body's scale per key press.
pub const SCALE_FACTOR: f32 = 1.1;

/// Direction digit keys scale a body in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    #[default]
    Increase,
    Decrease,
}

/// Everything the frame loop and input handler mutate.
#[derive(Debug, Clone)]
pub struct Scene {
    pub bodies: Vec<Body>,
    pub playback: Playback,
    pub camera: Camera,
    pub scale_mode: ScaleMode,
    /// Eye translation per key press, as a fraction of the view bound.
    pub pan_fraction: f32,
    /// Length of the shortest trajectory; rows are clamped to it.
    shortest_len: usize,
}

impl Scene {
    /// Build the scene from config and trajectories loaded in body order.
    pub fn from_config(config: &Config, trajectories: Vec<Trajectory>) -> Self {
        let colors = resolve_colors(&config.scene);
        let bodies: Vec<Body> = config
            .scene
            .bodies
            .iter()
            .zip(trajectories)
            .zip(colors)
            .map(|((body, trajectory), color)| {
                Body::new(body.name.clone(), trajectory, body.scale, color)
            })
            .collect();

        let cam = &config.camera;
        let camera = Camera::new(
            Vec3::from_array(cam.eye),
            Vec3::from_array(cam.view_dir),
            Vec3::from_array(cam.up),
            config.render.view_bound,
        );
        let playback = Playback::new(
            config.playback.step_multiplier,
            config.playback.speed_step,
            config.playback.start_paused,
        );

        Self::new(bodies, playback, camera, cam.pan_fraction)
    }

    pub fn new(bodies: Vec<Body>, playback: Playback, camera: Camera, pan_fraction: f32) -> Self {
        let shortest_len = bodies
            .iter()
            .map(|b| b.trajectory.len())
            .min()
            .unwrap_or(0);
        info!(
            "Scene: {} bodies, {} playable rows",
            bodies.len(),
            shortest_len
        );

        Self {
            bodies,
            playback,
            camera,
            scale_mode: ScaleMode::default(),
            pan_fraction,
            shortest_len,
        }
    }

    /// Advance playback by one fixed tick.
    pub fn tick(&mut self) {
        self.playback.tick();
        let row = self.current_row();
        for body in &self.bodies {
            trace!(body = %body.name, row, position = ?body.position(row));
        }
    }

    /// Row shared by every body this frame.
    pub fn current_row(&self) -> usize {
        self.playback.row(self.shortest_len)
    }

    pub fn shortest_len(&self) -> usize {
        self.shortest_len
    }

    /// Draw parameters for every body, in body order.
    pub fn instances(&self) -> Vec<SphereInstance> {
        let row = self.current_row();
        self.bodies.iter().map(|b| b.instance(row)).collect()
    }

    /// Scale body `index` by [`SCALE_FACTOR`] in the current mode.
    /// Returns `false` if there is no such body.
    pub fn scale_body(&mut self, index: usize) -> bool {
        let mode = self.scale_mode;
        let Some(body) = self.bodies.get_mut(index) else {
            debug!("No body {index} to scale");
            return false;
        };
        match mode {
            ScaleMode::Increase => body.scale *= SCALE_FACTOR,
            ScaleMode::Decrease => body.scale /= SCALE_FACTOR,
        }
        debug!("{} scale now {:e}", body.name, body.scale);
        true
    }
}

/// One material color per configured body.
///
/// Random colors draw each channel from `[0.3, 1.0)`; the seed is logged so a
/// run can be reproduced by putting it in the config.
pub fn resolve_colors(scene: &SceneConfig) -> Vec<Vec3> {
    match &scene.material {
        MaterialPolicy::Fixed => scene
            .bodies
            .iter()
            .map(|body| match body.color {
                Some(color) => Vec3::from_array(color).clamp(Vec3::ZERO, Vec3::ONE),
                None => {
                    warn!("Body '{}' has no color under a fixed material policy", body.name);
                    Vec3::ONE
                }
            })
            .collect(),
        MaterialPolicy::Random { seed } => {
            let seed = seed.unwrap_or_else(rand::random);
            info!("Material seed {seed}");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            scene
                .bodies
                .iter()
                .map(|_| {
                    Vec3::new(
                        0.3 + 0.7 * rng.random::<f32>(),
                        0.3 + 0.7 * rng.random::<f32>(),
                        0.3 + 0.7 * rng.random::<f32>(),
                    )
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use orrery_config::BodyConfig;
    use std::path::PathBuf;

    fn line(n: usize, axis: DVec3) -> Trajectory {
        Trajectory::from_positions((0..n).map(|i| axis * i as f64).collect())
    }

    fn scene_with_lengths(lengths: &[usize]) -> Scene {
        let mut config = Config::default();
        config.scene.material = MaterialPolicy::Random { seed: Some(7) };
        config.scene.bodies.truncate(lengths.len());
        let trajectories = lengths.iter().map(|&n| line(n, DVec3::X)).collect();
        Scene::from_config(&config, trajectories)
    }

    #[test]
    fn test_row_clamped_to_shortest_table() {
        let mut scene = scene_with_lengths(&[1000, 300, 500]);
        assert_eq!(scene.shortest_len(), 300);
        for _ in 0..10 {
            scene.tick();
        }
        // default step multiplier is 100
        assert_eq!(scene.current_row(), 299);
        let instances = scene.instances();
        assert_eq!(instances.len(), 3);
        for instance in &instances {
            assert_eq!(instance.position, Vec3::new(299.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_scale_increase_then_decrease_restores() {
        let mut scene = scene_with_lengths(&[10, 10]);
        let original = scene.bodies[1].scale;

        assert!(scene.scale_body(1));
        assert!((scene.bodies[1].scale - original * 1.1).abs() / original < 1e-6);

        scene.scale_mode = ScaleMode::Decrease;
        assert!(scene.scale_body(1));
        assert!((scene.bodies[1].scale - original).abs() / original < 1e-6);
        assert_eq!(scene.bodies[0].scale, 1.0e10);
    }

    #[test]
    fn test_scale_missing_body_is_ignored() {
        let mut scene = scene_with_lengths(&[10]);
        let before: Vec<f32> = scene.bodies.iter().map(|b| b.scale).collect();
        assert!(!scene.scale_body(8));
        let after: Vec<f32> = scene.bodies.iter().map(|b| b.scale).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_empty_scene_draws_nothing() {
        let mut scene = scene_with_lengths(&[]);
        scene.tick();
        assert_eq!(scene.current_row(), 0);
        assert!(scene.instances().is_empty());
    }

    #[test]
    fn test_camera_from_config() {
        let scene = scene_with_lengths(&[5]);
        assert_eq!(scene.camera.eye, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(scene.camera.view_dir, Vec3::NEG_Z);
        assert_eq!(scene.camera.view_bound, 2.0e11);
        assert_eq!(scene.pan_fraction, 0.05);
    }

    #[test]
    fn test_random_colors_in_range_and_seeded() {
        let mut config = SceneConfig {
            material: MaterialPolicy::Random { seed: Some(42) },
            ..SceneConfig::default()
        };
        config.bodies.extend((0..20).map(|i| BodyConfig {
            name: format!("rock-{i}"),
            file: PathBuf::from("rock.txt"),
            scale: 1.0,
            color: None,
        }));

        let first = resolve_colors(&config);
        assert_eq!(first.len(), 23);
        for color in &first {
            for channel in color.to_array() {
                assert!((0.3..1.0).contains(&channel), "channel {channel}");
            }
        }
        assert_eq!(first, resolve_colors(&config));
    }

    #[test]
    fn test_fixed_colors_come_from_config() {
        let mut config = SceneConfig {
            material: MaterialPolicy::Fixed,
            ..SceneConfig::default()
        };
        config.bodies[0].color = Some([1.0, 0.9, 0.2]);

        let colors = resolve_colors(&config);
        assert_eq!(colors[0], Vec3::new(1.0, 0.9, 0.2));
        assert_eq!(colors[1], Vec3::ONE);
    }
}
