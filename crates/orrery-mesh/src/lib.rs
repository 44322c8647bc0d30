//! Procedural meshes for the orrery viewer.

pub mod sphere;

pub use sphere::{DEFAULT_SUBDIVISIONS, MAX_SUBDIVISIONS, SphereMesh, generate_sphere};
