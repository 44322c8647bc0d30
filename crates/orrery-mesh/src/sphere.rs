//! Unit sphere tessellation by recursive tetrahedron subdivision.

use glam::Vec3;

/// Subdivision depth used when none is configured.
pub const DEFAULT_SUBDIVISIONS: u32 = 6;

/// Deepest subdivision [`generate_sphere`] will build: 262144 triangles.
/// Each level quadruples the vertex count, so deeper meshes exhaust memory
/// long before the vertex count stops fitting a `u32` draw call.
pub const MAX_SUBDIVISIONS: u32 = 8;

/// Flat, non-indexed triangle soup approximating the unit sphere.
///
/// Every three consecutive vertices form one counter-clockwise (outward
/// facing) triangle. The normal of each vertex equals its position.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    /// Vertex positions on the unit sphere.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals (same as positions for a unit sphere).
    pub normals: Vec<Vec3>,
}

impl SphereMesh {
    /// Number of vertices in the soup.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the soup.
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Generate a sphere by subdividing a regular tetrahedron `subdivisions` times.
///
/// Each level splits every triangle into four at its edge midpoints and
/// pushes the midpoints back onto the unit sphere, so depth `d` yields
/// `4 * 4^d` triangles. Depth 6 gives 16384 triangles. Depths beyond
/// [`MAX_SUBDIVISIONS`] are clamped to it.
pub fn generate_sphere(subdivisions: u32) -> SphereMesh {
    let subdivisions = subdivisions.min(MAX_SUBDIVISIONS);
    let a = Vec3::new(1.0, 1.0, 1.0).normalize();
    let b = Vec3::new(-1.0, -1.0, 1.0).normalize();
    let c = Vec3::new(-1.0, 1.0, -1.0).normalize();
    let d = Vec3::new(1.0, -1.0, -1.0).normalize();

    let faces = [[a, c, b], [a, b, d], [a, d, c], [b, c, d]];

    let vertices = 4usize
        .checked_pow(subdivisions)
        .and_then(|n| n.checked_mul(12))
        .unwrap_or(0);
    let mut positions = Vec::with_capacity(vertices);
    for [p, q, r] in faces {
        divide_triangle(p, q, r, subdivisions, &mut positions);
    }

    let normals = positions.clone();
    SphereMesh { positions, normals }
}

fn divide_triangle(a: Vec3, b: Vec3, c: Vec3, depth: u32, out: &mut Vec<Vec3>) {
    if depth == 0 {
        out.extend_from_slice(&[a, b, c]);
        return;
    }

    let ab = (a + b).normalize();
    let bc = (b + c).normalize();
    let ca = (c + a).normalize();

    divide_triangle(a, ab, ca, depth - 1, out);
    divide_triangle(b, bc, ab, depth - 1, out);
    divide_triangle(c, ca, bc, depth - 1, out);
    divide_triangle(ab, bc, ca, depth - 1, out);
}
