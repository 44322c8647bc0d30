//! Vertex and uniform buffer management.
//!
//! Sphere geometry is drawn non-indexed: the mesh is a flat triangle soup,
//! uploaded once and shared by every instance.

use bytemuck::{Pod, Zeroable};
use orrery_mesh::SphereMesh;

/// A vertex buffer holding a non-indexed triangle list.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl MeshBuffer {
    /// Bind the vertex buffer to slot 0 of a render pass.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
    }

    /// Draw every vertex of the mesh once.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

/// GPU buffer allocator for mesh and uniform buffers.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    /// Create a new buffer allocator with the given device.
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    /// Upload a vertex slice as a non-indexed mesh.
    pub fn create_mesh<V: Pod>(&self, label: &str, vertices: &[V]) -> MeshBuffer {
        use wgpu::util::DeviceExt;

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}-vertices")),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });

        MeshBuffer {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    /// Create an uninitialized uniform buffer of `size` bytes, written via the queue.
    pub fn create_uniform_buffer(&self, label: &str, size: u64) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }
}

/// Vertex format with position and normal.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPositionNormal {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl VertexPositionNormal {
    /// Get the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        use wgpu::{VertexAttribute, VertexFormat};

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexPositionNormal>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x3,
                },
            ],
        }
    }

    /// Interleave a sphere's positions and normals.
    pub fn from_sphere(mesh: &SphereMesh) -> Vec<Self> {
        mesh.positions
            .iter()
            .zip(&mesh.normals)
            .map(|(p, n)| Self {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_device;
    use orrery_mesh::generate_sphere;

    #[test]
    fn test_sphere_mesh_upload_keeps_vertex_count() {
        let Some((device, _queue)) = test_device() else {
            return;
        };
        let allocator = BufferAllocator::new(&device);
        let vertices = VertexPositionNormal::from_sphere(&generate_sphere(2));

        let mesh = allocator.create_mesh("sphere", &vertices);

        assert_eq!(mesh.vertex_count, 4 * 16 * 3);
        assert_eq!(mesh.vertex_buffer.size(), (vertices.len() * 24) as u64);
    }

    #[test]
    fn test_uniform_buffer_usage() {
        let Some((device, _queue)) = test_device() else {
            return;
        };
        let allocator = BufferAllocator::new(&device);
        let buffer = allocator.create_uniform_buffer("uniforms", 1024);
        assert_eq!(buffer.size(), 1024);
        assert!(buffer.usage().contains(wgpu::BufferUsages::UNIFORM));
    }

    #[test]
    fn test_vertex_position_normal_layout() {
        let layout = VertexPositionNormal::layout();
        // position (f32×3) + normal (f32×3) = 24 bytes stride
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);
    }

    #[test]
    fn test_from_sphere_interleaves_in_order() {
        let mesh = generate_sphere(1);
        let vertices = VertexPositionNormal::from_sphere(&mesh);
        assert_eq!(vertices.len(), mesh.vertex_count());
        assert_eq!(vertices[5].position, mesh.positions[5].to_array());
        assert_eq!(vertices[5].normal, mesh.normals[5].to_array());
    }
}
