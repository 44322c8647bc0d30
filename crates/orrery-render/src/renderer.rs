//! Per-frame sphere instancing.
//!
//! [`build_draw_list`] walks the instances through a [`MatrixStack`] and
//! produces one [`SphereUniforms`] block each; [`SphereRenderer`] uploads
//! those blocks into a single dynamically-offset uniform buffer and draws
//! the shared sphere mesh once per block.

use std::num::NonZeroU64;

use glam::{Vec3, Vec4};
use orrery_mesh::generate_sphere;

use crate::buffer::{BufferAllocator, MeshBuffer, VertexPositionNormal};
use crate::camera::Camera;
use crate::depth::DepthBuffer;
use crate::gpu::{RenderContext, SurfaceError};
use crate::matrix_stack::{MatrixStack, MatrixStackError};
use crate::pass::Frame;
use crate::shader::{ShaderError, ShaderLibrary};
use crate::sphere_pipeline::{SPHERE_SHADER_SOURCE, SpherePipeline, SphereUniforms};

/// World-space light position; transformed into view space every frame.
pub const LIGHT_POSITION: Vec3 = Vec3::new(2.0, 2.0, 2.0);

/// One sphere to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereInstance {
    pub position: Vec3,
    /// Uniform scale (sphere radius in world units).
    pub scale: f32,
    /// Material color, each channel in `[0, 1]`.
    pub color: Vec3,
}

/// A frame that could not be drawn.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("surface: {0}")]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    MatrixStack(#[from] MatrixStackError),
}

/// Compute the uniform block of every instance, in order.
///
/// The stack is loaded with the camera's view matrix. Each instance pushes,
/// takes the light into view space with the pre-instance model-view,
/// translates and scales, records its block, and pops. The stack is
/// balanced on success.
pub fn build_draw_list(
    camera: &Camera,
    instances: &[SphereInstance],
    stack: &mut MatrixStack,
) -> Result<Vec<SphereUniforms>, MatrixStackError> {
    let projection = camera.projection_matrix();
    stack.load(camera.view_matrix());

    let mut draws = Vec::with_capacity(instances.len());
    for instance in instances {
        stack.push();
        let light: Vec4 = stack.current() * LIGHT_POSITION.extend(1.0);
        stack.translate(instance.position);
        stack.scale(Vec3::splat(instance.scale));
        draws.push(SphereUniforms::new(
            stack.current(),
            projection,
            light,
            instance.color,
        ));
        stack.pop()?;
    }

    Ok(draws)
}

/// GPU state for drawing spheres: pipeline, shared mesh, depth buffer and
/// the per-instance uniform buffer.
pub struct SphereRenderer {
    pipeline: SpherePipeline,
    mesh: MeshBuffer,
    depth: DepthBuffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    /// Instances the uniform buffer can hold.
    capacity: usize,
    stride: u64,
    stack: MatrixStack,
    staging: Vec<u8>,
}

impl SphereRenderer {
    /// Compile the sphere shader, build the pipeline and upload a sphere
    /// tessellated `subdivisions` times.
    pub fn new(
        ctx: &RenderContext,
        shaders: &mut ShaderLibrary,
        subdivisions: u32,
    ) -> Result<Self, ShaderError> {
        let device = &ctx.device;
        let shader = shaders.get_or_load(device, "sphere", SPHERE_SHADER_SOURCE)?;
        let pipeline = SpherePipeline::new(device, &shader, ctx.surface_format);

        let sphere = generate_sphere(subdivisions);
        log::info!(
            "Sphere mesh: depth {}, {} triangles",
            subdivisions,
            sphere.triangle_count()
        );
        let mesh = BufferAllocator::new(device)
            .create_mesh("sphere", &VertexPositionNormal::from_sphere(&sphere));

        let (width, height) = ctx.size();
        let depth = DepthBuffer::new(device, width, height);

        let stride =
            SphereUniforms::stride(device.limits().min_uniform_buffer_offset_alignment);
        let capacity = 1;
        let (uniform_buffer, uniform_bind_group) =
            create_uniforms(device, &pipeline, stride, capacity);

        Ok(Self {
            pipeline,
            mesh,
            depth,
            uniform_buffer,
            uniform_bind_group,
            capacity,
            stride,
            stack: MatrixStack::new(),
            staging: Vec::new(),
        })
    }

    /// Clear the surface and depth buffer, then draw every instance.
    pub fn draw(
        &mut self,
        ctx: &RenderContext,
        camera: &Camera,
        instances: &[SphereInstance],
        clear_color: wgpu::Color,
    ) -> Result<(), FrameError> {
        let draws = build_draw_list(camera, instances, &mut self.stack)?;
        self.upload(ctx, &draws);

        let mut frame = Frame::begin(ctx)?;
        if let Some(mut pass) = frame.clear_pass("spheres", clear_color, &self.depth) {
            pass.set_pipeline(&self.pipeline.pipeline);
            self.mesh.bind(&mut pass);
            for i in 0..draws.len() {
                let offset = (i as u64 * self.stride) as u32;
                pass.set_bind_group(0, &self.uniform_bind_group, &[offset]);
                self.mesh.draw(&mut pass);
            }
        }
        frame.present();
        Ok(())
    }

    fn upload(&mut self, ctx: &RenderContext, draws: &[SphereUniforms]) {
        if draws.is_empty() {
            return;
        }
        if draws.len() > self.capacity {
            let capacity = draws.len().next_power_of_two();
            log::debug!("Growing sphere uniform buffer to {capacity} instances");
            let (buffer, bind_group) =
                create_uniforms(&ctx.device, &self.pipeline, self.stride, capacity);
            self.uniform_buffer = buffer;
            self.uniform_bind_group = bind_group;
            self.capacity = capacity;
        }

        let stride = self.stride as usize;
        self.staging.clear();
        self.staging.resize(stride * draws.len(), 0);
        for (i, block) in draws.iter().enumerate() {
            let start = i * stride;
            self.staging[start..start + SphereUniforms::SIZE as usize]
                .copy_from_slice(bytemuck::bytes_of(block));
        }
        ctx.queue.write_buffer(&self.uniform_buffer, 0, &self.staging);
    }
}

fn create_uniforms(
    device: &wgpu::Device,
    pipeline: &SpherePipeline,
    stride: u64,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = BufferAllocator::new(device)
        .create_uniform_buffer("sphere-uniforms", stride * capacity as u64);

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("sphere-uniform-bind-group"),
        layout: &pipeline.uniform_bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: NonZeroU64::new(SphereUniforms::SIZE),
            }),
        }],
    });

    (buffer, bind_group)
}
