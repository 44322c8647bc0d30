//! Phong-shaded sphere pipeline.
//!
//! One [`SphereUniforms`] block per instance lives in a shared uniform
//! buffer; each draw selects its block with a dynamic offset at
//! `@group(0) @binding(0)`. Lighting is computed per fragment in view space.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::buffer::VertexPositionNormal;
use crate::depth::DepthBuffer;

/// Material shininess exponent.
pub const SHININESS: f32 = 32.0;

/// Per-instance uniform block. Matches `Uniforms` in [`SPHERE_SHADER_SOURCE`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SphereUniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Inverse-transpose of the model-view's upper 3×3 with the uniform scale
    /// divided out, one padded column per entry.
    pub normal_matrix: [[f32; 4]; 3],
    /// Light position in view space (w = 1).
    pub light_position: [f32; 4],
    pub ambient_product: [f32; 4],
    pub diffuse_product: [f32; 4],
    /// Specular light × material; `w` carries the shininess exponent.
    pub specular_product: [f32; 4],
}

/// Light colors shared by every instance.
pub const LIGHT_AMBIENT: Vec3 = Vec3::splat(0.5);
pub const LIGHT_DIFFUSE: Vec3 = Vec3::ONE;
pub const LIGHT_SPECULAR: Vec3 = Vec3::ONE;

/// Material diffuse color shared by every instance.
pub const MATERIAL_DIFFUSE: Vec3 = Vec3::splat(0.4);

impl SphereUniforms {
    /// Build the block for one instance from its model-view matrix, the
    /// frame's projection, the view-space light position and the body color.
    ///
    /// The material uses the color as ambient, a fixed grey diffuse and
    /// `0.2 * color` specular.
    pub fn new(model_view: Mat4, projection: Mat4, light_position: Vec4, color: Vec3) -> Self {
        // Divide out the body scale first; at planetary scales the raw
        // determinant overflows f32.
        let upper = Mat3::from_mat4(model_view);
        let unit = upper * upper.x_axis.length().max(f32::MIN_POSITIVE).recip();
        let normal = unit.inverse().transpose();
        let material_specular = color * 0.2;

        Self {
            model_view: model_view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            normal_matrix: [
                normal.x_axis.extend(0.0).to_array(),
                normal.y_axis.extend(0.0).to_array(),
                normal.z_axis.extend(0.0).to_array(),
            ],
            light_position: light_position.to_array(),
            ambient_product: (LIGHT_AMBIENT * color).extend(1.0).to_array(),
            diffuse_product: (LIGHT_DIFFUSE * MATERIAL_DIFFUSE).extend(1.0).to_array(),
            specular_product: (LIGHT_SPECULAR * material_specular)
                .extend(SHININESS)
                .to_array(),
        }
    }

    /// Size of one block in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Distance between consecutive blocks in the shared buffer, rounded up
    /// to the device's dynamic-offset alignment.
    pub fn stride(min_alignment: u32) -> u64 {
        let align = u64::from(min_alignment.max(1));
        Self::SIZE.div_ceil(align) * align
    }
}

/// Render pipeline plus the bind group layout for the per-instance block.
pub struct SpherePipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub uniform_bind_group_layout: wgpu::BindGroupLayout,
}

impl SpherePipeline {
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("sphere-uniform-bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: NonZeroU64::new(SphereUniforms::SIZE),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sphere-pipeline-layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sphere-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[VertexPositionNormal::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(DepthBuffer::stencil_state()),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            uniform_bind_group_layout,
        }
    }
}

/// WGSL source for Phong-shaded spheres.
pub const SPHERE_SHADER_SOURCE: &str = r#"
struct Uniforms {
    model_view: mat4x4<f32>,
    projection: mat4x4<f32>,
    normal_x: vec4<f32>,
    normal_y: vec4<f32>,
    normal_z: vec4<f32>,
    light_position: vec4<f32>,
    ambient_product: vec4<f32>,
    diffuse_product: vec4<f32>,
    specular_product: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> u: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) view_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let view_pos = u.model_view * vec4<f32>(in.position, 1.0);
    let normal_matrix = mat3x3<f32>(u.normal_x.xyz, u.normal_y.xyz, u.normal_z.xyz);

    var out: VertexOutput;
    out.clip_position = u.projection * view_pos;
    out.view_position = view_pos.xyz;
    out.normal = normal_matrix * in.normal;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let l = normalize(u.light_position.xyz - in.view_position);
    let e = normalize(-in.view_position);
    let h = normalize(l + e);

    let ambient = u.ambient_product.rgb;

    let kd = max(dot(l, n), 0.0);
    let diffuse = kd * u.diffuse_product.rgb;

    var specular = pow(max(dot(n, h), 0.0), u.specular_product.w) * u.specular_product.rgb;
    if dot(l, n) < 0.0 {
        specular = vec3<f32>(0.0);
    }

    return vec4<f32>(ambient + diffuse + specular, 1.0);
}
"#;
