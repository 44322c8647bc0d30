//! wgpu rendering for the orrery: device setup, the shared sphere mesh, the
//! Phong sphere pipeline, and per-frame instance drawing.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod matrix_stack;
pub mod pass;
pub mod renderer;
pub mod shader;
pub mod sphere_pipeline;

#[cfg(test)]
mod test_support;

pub use buffer::{BufferAllocator, MeshBuffer, VertexPositionNormal};
pub use camera::{Camera, ROTATE_STEP_DEGREES, ZOOM_FACTOR};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use matrix_stack::{MatrixStack, MatrixStackError};
pub use pass::{Frame, color_ops};
pub use renderer::{FrameError, LIGHT_POSITION, SphereInstance, SphereRenderer, build_draw_list};
pub use shader::{ShaderError, ShaderLibrary};
pub use sphere_pipeline::{SPHERE_SHADER_SOURCE, SpherePipeline, SphereUniforms};
