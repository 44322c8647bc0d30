//! One frame of command recording.
//!
//! [`Frame`] acquires the surface texture, hands out the single clearing
//! render pass the orrery draws in, then submits and presents.

use crate::depth::DepthBuffer;
use crate::gpu::{RenderContext, SurfaceError};

/// Color attachment operations: clear to `color`, keep the result.
pub fn color_ops(color: wgpu::Color) -> wgpu::Operations<wgpu::Color> {
    wgpu::Operations {
        load: wgpu::LoadOp::Clear(color),
        store: wgpu::StoreOp::Store,
    }
}

/// An acquired surface texture plus the encoder recording into it.
pub struct Frame<'ctx> {
    queue: &'ctx wgpu::Queue,
    encoder: Option<wgpu::CommandEncoder>,
    surface_texture: Option<wgpu::SurfaceTexture>,
    view: wgpu::TextureView,
}

impl<'ctx> Frame<'ctx> {
    /// Acquire the next surface texture.
    pub fn begin(ctx: &'ctx RenderContext) -> Result<Self, SurfaceError> {
        let surface_texture = ctx.acquire_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("orrery-frame"),
            });

        Ok(Self {
            queue: &ctx.queue,
            encoder: Some(encoder),
            surface_texture: Some(surface_texture),
            view,
        })
    }

    /// Begin a pass that clears color and depth.
    ///
    /// Returns `None` once the frame has been presented.
    pub fn clear_pass<'a>(
        &'a mut self,
        label: &'static str,
        clear_color: wgpu::Color,
        depth: &'a DepthBuffer,
    ) -> Option<wgpu::RenderPass<'a>> {
        let encoder = self.encoder.as_mut()?;
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: &self.view,
            resolve_target: None,
            ops: color_ops(clear_color),
            depth_slice: None,
        };
        Some(encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment: Some(depth.attachment()),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        }))
    }

    /// Submit the recorded commands and present.
    pub fn present(mut self) {
        self.finish();
    }

    fn finish(&mut self) -> bool {
        let (Some(encoder), Some(surface_texture)) =
            (self.encoder.take(), self.surface_texture.take())
        else {
            return false;
        };
        self.queue.submit([encoder.finish()]);
        surface_texture.present();
        true
    }
}

impl Drop for Frame<'_> {
    fn drop(&mut self) {
        if self.finish() {
            log::warn!("Frame dropped before present(), submitted anyway");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_ops_clear_and_store() {
        let ops = color_ops(wgpu::Color::BLACK);
        assert!(matches!(ops.load, wgpu::LoadOp::Clear(c) if c == wgpu::Color::BLACK));
        assert!(matches!(ops.store, wgpu::StoreOp::Store));
    }

    #[test]
    fn test_color_ops_keeps_custom_color() {
        let color = wgpu::Color {
            r: 0.02,
            g: 0.02,
            b: 0.05,
            a: 1.0,
        };
        let ops = color_ops(color);
        assert!(matches!(ops.load, wgpu::LoadOp::Clear(c) if c == color));
    }
}
