//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it creates the
//! fixed-size window and GPU state on resume, routes key presses through
//! the input table, and on every redraw runs the due ticks and draws the
//! scene. Each redraw requests the next one.

use std::sync::Arc;

use orrery_config::{Config, RenderConfig, WindowConfig};
use orrery_input::{Control, RawKeyEvent, action_for_event, apply};
use orrery_render::{
    FrameError, RenderContext, RenderContextError, ShaderError, ShaderLibrary, SphereRenderer,
    SurfaceError, init_render_context_blocking,
};
use orrery_scene::Scene;
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::game_loop::GameLoop;

/// Ticks between playback diagnostics.
const DIAGNOSTIC_INTERVAL: u64 = 120;

/// Failures that stop the viewer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    RenderContext(#[from] RenderContextError),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("frame failed: {0}")]
    Frame(#[from] FrameError),
}

/// Fixed-size, non-resizable window attributes.
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_resizable(false)
}

/// Opaque clear color from the render config.
pub fn clear_color_from_config(config: &RenderConfig) -> wgpu::Color {
    let [r, g, b] = config.clear_color;
    wgpu::Color { r, g, b, a: 1.0 }
}

/// Application state driven by the winit event loop.
pub struct AppState {
    window_config: WindowConfig,
    subdivisions: u32,
    clear_color: wgpu::Color,
    scene: Scene,
    game_loop: GameLoop,
    shaders: ShaderLibrary,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    renderer: Option<SphereRenderer>,
    /// First fatal error, reported once the event loop returns.
    failure: Option<AppError>,
}

impl AppState {
    pub fn new(config: &Config, scene: Scene) -> Self {
        Self {
            window_config: config.window.clone(),
            subdivisions: config.render.sphere_subdivisions,
            clear_color: clear_color_from_config(&config.render),
            scene,
            game_loop: GameLoop::new(),
            shaders: ShaderLibrary::new(),
            window: None,
            gpu: None,
            renderer: None,
            failure: None,
        }
    }

    /// The scene being played back.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attrs = window_attributes_from_config(&self.window_config);
        let window = Arc::new(event_loop.create_window(attrs)?);
        let size = window.inner_size();
        info!("Window created: {}x{}", size.width, size.height);

        let ctx = init_render_context_blocking(window.clone(), self.window_config.vsync)?;
        let renderer = SphereRenderer::new(&ctx, &mut self.shaders, self.subdivisions)?;

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(ctx);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.failure.get_or_insert(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let scene = &mut self.scene;
        self.game_loop.frame(|tick| {
            scene.tick();
            if tick.is_multiple_of(DIAGNOSTIC_INTERVAL) {
                debug!(
                    tick,
                    row = scene.current_row(),
                    step = scene.playback.step_multiplier(),
                    paused = scene.playback.is_paused(),
                    "Playback"
                );
            }
        });

        let (Some(ctx), Some(renderer)) = (&self.gpu, &mut self.renderer) else {
            return;
        };
        let instances = self.scene.instances();
        match renderer.draw(ctx, &self.scene.camera, &instances, self.clear_color) {
            Ok(()) => {}
            Err(FrameError::MatrixStack(e)) => {
                error!("Skipping frame: {e}");
            }
            Err(FrameError::Surface(SurfaceError::Timeout)) => {
                warn!("Surface timeout, skipping frame");
            }
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.failure.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let Some(action) = action_for_event(RawKeyEvent::from(&event)) else {
                    return;
                };
                if apply(&mut self.scene, action) == Control::Quit {
                    info!("Quit requested, shutting down");
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Create the event loop and play back `scene` until the window closes.
///
/// # Errors
///
/// Returns the first fatal error: event loop, window or GPU creation,
/// shader compilation, or a lost surface.
#[instrument(skip_all)]
pub fn run(config: &Config, scene: Scene) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, scene);
    event_loop.run_app(&mut app)?;
    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
