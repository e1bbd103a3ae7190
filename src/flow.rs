//! Application shell and event loop.
//!
//! [`run`] opens a window, brings up wgpu and hands the party scene to a
//! [`SceneManager`] backed by the [`GpuBackend`]. The scene is prepared once
//! when the window becomes available and rendered on every redraw.
//!
//! # Lifecycle
//!
//! 1. `resumed`: create the window, the GPU context and the backend, then prepare
//! 2. `RedrawRequested`: replay the draw steps, upload changed lighting and present
//! 3. `Resized` and lost surfaces: reconfigure surface, depth buffer and projection
//! 4. `CloseRequested`: release the scene textures and leave the loop

use std::sync::Arc;

use anyhow::Context as _;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    camera::{self, Camera, CameraUniform, Projection},
    config::SceneConfig,
    context::Context,
    gpu::GpuBackend,
    resources::FileImageDecoder,
    scene::{SceneDefinition, SceneManager},
};

/// Everything that exists once the window is up.
pub struct AppState {
    ctx: Context,
    scene: SceneManager<GpuBackend>,
    camera: Camera,
    projection: Projection,
    camera_uniform: CameraUniform,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &SceneConfig) -> anyhow::Result<Self> {
        let mut ctx = Context::new(window, config.clear_colour).await?;
        let size = ctx.window().inner_size();
        ctx.resize(size.width, size.height);

        let backend = GpuBackend::new(&ctx.device, &ctx.queue, ctx.config.format);
        let mut scene = SceneManager::new(backend, SceneDefinition::party());
        scene
            .prepare(&FileImageDecoder, &config.asset_root)
            .with_context(|| {
                format!(
                    "failed to prepare the scene from assets in {:?}",
                    config.asset_root
                )
            })?;

        let (camera, mut projection) = camera::from_config(config);
        projection.resize(ctx.config.width, ctx.config.height);
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera, &projection);
        scene.backend().write_camera(&camera_uniform);

        Ok(Self {
            ctx,
            scene,
            camera,
            projection,
            camera_uniform,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.projection.resize(width, height);
            self.camera_uniform
                .update_view_proj(&self.camera, &self.projection);
            self.scene.backend().write_camera(&self.camera_uniform);
        }
    }

    fn render(&mut self) -> anyhow::Result<Result<(), wgpu::SurfaceError>> {
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.ctx.is_surface_configured() {
            return Ok(Ok(()));
        }

        let report = self.scene.render()?;
        if !report.is_clean() && self.scene.frames() == 1 {
            log::warn!(
                "{} of {} draw steps had problems on the first frame",
                report.issues.len(),
                report.draws
            );
        }
        if let Some(lighting) = self.scene.take_lighting_changes() {
            self.scene.backend().write_lighting(&lighting);
        }

        let output = match self.ctx.surface.get_current_texture() {
            Ok(output) => output,
            Err(e) => {
                // Drop the recorded draws; the next redraw records them again.
                let _ = self.scene.backend_mut().take_pending();
                return Ok(Err(e));
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        let depth_view = self.ctx.depth_texture.view.clone();
        self.scene
            .backend_mut()
            .encode(&mut encoder, &view, &depth_view, self.ctx.clear_colour);
        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(Ok(()))
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: SceneConfig,
    state: Option<AppState>,
    /// Set when the scene could not be brought up; returned from [`run`].
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: SceneConfig) -> anyhow::Result<Self> {
        let async_runtime =
            tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match self
            .async_runtime
            .block_on(AppState::new(window, &self.config))
        {
            Ok(state) => {
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                state.scene.teardown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => match state.render() {
                Ok(Ok(())) => {}
                // Reconfigure the surface if it's lost or outdated
                Ok(Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                }
                Ok(Err(wgpu::SurfaceError::OutOfMemory)) => {
                    self.fail(event_loop, anyhow::anyhow!("the GPU ran out of memory"));
                }
                Ok(Err(e)) => log::error!("Unable to render {}", e),
                Err(e) => self.fail(event_loop, e),
            },
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            state.scene.teardown();
        }
    }
}

/// Open the window and show the party scene until it is closed.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
