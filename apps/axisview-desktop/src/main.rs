use anyhow::Result;
use axisview_input::{CameraInput, PointerTracker};
use axisview_render_wgpu::{WgpuBackend, WgpuSurface, WindowRegion};
use axisview_viewport::{
    HostPage, HostSignal, ReadyState, SceneBootstrapper, Viewport, ViewportConfig,
};
use clap::Parser;
use glam::Vec2;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Pixels of trackpad scroll per wheel unit.
const PIXELS_PER_WHEEL_UNIT: f32 = 40.0;

#[derive(Parser)]
#[command(name = "axisview-desktop", about = "Axis viewport in a desktop window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Viewport config file (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Texture for the rotating box
    #[arg(long)]
    texture: Option<PathBuf>,
}

/// The winit event loop has no change observers, so blocks just run.
struct WindowHost {
    ready: ReadyState,
}

impl HostPage for WindowHost {
    fn ready_state(&self) -> ReadyState {
        self.ready
    }

    fn run_outside_observers(&mut self, f: &mut dyn FnMut()) {
        f();
    }
}

struct App {
    bootstrapper: SceneBootstrapper,
    backend: WgpuBackend,
    host: WindowHost,
    viewport: Option<Viewport<WgpuSurface>>,
    pointer: PointerTracker,
    cursor: Vec2,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: ViewportConfig) -> Self {
        Self {
            bootstrapper: SceneBootstrapper::with_config(config),
            backend: WgpuBackend::new(),
            host: WindowHost {
                ready: ReadyState::Loading,
            },
            viewport: None,
            pointer: PointerTracker::new(),
            cursor: Vec2::ZERO,
            error: None,
        }
    }

    fn open_viewport(&mut self, event_loop: &ActiveEventLoop) -> Result<Viewport<WgpuSurface>> {
        let attrs = Window::default_attributes()
            .with_title("Axis Viewport")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs)?);
        let region = WindowRegion::new(window);

        let mut viewport = self.bootstrapper.bootstrap(&mut self.backend, &region)?;
        // The window exists, so the page is done loading.
        self.host.ready = ReadyState::Complete;
        viewport.start_rendering(&mut self.host)?;
        Ok(viewport)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

fn apply(viewport: &mut Viewport<WgpuSurface>, input: Option<CameraInput>) {
    if let Some(input) = input {
        if let Err(e) = viewport.apply_camera_input(input) {
            tracing::warn!("camera input dropped: {e}");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewport.is_some() {
            return;
        }
        match self.open_viewport(event_loop) {
            Ok(viewport) => self.viewport = Some(viewport),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(_) => {
                viewport.handle_signal(HostSignal::Resized);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                let input = self.pointer.pointer_move(self.cursor);
                apply(viewport, input);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => match state {
                ElementState::Pressed => self.pointer.pointer_down(self.cursor),
                ElementState::Released => self.pointer.pointer_up(),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let units = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_WHEEL_UNIT,
                };
                let input = self.pointer.wheel(units);
                apply(viewport, input);
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = viewport.frame() {
                    self.fail(event_loop, e.into());
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewport) = &self.viewport {
            viewport.surface().window().request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("axisview-desktop starting");

    let mut config = match &cli.config {
        Some(path) => ViewportConfig::load(path)?,
        None => ViewportConfig::default(),
    };
    if let Some(texture) = cli.texture {
        config.rotating_object.texture = texture;
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
