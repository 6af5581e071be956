use crate::gpu::SceneRenderer;
use axisview_common::{RegionId, SurfaceSize};
use axisview_render::{DrawableRegion, RenderBackend, RenderError, RenderSurface};
use axisview_scene::SceneGraph;
use std::sync::Arc;
use winit::window::Window;

/// A winit window used as a drawable region.
#[derive(Debug, Clone)]
pub struct WindowRegion {
    id: RegionId,
    window: Arc<Window>,
}

impl WindowRegion {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            id: RegionId(u64::from(window.id())),
            window,
        }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl DrawableRegion for WindowRegion {
    fn region_id(&self) -> RegionId {
        self.id
    }

    fn layout_size(&self) -> SurfaceSize {
        let size = self.window.inner_size();
        SurfaceSize::new(size.width, size.height)
    }
}

/// Binds windows to wgpu surfaces.
pub struct WgpuBackend {
    instance: wgpu::Instance,
}

impl WgpuBackend {
    pub fn new() -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        Self { instance }
    }
}

impl Default for WgpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for WgpuBackend {
    type Region = WindowRegion;
    type Surface = WgpuSurface;

    fn bind(&mut self, region: &WindowRegion) -> Result<WgpuSurface, RenderError> {
        let unusable = |reason: String| RenderError::RegionUnusable {
            region: region.id,
            reason,
        };

        let surface = self
            .instance
            .create_surface(region.window.clone())
            .map_err(|e| unusable(e.to_string()))?;

        let adapter = pollster::block_on(self.instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| unusable("no compatible graphics adapter".into()))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("axisview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| unusable(e.to_string()))?;

        let size = clamp(region.layout_size());
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(caps.formats.first())
            .copied()
            .ok_or_else(|| unusable("surface reports no texture formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = SceneRenderer::new(&device, &queue, format, size);
        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            width = size.width,
            height = size.height,
            "GPU surface bound"
        );

        Ok(WgpuSurface {
            region: region.clone(),
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }
}

/// A window surface with its device and scene renderer.
pub struct WgpuSurface {
    region: WindowRegion,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: SceneRenderer,
}

impl WgpuSurface {
    pub fn window(&self) -> &Arc<Window> {
        self.region.window()
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.renderer.surface_format()
    }
}

fn clamp(size: SurfaceSize) -> SurfaceSize {
    SurfaceSize::new(size.width.max(1), size.height.max(1))
}

impl RenderSurface for WgpuSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.config.width, self.config.height)
    }

    fn resize(&mut self) {
        let size = clamp(self.region.layout_size());
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, size);
        tracing::debug!(width = size.width, height = size.height, "GPU surface resized");
    }

    fn draw(&mut self, scene: &SceneGraph) -> Result<(), RenderError> {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(RenderError::Surface(e.to_string())),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let size = self.size();
        self.renderer
            .render(&self.device, &self.queue, &view, scene, size)?;
        output.present();
        Ok(())
    }
}
