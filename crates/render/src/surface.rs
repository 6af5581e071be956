use axisview_common::{RegionId, SurfaceSize};
use axisview_scene::{SceneError, SceneGraph};

/// Errors from binding and drawing.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("drawable region {region:?} is unusable: {reason}")]
    RegionUnusable { region: RegionId, reason: String },
    #[error("scene has no active camera")]
    NoCamera,
    #[error("surface error: {0}")]
    Surface(String),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// A host-provided area that can be drawn into.
pub trait DrawableRegion {
    fn region_id(&self) -> RegionId;

    /// Current layout size in physical pixels.
    fn layout_size(&self) -> SurfaceSize;
}

/// A rendering surface bound to one drawable region.
pub trait RenderSurface {
    /// Size of the internal buffers.
    fn size(&self) -> SurfaceSize;

    /// Recompute internal buffer dimensions from the region's current layout size.
    fn resize(&mut self);

    /// Draw the scene as it is now.
    fn draw(&mut self, scene: &SceneGraph) -> Result<(), RenderError>;
}

/// Binds drawable regions to rendering surfaces.
pub trait RenderBackend {
    type Region: DrawableRegion;
    type Surface: RenderSurface + 'static;

    fn bind(&mut self, region: &Self::Region) -> Result<Self::Surface, RenderError>;
}
