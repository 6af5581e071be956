use crate::renderer::{DebugTextRenderer, Renderer};
use crate::surface::{DrawableRegion, RenderBackend, RenderError, RenderSurface};
use axisview_common::{RegionId, SurfaceSize};
use axisview_scene::SceneGraph;
use std::cell::Cell;
use std::rc::Rc;

/// An in-memory drawable region.
///
/// Clones share the layout size, so a test can keep one handle and resize the
/// region after it has been bound.
#[derive(Debug, Clone)]
pub struct HeadlessRegion {
    id: RegionId,
    layout: Rc<Cell<SurfaceSize>>,
    usable: bool,
}

impl HeadlessRegion {
    pub fn new(id: RegionId, size: SurfaceSize) -> Self {
        Self {
            id,
            layout: Rc::new(Cell::new(size)),
            usable: true,
        }
    }

    /// A region that refuses to be bound.
    pub fn unusable(id: RegionId) -> Self {
        Self {
            id,
            layout: Rc::new(Cell::new(SurfaceSize::new(0, 0))),
            usable: false,
        }
    }

    /// Change the layout size. Bound surfaces pick it up on their next resize.
    pub fn set_layout_size(&self, size: SurfaceSize) {
        self.layout.set(size);
    }
}

impl DrawableRegion for HeadlessRegion {
    fn region_id(&self) -> RegionId {
        self.id
    }

    fn layout_size(&self) -> SurfaceSize {
        self.layout.get()
    }
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    bound: usize,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of surfaces this backend has created.
    pub fn bound_count(&self) -> usize {
        self.bound
    }
}

impl RenderBackend for HeadlessBackend {
    type Region = HeadlessRegion;
    type Surface = HeadlessSurface;

    fn bind(&mut self, region: &HeadlessRegion) -> Result<HeadlessSurface, RenderError> {
        if !region.usable {
            return Err(RenderError::RegionUnusable {
                region: region.id,
                reason: "region has no drawing context".into(),
            });
        }
        self.bound += 1;
        let size = clamp_size(region.layout_size());
        tracing::debug!(region = region.id.0, width = size.width, height = size.height, "headless surface bound");
        Ok(HeadlessSurface {
            region: region.clone(),
            size,
            draws: 0,
            resizes: 0,
            last_frame: None,
            renderer: DebugTextRenderer::new(),
        })
    }
}

/// Surface that renders each frame to text and keeps the last one.
#[derive(Debug)]
pub struct HeadlessSurface {
    region: HeadlessRegion,
    size: SurfaceSize,
    draws: u64,
    resizes: u64,
    last_frame: Option<String>,
    renderer: DebugTextRenderer,
}

impl HeadlessSurface {
    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    pub fn resize_count(&self) -> u64 {
        self.resizes
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.last_frame.as_deref()
    }

    pub fn region_id(&self) -> RegionId {
        self.region.id
    }
}

fn clamp_size(size: SurfaceSize) -> SurfaceSize {
    SurfaceSize::new(size.width.max(1), size.height.max(1))
}

impl RenderSurface for HeadlessSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self) {
        self.size = clamp_size(self.region.layout_size());
        self.resizes += 1;
        tracing::trace!(width = self.size.width, height = self.size.height, "headless surface resized");
    }

    fn draw(&mut self, scene: &SceneGraph) -> Result<(), RenderError> {
        if scene.active_camera().is_none() {
            return Err(RenderError::NoCamera);
        }
        self.last_frame = Some(self.renderer.render(scene, self.size));
        self.draws += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axisview_scene::OrbitCamera;
    use glam::Vec3;

    #[test]
    fn bind_takes_layout_size() {
        let region = HeadlessRegion::new(RegionId(7), SurfaceSize::new(800, 600));
        let mut backend = HeadlessBackend::new();
        let surface = backend.bind(&region).unwrap();
        assert_eq!(surface.size(), SurfaceSize::new(800, 600));
        assert_eq!(surface.region_id(), RegionId(7));
        assert_eq!(backend.bound_count(), 1);
        assert!(surface.last_frame().is_none());
    }

    #[test]
    fn unusable_region_fails_to_bind() {
        let err = HeadlessBackend::new()
            .bind(&HeadlessRegion::unusable(RegionId(3)))
            .unwrap_err();
        assert!(matches!(err, RenderError::RegionUnusable { region: RegionId(3), .. }));
    }

    #[test]
    fn resize_follows_region_layout() {
        let region = HeadlessRegion::new(RegionId(1), SurfaceSize::new(100, 100));
        let mut surface = HeadlessBackend::new().bind(&region).unwrap();
        region.set_layout_size(SurfaceSize::new(320, 200));
        assert_eq!(surface.size(), SurfaceSize::new(100, 100));
        surface.resize();
        assert_eq!(surface.size(), SurfaceSize::new(320, 200));
        assert_eq!(surface.resize_count(), 1);

        region.set_layout_size(SurfaceSize::new(0, 0));
        surface.resize();
        assert_eq!(surface.size(), SurfaceSize::new(1, 1));
        assert_eq!(surface.resize_count(), 2);
    }

    #[test]
    fn draw_requires_camera() {
        let region = HeadlessRegion::new(RegionId(1), SurfaceSize::new(10, 10));
        let mut surface = HeadlessBackend::new().bind(&region).unwrap();
        let mut scene = SceneGraph::new();
        assert!(matches!(surface.draw(&scene), Err(RenderError::NoCamera)));
        assert_eq!(surface.draw_count(), 0);

        scene.add_camera(OrbitCamera::new("camera", 0.0, 1.0, 3.0, Vec3::ZERO));
        surface.draw(&scene).unwrap();
        assert_eq!(surface.draw_count(), 1);
        assert!(surface.last_frame().unwrap().contains("10x10"));
    }
}
