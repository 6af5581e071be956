//! Scene bootstrapper and render-loop coordinator for one 3D viewport.
//!
//! # Invariants
//! - One scene, one camera, one light and one surface per viewport.
//! - A drawable region is bootstrapped at most once per [`SceneBootstrapper`].
//! - Per-frame mutations run before each draw, one frame at a time.
//! - After start, every resize signal recomputes the surface buffers exactly once.
//!
//! [`SceneBootstrapper::bootstrap`] returns a [`Viewport`] that owns
//! everything it built. The host then calls [`Viewport::start_rendering`],
//! forwards [`HostSignal`]s, and calls [`Viewport::frame`] once per display
//! refresh.

mod bootstrap;
pub mod config;
mod error;
mod host;
mod render_loop;

pub use bootstrap::{SceneBootstrapper, Viewport};
pub use config::ViewportConfig;
pub use error::ViewportError;
pub use host::{HeadlessHost, HostPage, HostSignal, ReadyState};
pub use render_loop::{LoopState, RenderLoop};

#[cfg(test)]
mod tests {
    use super::*;
    use axisview_common::{RegionId, SurfaceSize};
    use axisview_render::{HeadlessBackend, HeadlessRegion, RenderSurface};
    use std::path::PathBuf;

    fn config() -> ViewportConfig {
        let mut config = ViewportConfig::default();
        config.rotating_object.texture =
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/textures/sun.png");
        config
    }

    #[test]
    fn page_lifecycle_end_to_end() {
        let region = HeadlessRegion::new(RegionId(1), SurfaceSize::new(1024, 768));
        let mut backend = HeadlessBackend::new();
        let mut viewport = SceneBootstrapper::with_config(config())
            .bootstrap(&mut backend, &region)
            .unwrap();

        let mut host = HeadlessHost::new(ReadyState::Loading);
        assert_eq!(viewport.start_rendering(&mut host).unwrap(), LoopState::AwaitingReady);
        assert!(!viewport.frame().unwrap());

        // Layout settles while the document is still loading.
        region.set_layout_size(SurfaceSize::new(1280, 720));
        viewport.handle_signal(HostSignal::Resized);
        assert_eq!(viewport.surface().size(), SurfaceSize::new(1280, 720));

        host.set_ready_state(ReadyState::Interactive);
        viewport.handle_signal(HostSignal::DocumentReady);
        assert_eq!(viewport.render_loop().state(), LoopState::Running);

        for _ in 0..5 {
            assert!(viewport.frame().unwrap());
        }
        let frame = viewport.surface().last_frame().unwrap();
        assert!(frame.contains("frame=5"));
        assert!(frame.contains("1280x720"));
        assert!(frame.contains("axisX [lines]"));
        assert!(frame.contains("box [box] pos=(0.00, 0.50, 0.00)"));

        assert_eq!(viewport.scheduler().stats().frames, 5);
        assert_eq!(viewport.render_loop().resize_count(), 1);
        assert_eq!(host.outside_runs(), 1);
    }

    #[test]
    fn two_viewports_coexist() {
        let mut bootstrapper = SceneBootstrapper::with_config(config());
        let mut backend = HeadlessBackend::new();
        let a = HeadlessRegion::new(RegionId(1), SurfaceSize::new(100, 100));
        let b = HeadlessRegion::new(RegionId(2), SurfaceSize::new(200, 100));
        let mut first = bootstrapper.bootstrap(&mut backend, &a).unwrap();
        let second = bootstrapper.bootstrap(&mut backend, &b).unwrap();

        let mut host = HeadlessHost::new(ReadyState::Complete);
        first.start_rendering(&mut host).unwrap();
        first.frame().unwrap();
        assert_eq!(first.scene().frame(), 1);
        assert_eq!(second.scene().frame(), 0);
        assert_ne!(first.rotating_object(), second.rotating_object());
    }
}
