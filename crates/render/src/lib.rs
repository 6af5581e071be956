//! Rendering engine boundary.
//!
//! # Invariants
//! - Renderers read the scene graph; they never mutate it.
//! - Per-frame scene mutations run before the draw, never during it.
//! - Render callbacks run one at a time, in registration order.
//!
//! A backend binds a host drawable region to a [`RenderSurface`]. The
//! [`FrameScheduler`] holds the recurring render callbacks and is ticked once
//! per display refresh by the host. The headless backend draws through
//! [`DebugTextRenderer`] and is what the CLI and the tests run on.

mod headless;
mod renderer;
mod scheduler;
mod surface;

pub use headless::{HeadlessBackend, HeadlessRegion, HeadlessSurface};
pub use renderer::{DebugTextRenderer, Renderer};
pub use scheduler::{FrameScheduler, FrameStats, RenderCallback, render_scene};
pub use surface::{DrawableRegion, RenderBackend, RenderError, RenderSurface};

pub fn crate_info() -> &'static str {
    "axisview-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
