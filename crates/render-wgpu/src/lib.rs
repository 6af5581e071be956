//! wgpu render backend.
//!
//! Binds a winit window to a wgpu surface and draws the scene graph: lit
//! triangle meshes with back-face culling, unlit double-sided label planes with
//! alpha, and flat-colored axis lines.
//!
//! # Invariants
//! - The renderer never mutates the scene graph.
//! - Textures are uploaded once per texture id.
//! - A lost or outdated surface is reconfigured and the frame is skipped.

mod gpu;
mod shaders;
mod surface;

pub use gpu::SceneRenderer;
pub use surface::{WgpuBackend, WgpuSurface, WindowRegion};
