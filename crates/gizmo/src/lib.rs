//! World axis gizmo.
//!
//! Builds three colored, arrowed line meshes along X, Y and Z plus a text
//! label near each arrow tip. Labels are a single glyph rasterized at runtime
//! into a transparent texture and shown on an unlit, double-sided plane.
//!
//! # Invariants
//! - Every mesh produced here is frozen before it is returned.
//! - Construction stops at the first failure; already built axes are left in
//!   the scene.

pub mod axis;
pub mod glyph;
pub mod label;

pub use axis::{Axis, AxisLine, WorldAxis, show_world_axis};
pub use glyph::{TextStyle, glyph_bitmap, rasterize_text};
pub use label::{AxisLabel, TextPlane, make_text_plane};

use axisview_scene::SceneError;

/// Errors from gizmo construction.
#[derive(Debug, thiserror::Error)]
pub enum GizmoError {
    #[error("axis size must be positive and finite, got {0}")]
    InvalidSize(f32),
    #[error("no glyph for character {0:?}")]
    UnsupportedGlyph(char),
    #[error("label text is empty")]
    EmptyText,
    #[error(transparent)]
    Scene(#[from] SceneError),
}
