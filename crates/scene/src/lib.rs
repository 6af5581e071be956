//! Scene Graph: the container holding every renderable and logical entity of
//! one viewport.
//!
//! # Invariants
//! - Every camera, light, mesh, material and texture is owned by exactly one graph.
//! - Frozen meshes cannot be borrowed mutably.
//! - A mesh's material binding is set at most once.
//! - Per-frame mutation handlers run in registration order, once per frame,
//!   before the frame is drawn.

pub mod camera;
pub mod geometry;
pub mod graph;
pub mod node;

pub use camera::OrbitCamera;
pub use geometry::{Geometry, MeshVertex, Tessellation};
pub use graph::{EntityKind, FrameMutation, SceneError, SceneEvent, SceneGraph, SceneSummary};
pub use node::{HemisphericLight, Mesh, Space, StandardMaterial, Texture, TextureSource};
