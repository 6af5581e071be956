use crate::geometry::Geometry;
use axisview_common::{Color3, EntityId, Transform};
use glam::{Mat4, Quat, Vec3};
use std::path::PathBuf;

/// Frame in which a rotation axis is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    Local,
    World,
}

/// A renderable shape with a transform and an optional material.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub geometry: Geometry,
    pub transform: Transform,
    /// Whole-mesh color used by line meshes.
    pub color: Option<Color3>,
    pub(crate) material: Option<EntityId>,
    pub(crate) frozen: bool,
}

impl Mesh {
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            transform: Transform::default(),
            color: None,
            material: None,
            frozen: false,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_color(mut self, color: Color3) -> Self {
        self.color = Some(color);
        self
    }

    pub fn material(&self) -> Option<EntityId> {
        self.material
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Rotate by `angle` radians around `axis`, expressed in the given space.
    pub fn rotate(&mut self, axis: Vec3, angle: f32, space: Space) {
        let delta = Quat::from_axis_angle(axis.normalize(), angle);
        self.transform.rotation = match space {
            Space::Local => self.transform.rotation * delta,
            Space::World => delta * self.transform.rotation,
        }
        .normalize();
    }

    pub fn world_matrix(&self) -> Mat4 {
        let t = &self.transform;
        Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.position)
    }
}

/// Light with no position that illuminates from a direction, blending a sky
/// color with a ground color.
#[derive(Debug, Clone, PartialEq)]
pub struct HemisphericLight {
    pub name: String,
    pub direction: Vec3,
    pub intensity: f32,
    pub diffuse: Color3,
    pub ground_color: Color3,
}

impl HemisphericLight {
    pub fn new(name: impl Into<String>, direction: Vec3) -> Self {
        Self {
            name: name.into(),
            direction,
            intensity: 1.0,
            diffuse: Color3::WHITE,
            ground_color: Color3::BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    pub name: String,
    pub diffuse_color: Color3,
    pub specular_color: Color3,
    pub diffuse_texture: Option<EntityId>,
    /// When false both faces of every triangle are drawn.
    pub back_face_culling: bool,
    /// Ignore scene lights and show the diffuse color or texture as is.
    pub unlit: bool,
}

impl StandardMaterial {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse_color: Color3::WHITE,
            specular_color: Color3::WHITE,
            diffuse_texture: None,
            back_face_culling: true,
            unlit: false,
        }
    }

    pub fn with_texture(mut self, texture: EntityId) -> Self {
        self.diffuse_texture = Some(texture);
        self
    }
}

/// Where a texture's pixels came from.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource {
    File(PathBuf),
    /// Generated at runtime.
    Dynamic,
}

/// RGBA8 pixel data, rows top to bottom.
#[derive(Clone, PartialEq)]
pub struct Texture {
    pub name: String,
    pub source: TextureSource,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    pub has_alpha: bool,
}

impl Texture {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.rgba.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("has_alpha", &self.has_alpha)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn local_rotation_accumulates() {
        let mut mesh = Mesh::new("box", Geometry::Box { size: 1.0 });
        for _ in 0..50 {
            mesh.rotate(Vec3::Y, 0.02, Space::Local);
        }
        let expected = Quat::from_rotation_y(1.0);
        assert!(mesh.transform.rotation.angle_between(expected) < 1e-4);
    }

    #[test]
    fn local_and_world_space_differ_after_tilt() {
        let mut local = Mesh::new("a", Geometry::Box { size: 1.0 });
        local.rotate(Vec3::X, FRAC_PI_2, Space::World);
        let mut world = local.clone();
        local.rotate(Vec3::Y, FRAC_PI_2, Space::Local);
        world.rotate(Vec3::Y, FRAC_PI_2, Space::World);
        assert!(local.transform.rotation.angle_between(world.transform.rotation) > 0.1);
    }

    #[test]
    fn world_matrix_applies_position() {
        let mesh = Mesh::new("box", Geometry::Box { size: 1.0 }).with_position(Vec3::new(0.0, 0.5, 0.0));
        let origin = mesh.world_matrix().transform_point3(Vec3::ZERO);
        assert_eq!(origin, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn texture_pixel_bounds() {
        let tex = Texture {
            name: "t".into(),
            source: TextureSource::Dynamic,
            width: 2,
            height: 1,
            rgba: vec![1, 2, 3, 4, 5, 6, 7, 8],
            has_alpha: true,
        };
        assert_eq!(tex.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(tex.pixel(2, 0), None);
    }
}
