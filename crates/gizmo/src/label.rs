use crate::GizmoError;
use crate::glyph::{TextStyle, rasterize_text};
use axisview_common::{Color3, EntityId};
use axisview_scene::{Geometry, Mesh, SceneGraph, StandardMaterial, Texture, TextureSource};
use glam::Vec3;

/// A text label: a plane mesh showing a dynamic texture.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub mesh: EntityId,
    pub material: EntityId,
    pub texture: EntityId,
}

/// Builder for a frozen, unlit, double-sided plane carrying rasterized text.
#[derive(Debug, Clone)]
pub struct TextPlane<'a> {
    text: &'a str,
    color: Color3,
    size: f32,
    position: Vec3,
    style: TextStyle,
}

impl<'a> TextPlane<'a> {
    pub fn new(text: &'a str, color: Color3, size: f32) -> Self {
        Self {
            text,
            color,
            size,
            position: Vec3::ZERO,
            style: TextStyle::default(),
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn build(self, scene: &mut SceneGraph) -> Result<AxisLabel, GizmoError> {
        let image = rasterize_text(self.text, self.color, &self.style)?;
        let (width, height) = image.dimensions();
        let texture = scene.add_texture(Texture {
            name: format!("{}_text", self.text),
            source: TextureSource::Dynamic,
            width,
            height,
            rgba: image.into_raw(),
            has_alpha: true,
        })?;

        let mut material = StandardMaterial::new(format!("{}_text_material", self.text))
            .with_texture(texture);
        material.back_face_culling = false;
        material.specular_color = Color3::BLACK;
        material.unlit = true;
        let material = scene.add_material(material)?;

        let mesh = scene.add_mesh(
            Mesh::new(format!("{}_text_plane", self.text), Geometry::Plane { size: self.size })
                .with_position(self.position),
        )?;
        scene.bind_material(mesh, material)?;
        scene.freeze(mesh)?;

        tracing::debug!(text = self.text, %mesh, "text plane built");
        Ok(AxisLabel {
            text: self.text.to_string(),
            mesh,
            material,
            texture,
        })
    }
}

/// Build a text plane at the origin with the default text style.
pub fn make_text_plane(
    scene: &mut SceneGraph,
    text: &str,
    color: Color3,
    size: f32,
) -> Result<AxisLabel, GizmoError> {
    TextPlane::new(text, color, size).build(scene)
}
