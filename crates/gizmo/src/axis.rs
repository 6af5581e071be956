use crate::GizmoError;
use crate::label::{AxisLabel, TextPlane};
use axisview_common::{Color3, EntityId};
use axisview_scene::{Geometry, Mesh, SceneGraph};
use glam::Vec3;

/// Arrow head length and half-width, as fractions of the axis size.
const ARROW_BACK: f32 = 0.95;
const ARROW_SPREAD: f32 = 0.05;
/// Label distance along the shaft and perpendicular offset, as fractions of the axis size.
const LABEL_ALONG: f32 = 0.9;
const LABEL_OFFSET: f32 = 0.05;
/// Label plane edge length relative to the axis size.
const LABEL_SCALE: f32 = 0.1;
/// Half-intensity green used for the Y glyph.
const LABEL_GREEN: Color3 = Color3::new(0.0, 128.0 / 255.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn direction(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn color(self) -> Color3 {
        match self {
            Axis::X => Color3::RED,
            Axis::Y => Color3::GREEN,
            Axis::Z => Color3::BLUE,
        }
    }

    /// Glyph color of the label. Y is drawn darker than its line.
    pub fn label_color(self) -> Color3 {
        match self {
            Axis::Y => LABEL_GREEN,
            Axis::X | Axis::Z => self.color(),
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    /// Direction the arrow head ticks spread in.
    fn tick_direction(self) -> Vec3 {
        match self {
            Axis::X | Axis::Z => Vec3::Y,
            Axis::Y => Vec3::X,
        }
    }

    /// Five-point polyline: origin, tip, first tick end, tip again, second tick end.
    pub fn arrow_points(self, size: f32) -> Vec<Vec3> {
        let tip = self.direction() * size;
        let back = self.direction() * size * ARROW_BACK;
        let spread = self.tick_direction() * size * ARROW_SPREAD;
        let (first, second) = match self {
            Axis::X => (back + spread, back - spread),
            Axis::Y | Axis::Z => (back - spread, back + spread),
        };
        vec![Vec3::ZERO, tip, first, tip, second]
    }

    /// Where the label plane sits.
    ///
    /// X is offset down in y, Y back in z and Z up in y.
    pub fn label_position(self, size: f32) -> Vec3 {
        let along = self.direction() * size * LABEL_ALONG;
        let offset = size * LABEL_OFFSET;
        match self {
            Axis::X => along - Vec3::Y * offset,
            Axis::Y => along - Vec3::Z * offset,
            Axis::Z => along + Vec3::Y * offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLine {
    pub axis: Axis,
    pub mesh: EntityId,
}

/// The three axis lines and labels added by [`show_world_axis`].
#[derive(Debug, Clone, PartialEq)]
pub struct WorldAxis {
    pub size: f32,
    pub lines: [AxisLine; 3],
    pub labels: [AxisLabel; 3],
}

impl WorldAxis {
    /// Every mesh id, lines first.
    pub fn meshes(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.lines
            .iter()
            .map(|l| l.mesh)
            .chain(self.labels.iter().map(|l| l.mesh))
    }
}

fn build_axis(scene: &mut SceneGraph, axis: Axis, size: f32) -> Result<(AxisLine, AxisLabel), GizmoError> {
    let mesh = scene.add_mesh(
        Mesh::new(
            format!("axis{}", axis.letter()),
            Geometry::Lines {
                points: axis.arrow_points(size),
            },
        )
        .with_color(axis.color()),
    )?;
    scene.freeze(mesh)?;

    let label = TextPlane::new(axis.letter(), axis.label_color(), size * LABEL_SCALE)
        .at(axis.label_position(size))
        .build(scene)?;

    Ok((AxisLine { axis, mesh }, label))
}

/// Add the world axis gizmo of the given size to the scene.
pub fn show_world_axis(scene: &mut SceneGraph, size: f32) -> Result<WorldAxis, GizmoError> {
    if !size.is_finite() || size <= 0.0 {
        return Err(GizmoError::InvalidSize(size));
    }
    let (x_line, x_label) = build_axis(scene, Axis::X, size)?;
    let (y_line, y_label) = build_axis(scene, Axis::Y, size)?;
    let (z_line, z_label) = build_axis(scene, Axis::Z, size)?;
    tracing::info!(size, "world axis built");
    Ok(WorldAxis {
        size,
        lines: [x_line, y_line, z_line],
        labels: [x_label, y_label, z_label],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn arrow_points_match_placement_table() {
        let s = 8.0;
        let x = Axis::X.arrow_points(s);
        assert!(approx(x[2], Vec3::new(7.6, 0.4, 0.0)));
        assert!(approx(x[4], Vec3::new(7.6, -0.4, 0.0)));
        let y = Axis::Y.arrow_points(s);
        assert!(approx(y[2], Vec3::new(-0.4, 7.6, 0.0)));
        assert!(approx(y[4], Vec3::new(0.4, 7.6, 0.0)));
        let z = Axis::Z.arrow_points(s);
        assert!(approx(z[2], Vec3::new(0.0, -0.4, 7.6)));
        assert!(approx(z[4], Vec3::new(0.0, 0.4, 7.6)));
    }

    #[test]
    fn polyline_shares_the_tip() {
        for axis in Axis::ALL {
            let pts = axis.arrow_points(2.5);
            assert_eq!(pts.len(), 5);
            assert_eq!(pts[0], Vec3::ZERO);
            assert_eq!(pts[1], pts[3]);
            assert!(approx(pts[1], axis.direction() * 2.5));
            // Both ticks start back along the shaft and spread symmetrically.
            assert!(approx(pts[2] + pts[4], axis.direction() * 2.5 * 2.0 * ARROW_BACK));
        }
    }

    #[test]
    fn label_positions_follow_fixed_offsets() {
        let s = 8.0;
        assert!(approx(Axis::X.label_position(s), Vec3::new(7.2, -0.4, 0.0)));
        assert!(approx(Axis::Y.label_position(s), Vec3::new(0.0, 7.2, -0.4)));
        assert!(approx(Axis::Z.label_position(s), Vec3::new(0.0, 0.4, 7.2)));
    }

    #[test]
    fn builds_three_lines_and_three_labels() {
        for size in [0.1_f32, 1.0, 8.0, 250.0] {
            let mut scene = SceneGraph::new();
            let gizmo = show_world_axis(&mut scene, size).unwrap();
            let summary = scene.summary();
            assert_eq!(summary.meshes, 6);
            assert_eq!(summary.line_meshes, 3);
            assert_eq!(summary.materials, 3);
            assert_eq!(summary.textures, 3);
            assert_eq!(gizmo.meshes().count(), 6);

            for line in &gizmo.lines {
                let mesh = scene.mesh(line.mesh).unwrap();
                assert_eq!(mesh.color, Some(line.axis.color()));
                assert!(mesh.is_frozen());
                let Geometry::Lines { points } = &mesh.geometry else {
                    panic!("axis mesh is not a polyline");
                };
                assert!(points.len() >= 5);
            }
        }
    }

    #[test]
    fn colors_are_exact_per_axis() {
        let mut scene = SceneGraph::new();
        let gizmo = show_world_axis(&mut scene, 8.0).unwrap();
        let colors: Vec<_> = gizmo
            .lines
            .iter()
            .map(|l| scene.mesh(l.mesh).unwrap().color.unwrap())
            .collect();
        assert_eq!(colors, vec![Color3::RED, Color3::GREEN, Color3::BLUE]);
    }

    #[test]
    fn label_glyphs_use_label_colors() {
        let mut scene = SceneGraph::new();
        let gizmo = show_world_axis(&mut scene, 8.0).unwrap();
        let expected: [[u8; 4]; 3] = [[255, 0, 0, 255], [0, 128, 0, 255], [0, 0, 255, 255]];
        for (label, ink) in gizmo.labels.iter().zip(expected) {
            let texture = scene.texture(label.texture).unwrap();
            let inked: Vec<_> = texture
                .rgba
                .chunks_exact(4)
                .filter(|px| px[3] != 0)
                .collect();
            assert!(!inked.is_empty());
            assert!(inked.iter().all(|px| *px == ink.as_slice()));
        }
        // The Y line keeps full-intensity green.
        let y_line = scene.mesh(gizmo.lines[1].mesh).unwrap();
        assert_eq!(y_line.color, Some(Color3::GREEN));
    }

    #[test]
    fn labels_sit_near_the_tip() {
        let size = 8.0;
        let mut scene = SceneGraph::new();
        let gizmo = show_world_axis(&mut scene, size).unwrap();
        for (axis, label) in Axis::ALL.iter().zip(&gizmo.labels) {
            let mesh = scene.mesh(label.mesh).unwrap();
            let p = mesh.transform.position;
            let along = p.dot(axis.direction());
            let perpendicular = (p - axis.direction() * along).length();
            assert!((along - 0.9 * size).abs() < 1e-4);
            assert!((perpendicular - 0.05 * size).abs() < 1e-4);
            assert_eq!(label.text, axis.letter());
            assert_eq!(mesh.geometry, Geometry::Plane { size: size * LABEL_SCALE });
        }
    }

    #[test]
    fn invalid_sizes_are_rejected_before_building() {
        for size in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let mut scene = SceneGraph::new();
            assert!(matches!(
                show_world_axis(&mut scene, size),
                Err(GizmoError::InvalidSize(_))
            ));
            assert_eq!(scene.summary().meshes, 0);
        }
    }
}
