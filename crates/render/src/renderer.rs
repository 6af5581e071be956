use axisview_common::SurfaceSize;
use axisview_scene::SceneGraph;

/// Renderer-agnostic interface.
///
/// A renderer reads the scene graph and a target size, then produces output.
/// It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the scene.
    fn render(&self, scene: &SceneGraph, size: SurfaceSize) -> Self::Output;
}

/// Produces a human-readable description of what would be drawn.
///
/// Used by the headless backend, the CLI and tests.
#[derive(Debug, Default, Clone)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &SceneGraph, size: SurfaceSize) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene (frame={}) {}x{} ===\n",
            scene.frame(),
            size.width,
            size.height
        ));

        if let Some(cam) = scene.active_camera() {
            let eye = cam.position();
            let t = cam.target();
            out.push_str(&format!(
                "Camera '{}': alpha={:.3} beta={:.3} radius={:.2} eye=({:.2}, {:.2}, {:.2}) target=({:.1}, {:.1}, {:.1})\n",
                cam.name, cam.alpha, cam.beta, cam.radius, eye.x, eye.y, eye.z, t.x, t.y, t.z
            ));
        }
        for light in scene.lights() {
            let d = light.direction;
            out.push_str(&format!(
                "Light '{}': dir=({:.1}, {:.1}, {:.1}) intensity={:.2}\n",
                light.name, d.x, d.y, d.z, light.intensity
            ));
        }

        // Sort by name so output is stable across runs.
        let mut meshes: Vec<_> = scene.meshes().map(|(_, m)| m).collect();
        meshes.sort_by(|a, b| a.name.cmp(&b.name));
        out.push_str(&format!("Meshes: {}\n", meshes.len()));
        for mesh in meshes {
            let p = mesh.transform.position;
            let (axis, angle) = mesh.transform.rotation.to_axis_angle();
            out.push_str(&format!(
                "  {} [{}] pos=({:.2}, {:.2}, {:.2}) rot={:.3}@({:.1}, {:.1}, {:.1}){}\n",
                mesh.name,
                mesh.geometry.kind(),
                p.x,
                p.y,
                p.z,
                angle,
                axis.x,
                axis.y,
                axis.z,
                if mesh.is_frozen() { " frozen" } else { "" }
            ));
        }

        out
    }
}
