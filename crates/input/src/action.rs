use axisview_scene::OrbitCamera;

/// A camera action produced from pointer or wheel input.
///
/// Desktop windows and the headless CLI both produce these, so the camera
/// behaves the same whichever host drives it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraInput {
    /// Orbit by a pointer drag, in pixels.
    Rotate { dx: f32, dy: f32 },
    /// Zoom by wheel units. Positive moves toward the target.
    Zoom(f32),
}

impl CameraInput {
    /// Apply to the camera. Returns `false` and leaves the camera untouched
    /// when its control is not attached.
    pub fn apply(self, camera: &mut OrbitCamera) -> bool {
        if !camera.is_attached() {
            tracing::trace!(camera = %camera.name, "input ignored, control detached");
            return false;
        }
        match self {
            CameraInput::Rotate { dx, dy } => camera.rotate(dx, dy),
            CameraInput::Zoom(delta) => camera.zoom(delta),
        }
        true
    }
}
