use axisview_common::RegionId;
use glam::{Mat4, Vec3};
use std::f32::consts::PI;

/// Smallest distance kept between beta and the poles.
const BETA_EPSILON: f32 = 0.01;

/// Orbit camera parameterized by azimuth (`alpha`), polar angle (`beta`) and
/// distance (`radius`) from a target point.
///
/// Uses a left-handed, y-up frame: with `alpha = -PI/2` the camera sits on the
/// negative z side of its target looking toward +z, with +x to the right.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub name: String,
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    target: Vec3,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Pointer travel, in pixels, for one radian of rotation.
    pub angular_sensitivity: f32,
    /// Wheel units for one world unit of zoom.
    pub wheel_precision: f32,
    pub lower_radius_limit: f32,
    attached_to: Option<RegionId>,
}

impl OrbitCamera {
    pub fn new(name: impl Into<String>, alpha: f32, beta: f32, radius: f32, target: Vec3) -> Self {
        Self {
            name: name.into(),
            alpha,
            beta,
            radius,
            target,
            fov: 0.8,
            near: 0.1,
            far: 1000.0,
            angular_sensitivity: 1000.0,
            wheel_precision: 3.0,
            lower_radius_limit: 0.5,
            attached_to: None,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Re-aim the camera. Angles and radius are kept; only the target moves.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// World-space eye position derived from the orbit parameters.
    pub fn position(&self) -> Vec3 {
        let (sin_a, cos_a) = self.alpha.sin_cos();
        let (sin_b, cos_b) = self.beta.sin_cos();
        self.target + self.radius * Vec3::new(cos_a * sin_b, cos_b, sin_a * sin_b)
    }

    /// Start receiving pointer and wheel input from a drawable region.
    pub fn attach_control(&mut self, region: RegionId) {
        self.attached_to = Some(region);
    }

    pub fn detach_control(&mut self) {
        self.attached_to = None;
    }

    pub fn attached_region(&self) -> Option<RegionId> {
        self.attached_to
    }

    pub fn is_attached(&self) -> bool {
        self.attached_to.is_some()
    }

    /// Orbit by a pointer drag of `(dx, dy)` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.alpha -= dx / self.angular_sensitivity;
        self.beta -= dy / self.angular_sensitivity;
        self.beta = self.beta.clamp(BETA_EPSILON, PI - BETA_EPSILON);
    }

    /// Move toward (positive delta) or away from the target.
    pub fn zoom(&mut self, delta: f32) {
        self.radius = (self.radius - delta / self.wheel_precision).max(self.lower_radius_limit);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_lh(self.fov, aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}
