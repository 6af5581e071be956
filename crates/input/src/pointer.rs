use crate::action::CameraInput;
use glam::Vec2;

/// Turns raw pointer events into camera actions.
///
/// A drag starts on pointer down and ends on pointer up; every move in
/// between yields a [`CameraInput::Rotate`] by the travelled distance.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    dragging: bool,
    last: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pointer_down(&mut self, position: Vec2) {
        self.dragging = true;
        self.last = Some(position);
    }

    pub fn pointer_move(&mut self, position: Vec2) -> Option<CameraInput> {
        let previous = self.last.replace(position);
        if !self.dragging {
            return None;
        }
        let delta = position - previous?;
        if delta == Vec2::ZERO {
            return None;
        }
        Some(CameraInput::Rotate {
            dx: delta.x,
            dy: delta.y,
        })
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Wheel scroll in wheel units, positive away from the user.
    pub fn wheel(&self, delta: f32) -> Option<CameraInput> {
        (delta != 0.0 && delta.is_finite()).then_some(CameraInput::Zoom(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_without_a_press_do_nothing() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.pointer_move(Vec2::new(10.0, 10.0)), None);
        assert_eq!(tracker.pointer_move(Vec2::new(20.0, 10.0)), None);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn drag_reports_incremental_deltas() {
        let mut tracker = PointerTracker::new();
        tracker.pointer_down(Vec2::new(100.0, 100.0));
        assert_eq!(
            tracker.pointer_move(Vec2::new(110.0, 95.0)),
            Some(CameraInput::Rotate { dx: 10.0, dy: -5.0 })
        );
        assert_eq!(
            tracker.pointer_move(Vec2::new(112.0, 95.0)),
            Some(CameraInput::Rotate { dx: 2.0, dy: 0.0 })
        );
        assert_eq!(tracker.pointer_move(Vec2::new(112.0, 95.0)), None);

        tracker.pointer_up();
        assert_eq!(tracker.pointer_move(Vec2::new(200.0, 200.0)), None);
    }

    #[test]
    fn wheel_maps_to_zoom() {
        let tracker = PointerTracker::new();
        assert_eq!(tracker.wheel(1.5), Some(CameraInput::Zoom(1.5)));
        assert_eq!(tracker.wheel(0.0), None);
        assert_eq!(tracker.wheel(f32::NAN), None);
    }
}
