use crate::surface::{RenderError, RenderSurface};
use axisview_scene::SceneGraph;
use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

/// Number of frame deltas averaged for the FPS estimate.
const FPS_WINDOW: usize = 60;

/// A recurring render callback, invoked once per frame tick.
pub type RenderCallback =
    Box<dyn FnMut(&mut SceneGraph, &mut dyn RenderSurface) -> Result<(), RenderError>>;

/// Run the scene's per-frame mutations, then draw it.
pub fn render_scene(scene: &mut SceneGraph, surface: &mut dyn RenderSurface) -> Result<(), RenderError> {
    scene.advance_frame()?;
    surface.draw(scene)
}

/// Per-frame timing statistics.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    pub frames: u64,
    pub last_delta: Option<Duration>,
    deltas: VecDeque<Duration>,
}

impl FrameStats {
    /// Frames per second averaged over the recent window, zero until two
    /// frames have been seen.
    pub fn fps(&self) -> f32 {
        let total: Duration = self.deltas.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.deltas.len() as f32 / total.as_secs_f32()
    }

    fn record(&mut self, delta: Option<Duration>) {
        self.frames += 1;
        self.last_delta = delta;
        if let Some(d) = delta {
            if self.deltas.len() == FPS_WINDOW {
                self.deltas.pop_front();
            }
            self.deltas.push_back(d);
        }
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frames={} fps={:.1}", self.frames, self.fps())
    }
}

/// Holds recurring render callbacks and invokes them once per display refresh.
///
/// The host drives [`FrameScheduler::tick`]; nothing here owns a thread or a
/// timer. Callbacks stay registered for the life of the scheduler.
#[derive(Default)]
pub struct FrameScheduler {
    callbacks: Vec<RenderCallback>,
    stats: FrameStats,
    last_tick: Option<Instant>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recurring render callback. Returns its position in the run order.
    pub fn run_render_loop<F>(&mut self, callback: F) -> usize
    where
        F: FnMut(&mut SceneGraph, &mut dyn RenderSurface) -> Result<(), RenderError> + 'static,
    {
        self.callbacks.push(Box::new(callback));
        tracing::debug!(callbacks = self.callbacks.len(), "render callback registered");
        self.callbacks.len() - 1
    }

    pub fn is_running(&self) -> bool {
        !self.callbacks.is_empty()
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Run one frame now. Returns `Ok(false)` without counting a frame when no
    /// callback is registered.
    pub fn tick(&mut self, scene: &mut SceneGraph, surface: &mut dyn RenderSurface) -> Result<bool, RenderError> {
        self.tick_at(Instant::now(), scene, surface)
    }

    /// Run one frame as if the display refreshed at `now`.
    pub fn tick_at(
        &mut self,
        now: Instant,
        scene: &mut SceneGraph,
        surface: &mut dyn RenderSurface,
    ) -> Result<bool, RenderError> {
        if self.callbacks.is_empty() {
            return Ok(false);
        }
        for callback in self.callbacks.iter_mut() {
            callback(&mut *scene, &mut *surface)?;
        }
        let delta = self.last_tick.map(|prev| now.saturating_duration_since(prev));
        self.last_tick = Some(now);
        self.stats.record(delta);
        Ok(true)
    }
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("callbacks", &self.callbacks.len())
            .field("stats", &self.stats)
            .finish()
    }
}
