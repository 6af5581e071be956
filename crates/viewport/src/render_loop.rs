use crate::error::ViewportError;
use crate::host::{HostPage, HostSignal};
use axisview_render::{FrameScheduler, RenderSurface, render_scene};

/// Where the coordinator is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Not started. Host signals are ignored.
    Idle,
    /// Started while the document was loading; waiting for the ready signal.
    AwaitingReady,
    /// The render callback is registered with the frame scheduler.
    Running,
}

/// Starts continuous rendering and keeps the surface in sync with layout.
///
/// Once started there is no way to stop: the render callback and the resize
/// handling live as long as the surface.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    resizes: u64,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            resizes: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Buffer recomputations performed since start.
    pub fn resize_count(&self) -> u64 {
        self.resizes
    }

    /// Start continuous rendering, outside the host's observers.
    ///
    /// Registers the render callback right away unless the document is still
    /// loading, in which case registration waits for
    /// [`HostSignal::DocumentReady`]. Resize handling starts either way.
    pub fn start(&mut self, host: &mut dyn HostPage, scheduler: &mut FrameScheduler) -> Result<LoopState, ViewportError> {
        if self.state != LoopState::Idle {
            return Err(ViewportError::LoopAlreadyStarted);
        }
        let loading = host.ready_state().is_loading();
        let mut next = LoopState::AwaitingReady;
        host.run_outside_observers(&mut || {
            if !loading {
                scheduler.run_render_loop(render_scene);
                next = LoopState::Running;
            }
        });
        self.state = next;
        match next {
            LoopState::Running => tracing::info!("render loop registered"),
            _ => tracing::info!("document loading, render loop deferred until ready"),
        }
        Ok(next)
    }

    /// React to a host signal.
    pub fn on_signal(&mut self, signal: HostSignal, scheduler: &mut FrameScheduler, surface: &mut dyn RenderSurface) {
        match (signal, self.state) {
            (_, LoopState::Idle) => {
                tracing::debug!(?signal, "signal before start ignored");
            }
            (HostSignal::Resized, _) => {
                surface.resize();
                self.resizes += 1;
                let size = surface.size();
                tracing::info!(width = size.width, height = size.height, "surface resized");
            }
            (HostSignal::DocumentReady, LoopState::AwaitingReady) => {
                scheduler.run_render_loop(render_scene);
                self.state = LoopState::Running;
                tracing::info!("document ready, render loop registered");
            }
            (HostSignal::DocumentReady, LoopState::Running) => {
                tracing::warn!("duplicate document-ready signal ignored");
            }
        }
    }
}
