//! Boundary with the host page that embeds the viewport.

/// Loading phase of the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    pub fn is_loading(self) -> bool {
        self == ReadyState::Loading
    }
}

/// Events the host delivers to a started viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// The document finished loading.
    DocumentReady,
    /// The drawable region's layout size changed.
    Resized,
}

/// What the viewport needs from its host.
pub trait HostPage {
    fn ready_state(&self) -> ReadyState;

    /// Run `f` without the host's change observers seeing it.
    fn run_outside_observers(&mut self, f: &mut dyn FnMut());
}

/// In-memory host used by the CLI and tests.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    ready: ReadyState,
    outside: bool,
    outside_runs: usize,
}

impl HeadlessHost {
    pub fn new(ready: ReadyState) -> Self {
        Self {
            ready,
            outside: false,
            outside_runs: 0,
        }
    }

    /// Advance the document phase. The caller delivers
    /// [`HostSignal::DocumentReady`] to the viewport itself.
    pub fn set_ready_state(&mut self, ready: ReadyState) {
        self.ready = ready;
    }

    /// How many blocks have run outside the observers.
    pub fn outside_runs(&self) -> usize {
        self.outside_runs
    }

    /// Whether a block is running outside the observers right now.
    pub fn is_outside(&self) -> bool {
        self.outside
    }
}

impl HostPage for HeadlessHost {
    fn ready_state(&self) -> ReadyState {
        self.ready
    }

    fn run_outside_observers(&mut self, f: &mut dyn FnMut()) {
        self.outside = true;
        self.outside_runs += 1;
        f();
        self.outside = false;
    }
}
