/// Which half of the modal body is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceView {
    /// Spinner visible, embedded surface hidden.
    #[default]
    Loading,
    /// Embedded surface visible, spinner hidden.
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    OpenLoading,
    OpenReady,
}

/// Everything the renderer needs to paint the overlay.
///
/// `surface` is kept while closed: the shell keeps its last visual sub-state
/// so reopening the same address does not flash the spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayView {
    pub open: bool,
    pub surface: SurfaceView,
}

impl OverlayView {
    pub fn phase(&self) -> Phase {
        match (self.open, self.surface) {
            (false, _) => Phase::Closed,
            (true, SurfaceView::Loading) => Phase::OpenLoading,
            (true, SurfaceView::Ready) => Phase::OpenReady,
        }
    }

    /// Background scrolling is suppressed exactly while the modal is open.
    pub fn scroll_locked(&self) -> bool {
        self.open
    }
}
