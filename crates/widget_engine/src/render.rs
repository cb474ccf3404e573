use widget_core::{OverlayView, SurfaceView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    SetOverlayVisible(bool),
    /// Suppress (or restore) scrolling of the host page body.
    SetScrollLocked(bool),
    SetLoaderVisible(bool),
    SetSurfaceVisible(bool),
}

/// Full command list that brings the shell in line with `view`.
pub fn render(view: &OverlayView) -> Vec<ShellCommand> {
    let ready = view.surface == SurfaceView::Ready;
    vec![
        ShellCommand::SetLoaderVisible(!ready),
        ShellCommand::SetSurfaceVisible(ready),
        ShellCommand::SetOverlayVisible(view.open),
        ShellCommand::SetScrollLocked(view.scroll_locked()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_view_hides_overlay_and_shows_loader() {
        assert_eq!(
            render(&OverlayView::default()),
            vec![
                ShellCommand::SetLoaderVisible(true),
                ShellCommand::SetSurfaceVisible(false),
                ShellCommand::SetOverlayVisible(false),
                ShellCommand::SetScrollLocked(false),
            ]
        );
    }

    #[test]
    fn open_ready_view_locks_scroll_and_reveals_surface() {
        let view = OverlayView {
            open: true,
            surface: SurfaceView::Ready,
        };
        assert_eq!(
            render(&view),
            vec![
                ShellCommand::SetLoaderVisible(false),
                ShellCommand::SetSurfaceVisible(true),
                ShellCommand::SetOverlayVisible(true),
                ShellCommand::SetScrollLocked(true),
            ]
        );
    }
}
