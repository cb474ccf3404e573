use widget_core::PreloadToken;

use crate::{HostError, ShellCommand};

/// The page the widget lives in, as seen by [`crate::WidgetRuntime`].
pub trait Host {
    /// Applies one rendering command to the isolation shell or page body.
    fn apply(&mut self, command: &ShellCommand) -> Result<(), HostError>;

    /// Assigns the embedded surface's source.
    fn set_surface_source(&mut self, url: &str) -> Result<(), HostError>;

    /// Arranges for `PreloadFired { token }` to be dispatched once the page is
    /// idle.
    fn schedule_preload(&mut self, token: PreloadToken) -> Result<(), HostError>;

    /// Cancels a scheduled preload. Must tolerate tokens that already fired.
    fn cancel_preload(&mut self, token: PreloadToken);

    /// Called when a preload callback has run, before it is applied.
    fn preload_settled(&mut self, _token: PreloadToken) {}
}
