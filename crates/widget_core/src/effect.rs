use std::fmt;

/// Identifies one deferred preload request.
///
/// Tokens are allocated by [`crate::WidgetState`] and never reused, so a
/// timer that fires after being cancelled can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreloadToken(pub u64);

impl fmt::Display for PreloadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preload#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Point the embedded surface at `url`.
    LoadSurface { url: String },
    /// Run `PreloadFired { token }` once the host is idle.
    SchedulePreload { token: PreloadToken, url: String },
    /// Drop a previously scheduled preload. Safe if it already fired.
    CancelPreload { token: PreloadToken },
}
