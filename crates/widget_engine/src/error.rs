use thiserror::Error;

/// Failures reported by a host page implementation.
///
/// None of these reach the page: the runtime logs them and carries on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("isolation shell is unavailable")]
    ShellUnavailable,
    #[error("missing element: {0}")]
    MissingElement(&'static str),
    #[error("host call failed: {0}")]
    Js(String),
}
