//! Browser entry point: mounts the widget into the host page on load.
//!
//! Everything lives behind `wasm32`; other targets build an empty library so
//! the workspace still checks and tests natively.

#[cfg(target_arch = "wasm32")]
mod platform;

#[cfg(target_arch = "wasm32")]
pub use platform::{close, open};
