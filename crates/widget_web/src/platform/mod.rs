mod app;
mod host;
mod logging;
mod timers;
mod triggers;

pub use app::{close, open};

use wasm_bindgen::JsValue;
use widget_engine::HostError;

fn js_error(err: JsValue) -> HostError {
    HostError::Js(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Whether `window` exposes a global named `name`.
fn has_global(window: &web_sys::Window, name: &str) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str(name)).unwrap_or(false)
}
