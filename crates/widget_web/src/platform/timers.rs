use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;
use widget_core::PreloadToken;
use widget_engine::{HostError, IdleTimer};

use super::{app, has_global, js_error};

pub(crate) enum TimerHandle {
    Idle(u32),
    Timeout(i32),
}

/// `requestIdleCallback` with a `setTimeout` fallback, both reporting back
/// through [`app::preload_fired`].
pub(crate) struct BrowserTimer {
    window: Window,
    idle_supported: bool,
}

impl BrowserTimer {
    pub(crate) fn new(window: Window) -> Self {
        let idle_supported = has_global(&window, "requestIdleCallback");
        Self {
            window,
            idle_supported,
        }
    }
}

fn fire(token: PreloadToken) -> JsValue {
    Closure::once_into_js(move || app::preload_fired(token))
}

impl IdleTimer for BrowserTimer {
    type Handle = TimerHandle;

    fn request_idle(&mut self, token: PreloadToken) -> Option<TimerHandle> {
        if !self.idle_supported {
            return None;
        }
        let callback = fire(token);
        self.window
            .request_idle_callback(callback.unchecked_ref())
            .ok()
            .map(TimerHandle::Idle)
    }

    fn set_timeout(
        &mut self,
        token: PreloadToken,
        delay: Duration,
    ) -> Result<TimerHandle, HostError> {
        let callback = fire(token);
        let delay_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms,
            )
            .map(TimerHandle::Timeout)
            .map_err(js_error)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        match handle {
            TimerHandle::Idle(id) => self.window.cancel_idle_callback(id),
            TimerHandle::Timeout(id) => self.window.clear_timeout_with_handle(id),
        }
    }
}
