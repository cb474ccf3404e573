use std::collections::HashMap;
use std::time::Duration;

use widget_core::PreloadToken;
use widget_logging::{widget_debug, widget_trace};

use crate::HostError;

/// Timer primitives offered by the page.
pub trait IdleTimer {
    type Handle;

    /// Queues `token` for when the page is idle. `None` means the page has no
    /// idle callback support.
    fn request_idle(&mut self, token: PreloadToken) -> Option<Self::Handle>;

    /// Queues `token` after a fixed delay.
    fn set_timeout(&mut self, token: PreloadToken, delay: Duration)
        -> Result<Self::Handle, HostError>;

    fn cancel(&mut self, handle: Self::Handle);
}

/// Tracks outstanding preload callbacks by token, preferring idle callbacks
/// and falling back to a fixed delay.
pub struct PreloadScheduler<T: IdleTimer> {
    timer: T,
    fallback_delay: Duration,
    pending: HashMap<PreloadToken, T::Handle>,
}

impl<T: IdleTimer> PreloadScheduler<T> {
    pub fn new(timer: T, fallback_delay: Duration) -> Self {
        Self {
            timer,
            fallback_delay,
            pending: HashMap::new(),
        }
    }

    pub fn schedule(&mut self, token: PreloadToken) -> Result<(), HostError> {
        let handle = match self.timer.request_idle(token) {
            Some(handle) => {
                widget_debug!("{} queued for idle time", token);
                handle
            }
            None => {
                widget_debug!(
                    "{} queued after {:?}: idle callbacks unavailable",
                    token,
                    self.fallback_delay
                );
                self.timer.set_timeout(token, self.fallback_delay)?
            }
        };
        if let Some(previous) = self.pending.insert(token, handle) {
            self.timer.cancel(previous);
        }
        Ok(())
    }

    /// Cancels `token` if it is still outstanding; otherwise a no-op.
    pub fn cancel(&mut self, token: PreloadToken) {
        match self.pending.remove(&token) {
            Some(handle) => {
                widget_debug!("{} cancelled", token);
                self.timer.cancel(handle);
            }
            None => widget_trace!("{} already settled", token),
        }
    }

    /// Forgets `token` after its callback ran.
    pub fn settled(&mut self, token: PreloadToken) {
        self.pending.remove(&token);
    }

    pub fn is_pending(&self, token: PreloadToken) -> bool {
        self.pending.contains_key(&token)
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}
