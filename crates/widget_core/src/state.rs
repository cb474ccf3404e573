use std::collections::BTreeSet;

use url::Url;

use crate::view_model::{OverlayView, Phase, SurfaceView};
use crate::{Effect, PreloadToken, ReadyPolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingPreload {
    token: PreloadToken,
    url: String,
}

/// The single per-page session: loaded address, readiness, overlay state and
/// the deferred preload slot.
///
/// `loaded_url` only ever moves forward: once set it is never cleared, only
/// replaced by a different address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetState {
    loaded_url: String,
    app_ready: bool,
    open: bool,
    surface: SurfaceView,
    pending_preload: Option<PendingPreload>,
    preload_candidate: Option<String>,
    page_loaded: bool,
    next_token: u64,
    ready_policy: ReadyPolicy,
    /// Origins of addresses replaced by a different one.
    superseded_origins: BTreeSet<String>,
    dropped_ready: u64,
    dirty: bool,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ready_policy(ready_policy: ReadyPolicy) -> Self {
        Self {
            ready_policy,
            ..Self::default()
        }
    }

    pub fn view(&self) -> OverlayView {
        OverlayView {
            open: self.open,
            surface: self.surface,
        }
    }

    pub fn phase(&self) -> Phase {
        self.view().phase()
    }

    /// Address currently assigned to the embedded surface, if any.
    pub fn loaded_url(&self) -> Option<&str> {
        (!self.loaded_url.is_empty()).then_some(self.loaded_url.as_str())
    }

    pub fn is_app_ready(&self) -> bool {
        self.app_ready
    }

    pub fn pending_preload(&self) -> Option<PreloadToken> {
        self.pending_preload.as_ref().map(|pending| pending.token)
    }

    pub fn is_page_loaded(&self) -> bool {
        self.page_loaded
    }

    /// How many ready signals were dropped as stale so far.
    pub fn dropped_ready_count(&self) -> u64 {
        self.dropped_ready
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Assigns `url` to the embedded surface unless it is empty or already
    /// loaded. Any outstanding deferred preload is cancelled first, so a user
    /// request always wins over an idle-time one.
    pub(crate) fn start_loading(&mut self, url: &str) -> Vec<Effect> {
        if url.is_empty() || url == self.loaded_url {
            return Vec::new();
        }
        let mut effects = Vec::with_capacity(2);
        if let Some(pending) = self.pending_preload.take() {
            effects.push(Effect::CancelPreload {
                token: pending.token,
            });
        }
        if let Some(previous) = origin_of(&self.loaded_url) {
            self.superseded_origins.insert(previous);
        }
        self.loaded_url = url.to_string();
        effects.push(Effect::LoadSurface {
            url: url.to_string(),
        });
        effects
    }

    /// Opens the overlay on `url`. A different address than the loaded one
    /// downgrades to the loading sub-state before it is requested.
    pub(crate) fn show(&mut self, url: &str) -> Vec<Effect> {
        if url.is_empty() {
            return Vec::new();
        }
        let mut effects = Vec::new();
        if url != self.loaded_url {
            self.app_ready = false;
            self.surface = SurfaceView::Loading;
            effects = self.start_loading(url);
        }
        self.open = true;
        if self.app_ready {
            self.surface = SurfaceView::Ready;
        }
        effects
    }

    /// Closes the overlay. Readiness and the loaded address survive so the
    /// same address reopens without a reload.
    pub(crate) fn hide(&mut self) {
        self.open = false;
    }

    /// Records readiness and reveals the surface if the overlay is open.
    /// Returns `false` when the signal was dropped as stale.
    pub(crate) fn mark_ready(&mut self, origin: Option<&str>) -> bool {
        if self.is_stale_origin(origin) {
            self.dropped_ready += 1;
            return false;
        }
        self.app_ready = true;
        if self.open {
            self.surface = SurfaceView::Ready;
        }
        true
    }

    pub(crate) fn trigger_bound(&mut self, url: &str) -> Vec<Effect> {
        if url.is_empty() {
            return Vec::new();
        }
        if self.page_loaded {
            return self.request_preload(url);
        }
        if self.preload_candidate.is_none() {
            self.preload_candidate = Some(url.to_string());
        }
        Vec::new()
    }

    pub(crate) fn page_loaded(&mut self) -> Vec<Effect> {
        if self.page_loaded {
            return Vec::new();
        }
        self.page_loaded = true;
        match self.preload_candidate.take() {
            Some(url) => self.request_preload(&url),
            None => Vec::new(),
        }
    }

    /// Runs the fired preload if it is still the pending one.
    pub(crate) fn preload_fired(&mut self, token: PreloadToken) -> Vec<Effect> {
        match self.pending_preload.take() {
            Some(pending) if pending.token == token => self.start_loading(&pending.url),
            other => {
                self.pending_preload = other;
                Vec::new()
            }
        }
    }

    /// Schedules at most one preload for the whole page, and only while
    /// nothing has been loaded.
    fn request_preload(&mut self, url: &str) -> Vec<Effect> {
        if !self.loaded_url.is_empty() || self.pending_preload.is_some() {
            return Vec::new();
        }
        self.next_token += 1;
        let token = PreloadToken(self.next_token);
        self.pending_preload = Some(PendingPreload {
            token,
            url: url.to_string(),
        });
        vec![Effect::SchedulePreload {
            token,
            url: url.to_string(),
        }]
    }

    /// A ready signal is stale only when it comes from the origin of a
    /// replaced address and not from the current one. Any other sender,
    /// including a surface that redirected elsewhere, is accepted.
    fn is_stale_origin(&self, sender: Option<&str>) -> bool {
        if self.ready_policy == ReadyPolicy::AnyOrigin {
            return false;
        }
        let Some(sender) = sender else {
            return false;
        };
        self.superseded_origins.contains(sender)
            && origin_of(&self.loaded_url).as_deref() != Some(sender)
    }
}

/// Serialized origin of an absolute address, e.g. `https://pay.example.com`.
/// Opaque origins and relative addresses yield `None`.
pub fn origin_of(url: &str) -> Option<String> {
    let origin = Url::parse(url).ok()?.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}
