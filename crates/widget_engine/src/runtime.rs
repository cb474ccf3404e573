use serde_json::Value;
use widget_core::{update, Effect, InboundMessage, Msg, PreloadToken, WidgetConfig, WidgetState};
use widget_logging::{widget_debug, widget_info, widget_trace, widget_warn};

use crate::{render, Host, TriggerRegistry, TriggerSource};

/// Owns the page's single [`WidgetState`] and drives a [`Host`] from it.
///
/// Every host callback funnels into [`WidgetRuntime::dispatch`], which runs
/// the pure update, executes its effects and repaints when the view changed.
pub struct WidgetRuntime<H: Host> {
    state: WidgetState,
    host: H,
    triggers: TriggerRegistry,
    config: WidgetConfig,
}

impl<H: Host> WidgetRuntime<H> {
    /// Creates the runtime and paints the initial closed view.
    pub fn new(host: H, config: WidgetConfig) -> Self {
        let mut runtime = Self {
            state: WidgetState::with_ready_policy(config.ready_policy),
            host,
            triggers: TriggerRegistry::new(),
            config,
        };
        runtime.paint();
        runtime
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn triggers(&self) -> &TriggerRegistry {
        &self.triggers
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn dispatch(&mut self, msg: Msg) {
        widget_trace!("dispatch {:?}", msg);
        let previous_url = self.state.loaded_url().map(ToOwned::to_owned);
        let before = self.state.phase();

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let dirty = state.consume_dirty();
        self.state = state;

        let after = self.state.phase();
        if before != after {
            widget_debug!("phase {:?} -> {:?}", before, after);
        }
        self.run_effects(effects, previous_url.as_deref());
        if dirty {
            self.paint();
        }
    }

    /// Opens the modal on `url`; the `open(url)` entry point.
    pub fn show(&mut self, url: &str) {
        self.dispatch(Msg::Show(url.to_string()));
    }

    /// Closes the modal; the `close()` entry point.
    pub fn hide(&mut self) {
        self.dispatch(Msg::Hide);
    }

    /// A bound trigger was clicked. Triggers without an address do nothing.
    pub fn trigger_clicked(&mut self, url: Option<&str>) {
        match url {
            Some(url) => self.show(url),
            None => widget_debug!("trigger without address clicked"),
        }
    }

    pub fn close_clicked(&mut self) {
        self.dispatch(Msg::CloseClicked);
    }

    pub fn backdrop_clicked(&mut self) {
        self.dispatch(Msg::BackdropClicked);
    }

    pub fn page_loaded(&mut self) {
        self.dispatch(Msg::PageLoaded);
    }

    pub fn preload_fired(&mut self, token: PreloadToken) {
        self.host.preload_settled(token);
        self.dispatch(Msg::PreloadFired { token });
    }

    /// Feeds a posted message payload from `origin`. Unrecognised payloads
    /// are dropped.
    pub fn receive(&mut self, payload: &Value, origin: Option<&str>) {
        let Some(message) = InboundMessage::parse(payload, origin, &self.config) else {
            widget_trace!("ignored message from {:?}", origin);
            return;
        };
        let dropped_before = self.state.dropped_ready_count();
        self.dispatch(Msg::Inbound(message));
        if self.state.dropped_ready_count() > dropped_before {
            widget_debug!("dropped stale ready signal from {:?}", origin);
        }
    }

    /// Binds every new trigger at or below `root`. Returns how many were bound.
    pub fn discover<S: TriggerSource>(&mut self, source: &mut S, root: &S::Node) -> usize {
        let bound = self.triggers.discover(source, root);
        let count = bound.len();
        for trigger in bound {
            self.dispatch(Msg::TriggerBound { url: trigger.url });
        }
        count
    }

    fn run_effects(&mut self, effects: Vec<Effect>, previous_url: Option<&str>) {
        for effect in effects {
            match effect {
                Effect::LoadSurface { url } => {
                    match previous_url {
                        Some(previous) => {
                            widget_info!("priority override: {} replaces {}", url, previous)
                        }
                        None => widget_info!("loading surface {}", url),
                    }
                    if let Err(err) = self.host.set_surface_source(&url) {
                        widget_warn!("failed to load surface {}: {}", url, err);
                    }
                }
                Effect::SchedulePreload { token, url } => {
                    widget_debug!("scheduling {} for {}", token, url);
                    if let Err(err) = self.host.schedule_preload(token) {
                        widget_warn!("failed to schedule {}: {}", token, err);
                    }
                }
                Effect::CancelPreload { token } => self.host.cancel_preload(token),
            }
        }
    }

    fn paint(&mut self) {
        for command in render(&self.state.view()) {
            if let Err(err) = self.host.apply(&command) {
                widget_warn!("failed to apply {:?}: {}", command, err);
            }
        }
    }
}
