use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a "ready" signal is matched against the currently loaded address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadyPolicy {
    /// Drop a ready signal whose sender origin is known and differs from the
    /// origin of the loaded address.
    #[default]
    MatchOrigin,
    /// Any ready signal counts, whoever sent it.
    AnyOrigin,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid widget configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Names, sentinels and timings shared by every layer of the widget.
///
/// Missing keys in a JSON override fall back to [`WidgetConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Marker class carried by trigger elements.
    pub trigger_class: String,
    /// Attribute holding a trigger's target address.
    pub url_attribute: String,
    /// Attribute written on bound triggers. Informational only.
    pub bound_attribute: String,
    /// Id of the host element the shadow root is attached to.
    pub host_id: String,
    /// Id of the embedded surface frame inside the shadow root.
    pub surface_id: String,
    /// Permissions policy granted to the embedded surface.
    pub surface_allow: String,
    /// Delay used for the deferred preload when idle callbacks are missing.
    pub preload_fallback_delay_ms: u64,
    /// Rescan interval used when mutation observation is missing.
    pub observer_poll_interval_ms: u64,
    /// `type` of the object message announcing the surface is presentable.
    pub ready_type: String,
    /// `type` of the object message announcing a finished checkout.
    pub complete_type: String,
    /// Bare string message asking the widget to close.
    pub close_sentinel: String,
    /// Name of the global handle exposing `open`/`close`.
    pub global_name: String,
    pub ready_policy: ReadyPolicy,
    /// Maximum log level, as understood by `log::LevelFilter`.
    pub log_level: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            trigger_class: "vv-widget-trigger".to_string(),
            url_attribute: "data-url".to_string(),
            bound_attribute: "data-tw-ready".to_string(),
            host_id: "tw-root".to_string(),
            surface_id: "tw-iframe".to_string(),
            surface_allow: "payment".to_string(),
            preload_fallback_delay_ms: 2000,
            observer_poll_interval_ms: 1000,
            ready_type: "VV_WIDGET_READY".to_string(),
            complete_type: "CHECKOUT_COMPLETE".to_string(),
            close_sentinel: "VV_WIDGET_CLOSE".to_string(),
            global_name: "TicketWidget".to_string(),
            ready_policy: ReadyPolicy::default(),
            log_level: "info".to_string(),
        }
    }
}

impl WidgetConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn preload_fallback_delay(&self) -> Duration {
        Duration::from_millis(self.preload_fallback_delay_ms)
    }

    pub fn observer_poll_interval(&self) -> Duration {
        Duration::from_millis(self.observer_poll_interval_ms)
    }

    /// CSS selector matching every trigger element.
    pub fn trigger_selector(&self) -> String {
        format!(".{}", self.trigger_class)
    }
}
