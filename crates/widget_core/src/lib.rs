//! Widget core: pure state machine, configuration and inbound message parsing.
mod config;
mod effect;
mod inbound;
mod msg;
mod state;
mod update;
mod view_model;

pub use config::{ConfigError, ReadyPolicy, WidgetConfig};
pub use effect::{Effect, PreloadToken};
pub use inbound::{InboundKind, InboundMessage};
pub use msg::Msg;
pub use state::{origin_of, WidgetState};
pub use update::update;
pub use view_model::{OverlayView, Phase, SurfaceView};
