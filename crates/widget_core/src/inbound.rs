use serde_json::Value;

use crate::WidgetConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundKind {
    /// `{ "type": <ready_type> }`
    Ready,
    /// `{ "type": <complete_type> }`
    CheckoutComplete,
    /// The bare `<close_sentinel>` string.
    Close,
}

/// A message from the embedded surface that the widget understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub kind: InboundKind,
    /// Origin reported by the host for the sender, if any.
    pub origin: Option<String>,
}

impl InboundMessage {
    pub fn new(kind: InboundKind, origin: Option<String>) -> Self {
        Self { kind, origin }
    }

    /// Classifies a posted payload. Anything unrecognised yields `None`;
    /// the page may receive messages from unrelated senders.
    pub fn parse(payload: &Value, origin: Option<&str>, config: &WidgetConfig) -> Option<Self> {
        let kind = match payload {
            Value::String(text) if *text == config.close_sentinel => InboundKind::Close,
            Value::Object(fields) => match fields.get("type").and_then(Value::as_str) {
                Some(kind) if kind == config.ready_type => InboundKind::Ready,
                Some(kind) if kind == config.complete_type => InboundKind::CheckoutComplete,
                _ => return None,
            },
            _ => return None,
        };
        let origin = origin
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(ToOwned::to_owned);
        Some(Self::new(kind, origin))
    }
}
