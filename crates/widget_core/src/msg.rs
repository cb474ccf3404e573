use crate::{InboundMessage, PreloadToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A trigger was clicked, or the host page called `open(url)`.
    Show(String),
    /// The host page called `close()`.
    Hide,
    /// User clicked the close button inside the modal.
    CloseClicked,
    /// User clicked the dimmed backdrop outside the modal.
    BackdropClicked,
    /// Trigger discovery bound a new element.
    TriggerBound { url: Option<String> },
    /// The host document finished loading.
    PageLoaded,
    /// A deferred preload callback ran.
    PreloadFired { token: PreloadToken },
    /// The embedded surface posted a recognised message.
    Inbound(InboundMessage),
    /// Fallback for placeholder wiring.
    NoOp,
}
