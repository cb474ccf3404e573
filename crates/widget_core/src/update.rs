use crate::{Effect, InboundKind, Msg, WidgetState};

/// Pure update function: applies a message to state and returns any effects.
///
/// The state is marked dirty whenever the rendered view changes.
pub fn update(mut state: WidgetState, msg: Msg) -> (WidgetState, Vec<Effect>) {
    let before = state.view();
    let effects = match msg {
        Msg::Show(url) => state.show(url.trim()),
        Msg::Hide | Msg::CloseClicked | Msg::BackdropClicked => {
            state.hide();
            Vec::new()
        }
        Msg::TriggerBound { url } => match url {
            Some(url) => state.trigger_bound(url.trim()),
            None => Vec::new(),
        },
        Msg::PageLoaded => state.page_loaded(),
        Msg::PreloadFired { token } => state.preload_fired(token),
        Msg::Inbound(message) => {
            match message.kind {
                InboundKind::Ready => {
                    state.mark_ready(message.origin.as_deref());
                }
                InboundKind::Close | InboundKind::CheckoutComplete => state.hide(),
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    if state.view() != before {
        state.mark_dirty();
    }
    (state, effects)
}
