use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlIFrameElement, ShadowRootInit, ShadowRootMode,
};
use widget_core::{PreloadToken, WidgetConfig};
use widget_engine::{
    Host, HostError, PreloadScheduler, ShellCommand, ShellTemplate, CLOSE_CLASS, HIDDEN_CLASS,
    LOADER_CLASS, VISIBLE_CLASS,
};

use super::timers::BrowserTimer;
use super::{app, js_error};

/// The isolation shell mounted in the page, plus the page body it scroll-locks.
pub(crate) struct WebHost {
    body: HtmlElement,
    overlay: HtmlElement,
    loader: Element,
    surface: HtmlIFrameElement,
    /// Inline `overflow` of the body before the modal locked it.
    saved_overflow: Option<String>,
    scheduler: PreloadScheduler<BrowserTimer>,
}

impl WebHost {
    /// Builds the shell under a closed shadow root attached to `<body>`.
    pub(crate) fn mount(
        document: &Document,
        config: &WidgetConfig,
        timer: BrowserTimer,
    ) -> Result<Self, HostError> {
        let body = document.body().ok_or(HostError::MissingElement("body"))?;
        let template = ShellTemplate::from_config(config);

        let root = document.create_element("div").map_err(js_error)?;
        root.set_id(&template.host_id);
        body.append_child(&root).map_err(js_error)?;
        let shadow = root
            .attach_shadow(&ShadowRootInit::new(ShadowRootMode::Closed))
            .map_err(|_| HostError::ShellUnavailable)?;

        let style = document.create_element("style").map_err(js_error)?;
        style.set_text_content(Some(&template.styles));
        shadow.append_child(&style).map_err(js_error)?;

        let overlay: HtmlElement = document
            .create_element("div")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| HostError::MissingElement("overlay"))?;
        overlay.set_class_name(template.overlay_class());
        overlay.set_inner_html(&template.overlay_markup);
        shadow.append_child(&overlay).map_err(js_error)?;

        let loader = find(&overlay, &format!(".{LOADER_CLASS}"), "loader")?;
        let close_button = find(&overlay, &format!(".{CLOSE_CLASS}"), "close button")?;
        let surface: HtmlIFrameElement = shadow
            .get_element_by_id(&template.surface_id)
            .ok_or(HostError::MissingElement("surface"))?
            .dyn_into()
            .map_err(|_| HostError::MissingElement("surface"))?;

        listen(&close_button, move |_event| app::close_clicked())?;
        let backdrop = JsValue::from(overlay.clone());
        listen(&overlay, move |event| {
            // Only clicks on the dimmed area itself, not bubbled from the modal.
            if event.target().map(JsValue::from).as_ref() == Some(&backdrop) {
                app::backdrop_clicked();
            }
        })?;

        Ok(Self {
            body,
            overlay,
            loader,
            surface,
            saved_overflow: None,
            scheduler: PreloadScheduler::new(timer, config.preload_fallback_delay()),
        })
    }

    fn lock_scroll(&mut self) -> Result<(), HostError> {
        if self.saved_overflow.is_some() {
            return Ok(());
        }
        let style = self.body.style();
        let previous = style.get_property_value("overflow").map_err(js_error)?;
        style
            .set_property("overflow", "hidden")
            .map_err(js_error)?;
        self.saved_overflow = Some(previous);
        Ok(())
    }

    fn unlock_scroll(&mut self) -> Result<(), HostError> {
        let Some(previous) = self.saved_overflow.take() else {
            return Ok(());
        };
        let style = self.body.style();
        if previous.is_empty() {
            style.remove_property("overflow").map_err(js_error)?;
        } else {
            style
                .set_property("overflow", &previous)
                .map_err(js_error)?;
        }
        Ok(())
    }
}

impl Host for WebHost {
    fn apply(&mut self, command: &ShellCommand) -> Result<(), HostError> {
        match *command {
            ShellCommand::SetOverlayVisible(visible) => self
                .overlay
                .style()
                .set_property("display", if visible { "flex" } else { "none" })
                .map_err(js_error),
            ShellCommand::SetScrollLocked(true) => self.lock_scroll(),
            ShellCommand::SetScrollLocked(false) => self.unlock_scroll(),
            ShellCommand::SetLoaderVisible(visible) => self
                .loader
                .class_list()
                .toggle_with_force(HIDDEN_CLASS, !visible)
                .map(drop)
                .map_err(js_error),
            ShellCommand::SetSurfaceVisible(visible) => self
                .surface
                .class_list()
                .toggle_with_force(VISIBLE_CLASS, visible)
                .map(drop)
                .map_err(js_error),
        }
    }

    fn set_surface_source(&mut self, url: &str) -> Result<(), HostError> {
        self.surface.set_src(url);
        Ok(())
    }

    fn schedule_preload(&mut self, token: PreloadToken) -> Result<(), HostError> {
        self.scheduler.schedule(token)
    }

    fn cancel_preload(&mut self, token: PreloadToken) {
        self.scheduler.cancel(token);
    }

    fn preload_settled(&mut self, token: PreloadToken) {
        self.scheduler.settled(token);
    }
}

fn find(parent: &Element, selector: &str, what: &'static str) -> Result<Element, HostError> {
    parent
        .query_selector(selector)
        .map_err(js_error)?
        .ok_or(HostError::MissingElement(what))
}

fn listen(target: &Element, handler: impl FnMut(Event) + 'static) -> Result<(), HostError> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler).into_js_value();
    target
        .add_event_listener_with_callback("click", callback.unchecked_ref())
        .map_err(js_error)
}
