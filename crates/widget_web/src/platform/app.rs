use std::cell::RefCell;

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, MessageEvent, Window};
use widget_core::{PreloadToken, WidgetConfig};
use widget_engine::{HostError, WidgetRuntime};
use widget_logging::{widget_debug, widget_error, widget_info, widget_warn};

use super::host::WebHost;
use super::timers::BrowserTimer;
use super::triggers::{self, DomTriggerSource};
use super::{js_error, logging};

/// Optional page-provided configuration object.
const CONFIG_GLOBAL: &str = "TicketWidgetConfig";

thread_local! {
    static RUNTIME: RefCell<Option<WidgetRuntime<WebHost>>> = const { RefCell::new(None) };
    static TRIGGERS: RefCell<Option<DomTriggerSource>> = const { RefCell::new(None) };
}

fn with_runtime(f: impl FnOnce(&mut WidgetRuntime<WebHost>)) {
    RUNTIME.with(|slot| match slot.try_borrow_mut() {
        Ok(mut guard) => match guard.as_mut() {
            Some(runtime) => f(runtime),
            None => widget_debug!("widget not mounted; event dropped"),
        },
        Err(_) => widget_warn!("widget busy; event dropped"),
    });
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let (config, config_error) = load_config(&window);
    logging::initialize(widget_logging::parse_level(&config.log_level));
    if let Some(err) = config_error {
        widget_warn!("{}; using defaults", err);
    }

    if document.get_element_by_id(&config.host_id).is_some() {
        widget_info!("widget already mounted; skipping second start");
        return;
    }
    if let Err(err) = mount(&window, &document, config) {
        widget_error!("widget failed to start: {}", err);
    }
}

/// Opens the modal on `url`, as if a trigger pointing at it was clicked.
#[wasm_bindgen]
pub fn open(url: &str) {
    with_runtime(|runtime| runtime.show(url));
}

#[wasm_bindgen]
pub fn close() {
    with_runtime(|runtime| runtime.hide());
}

pub(crate) fn trigger_clicked(url: Option<&str>) {
    with_runtime(|runtime| runtime.trigger_clicked(url));
}

pub(crate) fn close_clicked() {
    with_runtime(|runtime| runtime.close_clicked());
}

pub(crate) fn backdrop_clicked() {
    with_runtime(|runtime| runtime.backdrop_clicked());
}

pub(crate) fn preload_fired(token: PreloadToken) {
    with_runtime(|runtime| runtime.preload_fired(token));
}

/// Binds every new trigger at or below `root`.
pub(crate) fn discover(root: &Element) {
    TRIGGERS.with(|slot| {
        let Ok(mut guard) = slot.try_borrow_mut() else {
            return;
        };
        if let Some(source) = guard.as_mut() {
            with_runtime(|runtime| {
                runtime.discover(source, root);
            });
        }
    });
}

fn load_config(window: &Window) -> (WidgetConfig, Option<String>) {
    let raw = match Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => value,
        _ => return (WidgetConfig::default(), None),
    };
    let parsed = js_sys::JSON::stringify(&raw)
        .ok()
        .and_then(|json| json.as_string())
        .ok_or_else(|| format!("{CONFIG_GLOBAL} is not serializable"))
        .and_then(|json| WidgetConfig::from_json(&json).map_err(|err| err.to_string()));
    match parsed {
        Ok(config) => (config, None),
        Err(err) => (WidgetConfig::default(), Some(err)),
    }
}

fn mount(window: &Window, document: &Document, config: WidgetConfig) -> Result<(), HostError> {
    let body: Element = document
        .body()
        .ok_or(HostError::MissingElement("body"))?
        .into();

    let host = WebHost::mount(document, &config, BrowserTimer::new(window.clone()))?;
    let global_name = config.global_name.clone();
    TRIGGERS.with(|slot| *slot.borrow_mut() = Some(DomTriggerSource::new(&config)));
    RUNTIME.with(|slot| *slot.borrow_mut() = Some(WidgetRuntime::new(host, config.clone())));

    listen_for_messages(window)?;
    triggers::observe(window, &body, &config)?;
    discover(&body);
    notify_page_loaded(window, document)?;
    install_global(window, &global_name)?;
    widget_info!("widget mounted");
    Ok(())
}

fn notify_page_loaded(window: &Window, document: &Document) -> Result<(), HostError> {
    let ready_state = Reflect::get(document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|value| value.as_string());
    if ready_state.as_deref() == Some("complete") {
        with_runtime(|runtime| runtime.page_loaded());
        return Ok(());
    }
    let callback = Closure::once_into_js(|| with_runtime(|runtime| runtime.page_loaded()));
    window
        .add_event_listener_with_callback("load", callback.unchecked_ref())
        .map_err(js_error)
}

fn listen_for_messages(window: &Window) -> Result<(), HostError> {
    let callback = Closure::<dyn FnMut(Event)>::new(|event: Event| {
        let Ok(event) = event.dyn_into::<MessageEvent>() else {
            return;
        };
        // Unserializable payloads (functions, cycles) are never ours.
        let Some(payload) = js_sys::JSON::stringify(&event.data())
            .ok()
            .and_then(|json| json.as_string())
            .and_then(|json| serde_json::from_str(&json).ok())
        else {
            return;
        };
        let origin = event.origin();
        with_runtime(|runtime| runtime.receive(&payload, Some(&origin)));
    })
    .into_js_value();
    window
        .add_event_listener_with_callback("message", callback.unchecked_ref())
        .map_err(js_error)
}

/// Exposes `window.<global_name> = { open(url), close() }`.
fn install_global(window: &Window, global_name: &str) -> Result<(), HostError> {
    let handle = Object::new();
    let open_fn = Closure::<dyn FnMut(JsValue)>::new(|url: JsValue| {
        let url = url.as_string().unwrap_or_default();
        open(&url);
    })
    .into_js_value();
    let close_fn = Closure::<dyn FnMut()>::new(close).into_js_value();

    Reflect::set(&handle, &JsValue::from_str("open"), &open_fn).map_err(js_error)?;
    Reflect::set(&handle, &JsValue::from_str("close"), &close_fn).map_err(js_error)?;
    Reflect::set(window, &JsValue::from_str(global_name), &handle).map_err(js_error)?;
    Ok(())
}
