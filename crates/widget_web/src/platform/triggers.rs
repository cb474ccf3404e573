use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, MutationObserver, MutationObserverInit, MutationRecord, Node, Window,
};
use widget_core::WidgetConfig;
use widget_engine::{ElementKey, HostError, Trigger, TriggerSource};
use widget_logging::{widget_info, widget_warn};

use super::{app, has_global, js_error};

/// Expando property holding an element's [`ElementKey`].
const KEY_PROPERTY: &str = "__ticketWidgetKey";

/// Trigger lookup and binding over live DOM elements.
pub(crate) struct DomTriggerSource {
    class: String,
    selector: String,
    url_attribute: String,
    bound_attribute: String,
    next_key: u64,
}

impl DomTriggerSource {
    pub(crate) fn new(config: &WidgetConfig) -> Self {
        Self {
            class: config.trigger_class.clone(),
            selector: config.trigger_selector(),
            url_attribute: config.url_attribute.clone(),
            bound_attribute: config.bound_attribute.clone(),
            next_key: 0,
        }
    }
}

impl TriggerSource for DomTriggerSource {
    type Node = Element;

    fn key(&mut self, node: &Element) -> Option<ElementKey> {
        let property = JsValue::from_str(KEY_PROPERTY);
        if let Some(key) = js_sys::Reflect::get(node, &property)
            .ok()
            .and_then(|value| value.as_f64())
        {
            return Some(ElementKey(key as u64));
        }
        let next = self.next_key + 1;
        // Frozen or proxied elements refuse the expando; a key that does not
        // stick would make every scan see a new element.
        match js_sys::Reflect::set(node, &property, &JsValue::from_f64(next as f64)) {
            Ok(true) => {
                self.next_key = next;
                Some(ElementKey(next))
            }
            Ok(false) | Err(_) => {
                widget_warn!("cannot tag trigger <{}>", node.tag_name().to_lowercase());
                None
            }
        }
    }

    fn is_trigger(&self, node: &Element) -> bool {
        node.class_list().contains(&self.class)
    }

    fn descendant_triggers(&self, node: &Element) -> Vec<Element> {
        let Ok(list) = node.query_selector_all(&self.selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn target_url(&self, node: &Element) -> Option<String> {
        node.get_attribute(&self.url_attribute)
    }

    fn bind(&mut self, node: &Element, trigger: &Trigger) -> Result<(), HostError> {
        let url = trigger.url.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            app::trigger_clicked(url.as_deref());
        })
        .into_js_value();
        node.add_event_listener_with_callback("click", callback.unchecked_ref())
            .map_err(js_error)?;
        node.set_attribute(&self.bound_attribute, "true")
            .map_err(js_error)
    }
}

/// Feeds every element added anywhere under `body` into discovery. Pages
/// without `MutationObserver` get a periodic full rescan instead.
pub(crate) fn observe(
    window: &Window,
    body: &Element,
    config: &WidgetConfig,
) -> Result<(), HostError> {
    if !has_global(window, "MutationObserver") {
        let interval = config.observer_poll_interval();
        widget_info!("MutationObserver unavailable; rescanning every {:?}", interval);
        let rescan_root = body.clone();
        let callback =
            Closure::<dyn FnMut()>::new(move || app::discover(&rescan_root)).into_js_value();
        let interval_ms = i32::try_from(interval.as_millis()).unwrap_or(i32::MAX);
        window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                interval_ms,
            )
            .map_err(js_error)?;
        return Ok(());
    }

    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        |records: js_sys::Array, _observer: MutationObserver| {
            for record in records.iter() {
                let Ok(record) = record.dyn_into::<MutationRecord>() else {
                    continue;
                };
                let added = record.added_nodes();
                for index in 0..added.length() {
                    let Some(node) = added.item(index) else {
                        continue;
                    };
                    if node.node_type() != Node::ELEMENT_NODE {
                        continue;
                    }
                    if let Ok(element) = node.dyn_into::<Element>() {
                        app::discover(&element);
                    }
                }
            }
        },
    )
    .into_js_value();

    let observer = MutationObserver::new(callback.unchecked_ref()).map_err(js_error)?;
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    observer
        .observe_with_options(body, &options)
        .map_err(js_error)
}
