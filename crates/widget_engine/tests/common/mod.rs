#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Once;

use widget_core::{PreloadToken, WidgetConfig};
use widget_engine::{ElementKey, Host, HostError, ShellCommand, Trigger, TriggerSource};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(widget_logging::initialize_for_tests);
}

/// Records everything the runtime asks of the page.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub commands: Vec<ShellCommand>,
    pub sources: Vec<String>,
    pub scheduled: Vec<PreloadToken>,
    pub cancelled: Vec<PreloadToken>,
    pub settled: Vec<PreloadToken>,
    pub overlay_visible: bool,
    pub loader_visible: bool,
    pub surface_visible: bool,
    pub scroll_locked: bool,
    pub fail_schedule: bool,
}

impl FakeHost {
    pub fn take_commands(&mut self) -> Vec<ShellCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn spinner_showing(&self) -> bool {
        self.overlay_visible && self.loader_visible && !self.surface_visible
    }

    pub fn content_showing(&self) -> bool {
        self.overlay_visible && self.surface_visible && !self.loader_visible
    }
}

impl Host for FakeHost {
    fn apply(&mut self, command: &ShellCommand) -> Result<(), HostError> {
        match *command {
            ShellCommand::SetOverlayVisible(visible) => self.overlay_visible = visible,
            ShellCommand::SetScrollLocked(locked) => self.scroll_locked = locked,
            ShellCommand::SetLoaderVisible(visible) => self.loader_visible = visible,
            ShellCommand::SetSurfaceVisible(visible) => self.surface_visible = visible,
        }
        self.commands.push(*command);
        Ok(())
    }

    fn set_surface_source(&mut self, url: &str) -> Result<(), HostError> {
        self.sources.push(url.to_string());
        Ok(())
    }

    fn schedule_preload(&mut self, token: PreloadToken) -> Result<(), HostError> {
        if self.fail_schedule {
            return Err(HostError::Js("requestIdleCallback threw".to_string()));
        }
        self.scheduled.push(token);
        Ok(())
    }

    fn cancel_preload(&mut self, token: PreloadToken) {
        self.cancelled.push(token);
    }

    fn preload_settled(&mut self, token: PreloadToken) {
        self.settled.push(token);
    }
}

#[derive(Debug, Default)]
struct FakeElement {
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    children: Vec<usize>,
    key: Option<u64>,
    bound_url: Option<Option<String>>,
}

/// A tiny element tree standing in for the host document.
#[derive(Debug)]
pub struct FakeDocument {
    config: WidgetConfig,
    elements: Vec<FakeElement>,
    next_key: u64,
    pub bind_calls: usize,
}

pub const BODY: usize = 0;

impl FakeDocument {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            config: config.clone(),
            elements: vec![FakeElement::default()],
            next_key: 0,
            bind_calls: 0,
        }
    }

    pub fn append(&mut self, parent: usize, classes: &[&str], url: Option<&str>) -> usize {
        let mut element = FakeElement {
            classes: classes.iter().map(|class| class.to_string()).collect(),
            ..FakeElement::default()
        };
        if let Some(url) = url {
            element
                .attributes
                .insert(self.config.url_attribute.clone(), url.to_string());
        }
        self.elements.push(element);
        let id = self.elements.len() - 1;
        self.elements[parent].children.push(id);
        id
    }

    pub fn append_trigger(&mut self, parent: usize, url: &str) -> usize {
        let class = self.config.trigger_class.clone();
        self.append(parent, &[class.as_str()], Some(url))
    }

    /// Address the click handler of `node` was bound with, if bound.
    pub fn click_target(&self, node: usize) -> Option<Option<String>> {
        self.elements[node].bound_url.clone()
    }

    pub fn attribute(&self, node: usize, name: &str) -> Option<&str> {
        self.elements[node].attributes.get(name).map(String::as_str)
    }

    fn collect(&self, node: usize, out: &mut Vec<usize>) {
        for &child in &self.elements[node].children {
            if self.is_trigger(&child) {
                out.push(child);
            }
            self.collect(child, out);
        }
    }
}

impl TriggerSource for FakeDocument {
    type Node = usize;

    fn key(&mut self, node: &usize) -> Option<ElementKey> {
        let element = &mut self.elements[*node];
        let key = match element.key {
            Some(key) => key,
            None => {
                self.next_key += 1;
                element.key = Some(self.next_key);
                self.next_key
            }
        };
        Some(ElementKey(key))
    }

    fn is_trigger(&self, node: &usize) -> bool {
        self.elements[*node]
            .classes
            .iter()
            .any(|class| *class == self.config.trigger_class)
    }

    fn descendant_triggers(&self, node: &usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect(*node, &mut out);
        out
    }

    fn target_url(&self, node: &usize) -> Option<String> {
        self.attribute(*node, &self.config.url_attribute)
            .map(ToOwned::to_owned)
    }

    fn bind(&mut self, node: &usize, trigger: &Trigger) -> Result<(), HostError> {
        self.bind_calls += 1;
        let element = &mut self.elements[*node];
        element
            .attributes
            .insert(self.config.bound_attribute.clone(), "true".to_string());
        element.bound_url = Some(trigger.url.clone());
        Ok(())
    }
}
