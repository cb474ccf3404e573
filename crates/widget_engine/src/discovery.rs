use std::collections::HashSet;

use widget_logging::{widget_debug, widget_warn};

use crate::HostError;

/// Stable identity of a host element for the lifetime of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(pub u64);

/// A trigger element that has just been bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub key: ElementKey,
    /// Target address; `None` when the attribute is missing or blank.
    pub url: Option<String>,
}

/// Read and bind access to the host document's elements.
pub trait TriggerSource {
    type Node;

    /// Identity of `node`, assigned on first sight. `None` when the element
    /// cannot carry one; such elements are left unbound.
    fn key(&mut self, node: &Self::Node) -> Option<ElementKey>;

    /// Whether `node` itself carries the trigger marker.
    fn is_trigger(&self, node: &Self::Node) -> bool;

    /// Every trigger strictly below `node`, in document order.
    fn descendant_triggers(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn target_url(&self, node: &Self::Node) -> Option<String>;

    /// Attaches the click handler to `node`.
    fn bind(&mut self, node: &Self::Node, trigger: &Trigger) -> Result<(), HostError>;
}

/// The set of elements already bound. Binding is once per element, no matter
/// how often an element is seen by scans or mutation records.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    bound: HashSet<ElementKey>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds every unbound trigger at or below `root` and returns them.
    pub fn discover<S: TriggerSource>(&mut self, source: &mut S, root: &S::Node) -> Vec<Trigger> {
        let descendants = source.descendant_triggers(root);
        let mut nodes = Vec::with_capacity(descendants.len() + 1);
        if source.is_trigger(root) {
            nodes.push(root);
        }
        nodes.extend(descendants.iter());

        let mut bound = Vec::new();
        for node in nodes {
            let Some(key) = source.key(node) else {
                widget_debug!("trigger has no stable identity; skipped");
                continue;
            };
            if !self.bound.insert(key) {
                continue;
            }
            let url = source
                .target_url(node)
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty());
            let trigger = Trigger { key, url };
            match source.bind(node, &trigger) {
                Ok(()) => {
                    widget_debug!("bound trigger {:?} url={:?}", key, trigger.url);
                    bound.push(trigger);
                }
                Err(err) => {
                    widget_warn!("failed to bind trigger {:?}: {}", key, err);
                    self.bound.remove(&key);
                }
            }
        }
        bound
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}
