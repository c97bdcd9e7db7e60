use crate::config::DomHostConfig;
use crate::container::Container;
use crate::context::HostContext;
use crate::error::HostError;
use crate::events::{EventDelivery, EventSwitch};
use crate::nesting::HtmlNestingRules;
use crate::property::{AttributeEngine, PropertyEngine, is_event_prop};
use crate::props::{PropValue, Props};
use crate::selection::{DocumentSelection, FocusSelection};
use crate::validate::{AdvisoryValidator, NestingValidator, NoopValidator};
use core_types::{FiberHandle, HandlerId};
use host_tree::{HostDocument, NodeKey};
use std::collections::HashMap;
use std::time::Instant;

/// Where the host is in the commit bracket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitPhase {
    Idle,
    Preparing,
    Mutating,
    Restoring,
}

/// The host adapter: owns the document and the collaborators the
/// reconciler's instructions are carried out with.
pub struct DomHost {
    pub(crate) config: DomHostConfig,
    pub(crate) document: HostDocument,
    pub(crate) validator: Box<dyn NestingValidator>,
    pub(crate) properties: Box<dyn PropertyEngine>,
    pub(crate) events: Box<dyn EventDelivery>,
    pub(crate) selection: Box<dyn FocusSelection>,
    pub(crate) phase: CommitPhase,
    owners: HashMap<NodeKey, FiberHandle>,
    instances: HashMap<FiberHandle, NodeKey>,
    latest_props: HashMap<NodeKey, Props>,
    started: Instant,
}

impl DomHost {
    pub fn new(config: DomHostConfig) -> Self {
        Self::with_document(config, HostDocument::new())
    }

    pub fn with_document(config: DomHostConfig, document: HostDocument) -> Self {
        let validator: Box<dyn NestingValidator> = if config.validate_nesting {
            Box::new(AdvisoryValidator::new(HtmlNestingRules))
        } else {
            Box::new(NoopValidator)
        };
        Self {
            config,
            document,
            validator,
            properties: Box::new(AttributeEngine),
            events: Box::new(EventSwitch::default()),
            selection: Box::new(DocumentSelection),
            phase: CommitPhase::Idle,
            owners: HashMap::new(),
            instances: HashMap::new(),
            latest_props: HashMap::new(),
            started: Instant::now(),
        }
    }

    pub fn with_property_engine(mut self, engine: impl PropertyEngine + 'static) -> Self {
        self.properties = Box::new(engine);
        self
    }

    pub fn with_event_delivery(mut self, events: impl EventDelivery + 'static) -> Self {
        self.events = Box::new(events);
        self
    }

    pub fn with_focus_selection(mut self, selection: impl FocusSelection + 'static) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Replaces the validator chosen from the configuration.
    pub fn with_validator(mut self, validator: impl NestingValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn config(&self) -> &DomHostConfig {
        &self.config
    }

    pub fn is_primary_renderer(&self) -> bool {
        self.config.is_primary_renderer
    }

    pub fn document(&self) -> &HostDocument {
        &self.document
    }

    /// Direct document access, for setting up containers and for tests.
    pub fn document_mut(&mut self) -> &mut HostDocument {
        &mut self.document
    }

    pub fn events(&self) -> &dyn EventDelivery {
        &*self.events
    }

    pub fn validator(&self) -> &dyn NestingValidator {
        &*self.validator
    }

    pub fn commit_phase(&self) -> CommitPhase {
        self.phase
    }

    /// Milliseconds since this host was created; monotonic.
    pub fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    // ---------------------------------------------------------------------
    // Host contexts
    // ---------------------------------------------------------------------

    /// Classifies `key` as a root container.
    pub fn container(&self, key: NodeKey) -> Result<Container, HostError> {
        Container::from_node(&self.document, key)
    }

    pub fn root_host_context(&self, container: Container) -> Result<HostContext, HostError> {
        HostContext::for_root(&self.document, container, self.config.validate_nesting)
    }

    pub fn child_host_context(&self, parent: &HostContext, tag: &str) -> HostContext {
        parent.child(tag)
    }

    // ---------------------------------------------------------------------
    // Instance bookkeeping
    // ---------------------------------------------------------------------

    pub(crate) fn precache(&mut self, handle: FiberHandle, node: NodeKey) {
        self.owners.insert(node, handle);
        self.instances.insert(handle, node);
    }

    pub(crate) fn store_props(&mut self, node: NodeKey, props: &Props) {
        self.latest_props.insert(node, props.clone());
    }

    /// Drops the handle and props records of `root` and everything below it.
    pub(crate) fn forget_subtree(&mut self, root: NodeKey) {
        let mut pending = vec![root];
        while let Some(node) = pending.pop() {
            if let Some(handle) = self.owners.remove(&node)
                && self.instances.get(&handle) == Some(&node)
            {
                self.instances.remove(&handle);
            }
            self.latest_props.remove(&node);
            pending.extend_from_slice(self.document.children(node));
        }
    }

    /// Abstract-node handle that created `node`.
    pub fn handle_for(&self, node: NodeKey) -> Option<FiberHandle> {
        self.owners.get(&node).copied()
    }

    /// Host node created for `handle`.
    pub fn instance_for(&self, handle: FiberHandle) -> Option<NodeKey> {
        self.instances.get(&handle).copied()
    }

    /// Latest committed props of an element, as event delivery sees them.
    pub fn current_props(&self, node: NodeKey) -> Option<&Props> {
        self.latest_props.get(&node)
    }

    /// Handler registered under `event_prop` (e.g. `onClick`) in the latest
    /// committed props of `node`. `None` while event delivery is suspended.
    pub fn event_handler(&self, node: NodeKey, event_prop: &str) -> Option<HandlerId> {
        if !self.events.is_enabled() {
            log::trace!(
                target: "dom_host.events",
                "{event_prop} on {node} dropped: delivery suspended"
            );
            return None;
        }
        if !is_event_prop(event_prop) {
            return None;
        }
        match self.current_props(node)?.get(event_prop)? {
            PropValue::Handler(id) => Some(*id),
            _ => None,
        }
    }
}

impl Default for DomHost {
    fn default() -> Self {
        Self::new(DomHostConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validator_follows_configuration() {
        let mut dev = DomHost::new(DomHostConfig::development());
        let mut prod = DomHost::default();
        let table = crate::ancestor::AncestorInfo::for_root("table");
        dev.validator.validate_text("x", &table);
        prod.validator.validate_text("x", &table);
        assert_eq!(dev.validator().advisories().len(), 1);
        assert!(prod.validator().advisories().is_empty());
    }

    #[derive(Default)]
    struct TagLog(std::rc::Rc<std::cell::RefCell<Vec<String>>>);

    impl NestingValidator for TagLog {
        fn validate_tag(&mut self, tag: &str, _ancestors: &crate::ancestor::AncestorInfo) {
            self.0.borrow_mut().push(tag.to_owned());
        }

        fn validate_text(&mut self, _text: &str, _ancestors: &crate::ancestor::AncestorInfo) {}
    }

    #[test]
    fn custom_validator_replaces_the_configured_one() {
        let tags = TagLog::default();
        let seen = std::rc::Rc::clone(&tags.0);
        let mut host = DomHost::new(DomHostConfig::development()).with_validator(tags);
        let root = host.container(host.document().root()).unwrap();
        let ctx = host.root_host_context(root).unwrap();
        host.create_element_instance("html", &Props::new(), &ctx, FiberHandle(1));
        let table = crate::ancestor::AncestorInfo::for_root("table");
        host.validator.validate_text("x", &table);
        assert_eq!(*seen.borrow(), ["html"]);
        assert!(host.validator().advisories().is_empty());
    }

    #[test]
    fn event_handler_ignores_non_event_names() {
        let mut host = DomHost::default();
        let node = host.document_mut().create_element("div", host_tree::Namespace::Html);
        let props = Props::new()
            .with("click", HandlerId(1))
            .with("onClick", HandlerId(2));
        host.store_props(node, &props);
        assert_eq!(host.event_handler(node, "click"), None);
        assert_eq!(host.event_handler(node, "onClick"), Some(HandlerId(2)));
    }

    #[test]
    fn clock_is_monotonic() {
        let host = DomHost::default();
        let first = host.now();
        let second = host.now();
        assert!(second >= first);
        assert!(first >= 0.0);
    }

    #[test]
    fn primary_renderer_defaults_on() {
        assert!(DomHost::default().is_primary_renderer());
        let config = DomHostConfig {
            is_primary_renderer: false,
            ..DomHostConfig::default()
        };
        assert!(!DomHost::new(config).is_primary_renderer());
    }
}
