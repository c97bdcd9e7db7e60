//! Instance factory: host nodes for the abstract tree.

use crate::context::HostContext;
use crate::error::HostError;
use crate::host::DomHost;
use crate::namespace::element_namespace;
use crate::property::should_auto_focus;
use crate::props::{PropValue, Props, UpdatePayload};
use core_types::FiberHandle;
use host_tree::NodeKey;

/// Host element created by [`DomHost::create_element_instance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementInstance(pub(crate) NodeKey);

/// Host text node created by [`DomHost::create_text_instance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextInstance(pub(crate) NodeKey);

impl ElementInstance {
    pub fn key(self) -> NodeKey {
        self.0
    }
}

impl TextInstance {
    pub fn key(self) -> NodeKey {
        self.0
    }
}

/// Anything that can be attached below an element or container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Child {
    Element(ElementInstance),
    Text(TextInstance),
}

impl Child {
    pub fn key(self) -> NodeKey {
        match self {
            Child::Element(element) => element.0,
            Child::Text(text) => text.0,
        }
    }
}

impl From<ElementInstance> for Child {
    fn from(element: ElementInstance) -> Self {
        Child::Element(element)
    }
}

impl From<TextInstance> for Child {
    fn from(text: TextInstance) -> Self {
        Child::Text(text)
    }
}

/// Whether `tag` renders its children as plain text content rather than as
/// child instances.
pub fn should_set_text_content(tag: &str, props: &Props) -> bool {
    tag == "textarea" || props.children_text().is_some()
}

fn children_kind(props: &Props) -> Option<std::mem::Discriminant<PropValue>> {
    props.get(Props::CHILDREN).map(std::mem::discriminant)
}

/// Whether the subtree can be rendered at lower priority.
pub fn should_deprioritize_subtree(_tag: &str, props: &Props) -> bool {
    props.is_truthy("hidden")
}

impl DomHost {
    /// Creates a detached element for `tag` in the namespace implied by
    /// `context`, and records it against `handle`.
    pub fn create_element_instance(
        &mut self,
        tag: &str,
        props: &Props,
        context: &HostContext,
        handle: FiberHandle,
    ) -> ElementInstance {
        if let Some(ancestors) = context.ancestors() {
            self.validator.validate_tag(tag, ancestors);
            if let Some(text) = props.children_text() {
                self.validator.validate_text(&text, &ancestors.updated(tag));
            }
        }
        let namespace = element_namespace(context.namespace(), tag);
        let key = self.document.create_element(tag, namespace);
        self.precache(handle, key);
        self.store_props(key, props);
        log::trace!(
            target: "dom_host.mutation",
            "create <{tag}> {key} in {} for {handle:?}",
            namespace.uri()
        );
        ElementInstance(key)
    }

    pub fn create_text_instance(
        &mut self,
        text: &str,
        context: &HostContext,
        handle: FiberHandle,
    ) -> TextInstance {
        if let Some(ancestors) = context.ancestors() {
            self.validator.validate_text(text, ancestors);
        }
        let key = self.document.create_text(text);
        self.precache(handle, key);
        log::trace!(target: "dom_host.mutation", "create text {key} for {handle:?}");
        TextInstance(key)
    }

    /// Attaches a child while the new subtree is still detached.
    pub fn append_initial_child(
        &mut self,
        parent: ElementInstance,
        child: impl Into<Child>,
    ) -> Result<(), HostError> {
        self.document.append_child(parent.0, child.into().key())?;
        Ok(())
    }

    /// Applies the complete initial prop set. Returns `true` when the element
    /// wants focus once it is mounted (see [`DomHost::commit_mount`]).
    pub fn finalize_new_instance(
        &mut self,
        instance: ElementInstance,
        tag: &str,
        props: &Props,
    ) -> Result<bool, HostError> {
        self.properties
            .apply_initial(&mut self.document, instance.0, tag, props)?;
        Ok(should_auto_focus(tag, props))
    }

    /// Computes the payload [`DomHost::commit_update`] will later apply.
    pub fn prepare_update(
        &mut self,
        instance: ElementInstance,
        tag: &str,
        old_props: &Props,
        new_props: &Props,
        context: &HostContext,
    ) -> Option<UpdatePayload> {
        if let Some(ancestors) = context.ancestors()
            && let Some(text) = new_props.children_text()
            && children_kind(old_props) != children_kind(new_props)
        {
            self.validator.validate_text(&text, &ancestors.updated(tag));
        }
        self.properties
            .diff(&self.document, instance.0, tag, old_props, new_props)
    }

    /// The object handed to application code for an instance: the node itself.
    pub fn public_instance(&self, instance: ElementInstance) -> NodeKey {
        instance.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomHostConfig;
    use host_tree::Namespace;

    #[test]
    fn element_namespace_follows_context() {
        let mut host = DomHost::default();
        let html = HostContext::Production(Namespace::Html);
        let svg = host.create_element_instance("svg", &Props::new(), &html, FiberHandle(1));
        assert_eq!(host.document().namespace(svg.key()), Some(Namespace::Svg));

        let inside = html.child("svg");
        let fo = host.create_element_instance("foreignObject", &Props::new(), &inside, FiberHandle(2));
        assert_eq!(host.document().namespace(fo.key()), Some(Namespace::Svg));
    }

    #[test]
    fn creation_records_handle_and_props() {
        let mut host = DomHost::default();
        let ctx = HostContext::Production(Namespace::Html);
        let props = Props::new().with("id", "x");
        let el = host.create_element_instance("div", &props, &ctx, FiberHandle(9));
        assert_eq!(host.handle_for(el.key()), Some(FiberHandle(9)));
        assert_eq!(host.instance_for(FiberHandle(9)), Some(el.key()));
        assert_eq!(host.current_props(el.key()), Some(&props));
        assert_eq!(host.public_instance(el), el.key());
        // Props are applied by finalize, not by creation.
        assert!(!host.document().has_attribute(el.key(), "id"));
    }

    #[test]
    fn finalize_applies_props_and_reports_auto_focus() {
        let mut host = DomHost::default();
        let ctx = HostContext::Production(Namespace::Html);
        let props = Props::new().with("autoFocus", true).with("name", "q");
        let input = host.create_element_instance("input", &props, &ctx, FiberHandle(1));
        assert!(host.finalize_new_instance(input, "input", &props).unwrap());
        assert_eq!(host.document().attribute(input.key(), "name"), Some("q"));
        assert!(!host.document().has_attribute(input.key(), "autoFocus"));

        let div = host.create_element_instance("div", &props, &ctx, FiberHandle(2));
        assert!(!host.finalize_new_instance(div, "div", &props).unwrap());
    }

    #[test]
    fn validating_creation_reports_illegal_nesting() {
        let mut host = DomHost::new(DomHostConfig::development());
        let root = host.container(host.document().root()).unwrap();
        let ctx = host.root_host_context(root).unwrap();
        let html = host.create_element_instance("html", &Props::new(), &ctx, FiberHandle(1));
        assert!(host.validator().advisories().is_empty());

        let table_ctx = ctx.child("html").child("body").child("table");
        let props = Props::new().with("children", "oops");
        host.create_element_instance("tr", &props, &table_ctx, FiberHandle(2));
        host.create_text_instance(" ", &table_ctx, FiberHandle(3));

        let kinds: Vec<_> = host.validator().advisories().iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            [
                crate::AdvisoryKind::InvalidChild,
                crate::AdvisoryKind::Text,
                crate::AdvisoryKind::WhitespaceText,
            ]
        );
        // Advisories never block creation.
        assert!(host.document().contains_key(html.key()));
    }

    #[test]
    fn prepare_update_validates_new_text_children() {
        let mut host = DomHost::new(DomHostConfig::development());
        let ctx = HostContext::for_root(
            host.document(),
            crate::Container::Document(host.document().root()),
            true,
        )
        .unwrap()
        .child("html")
        .child("body");
        let old = Props::new().with("children", crate::PropValue::Nodes);
        let new = Props::new().with("children", "text");
        let table = host.create_element_instance("table", &old, &ctx, FiberHandle(1));
        let payload = host.prepare_update(table, "table", &old, &new, &ctx);
        assert!(payload.is_some());
        assert_eq!(host.validator().advisories().len(), 1);
        assert_eq!(host.validator().advisories()[0].ancestor, "table");
    }

    fn table_in_body(host: &mut DomHost, props: &Props) -> (ElementInstance, HostContext) {
        let ctx = HostContext::for_root(
            host.document(),
            crate::Container::Document(host.document().root()),
            true,
        )
        .unwrap()
        .child("html")
        .child("body");
        let table = host.create_element_instance("table", props, &ctx, FiberHandle(1));
        (table, ctx)
    }

    #[test]
    fn prepare_update_validates_when_children_switch_from_number_to_text() {
        let mut host = DomHost::new(DomHostConfig::development());
        let old = Props::new().with("children", 7.0);
        let new = Props::new().with("children", "seven");
        let (table, ctx) = table_in_body(&mut host, &Props::new());
        host.prepare_update(table, "table", &old, &new, &ctx);
        assert_eq!(host.validator().advisories().len(), 1);
        assert_eq!(host.validator().advisories()[0].ancestor, "table");
    }

    #[test]
    fn prepare_update_skips_validation_when_text_stays_text() {
        let mut host = DomHost::new(DomHostConfig::development());
        let old = Props::new().with("children", "one");
        let new = Props::new().with("children", "two");
        let (table, ctx) = table_in_body(&mut host, &Props::new());
        let payload = host.prepare_update(table, "table", &old, &new, &ctx);
        assert!(payload.is_some());
        assert!(host.validator().advisories().is_empty());
    }

    #[test]
    fn text_content_and_deprioritize_predicates() {
        assert!(should_set_text_content("textarea", &Props::new()));
        assert!(should_set_text_content("span", &Props::new().with("children", 3.0)));
        assert!(!should_set_text_content("span", &Props::new().with("children", crate::PropValue::Nodes)));
        assert!(should_deprioritize_subtree("div", &Props::new().with("hidden", true)));
        assert!(!should_deprioritize_subtree("div", &Props::new()));
    }
}
