//! Mutation executor: the commit-phase operations.
//!
//! Every container operation goes through [`DomHost::container_target`], so
//! anchor redirection is applied the same way for append, insert and remove.

use crate::container::Container;
use crate::error::HostError;
use crate::host::DomHost;
use crate::instance::{Child, ElementInstance, TextInstance};
use crate::property::should_auto_focus;
use crate::props::{Props, UpdatePayload};
use host_tree::NodeKey;

impl DomHost {
    /// Real parent for children of `container`: the anchor's parent for
    /// anchors, the container itself otherwise.
    fn container_target(&self, container: Container) -> Result<NodeKey, HostError> {
        match container {
            Container::Anchor(anchor) => self
                .document
                .parent(anchor)
                .ok_or(HostError::AnchorWithoutParent(anchor)),
            Container::Document(key) | Container::Fragment(key) | Container::Element(key) => {
                Ok(key)
            }
        }
    }

    pub fn append_child(
        &mut self,
        parent: ElementInstance,
        child: impl Into<Child>,
    ) -> Result<(), HostError> {
        let child = child.into().key();
        log::trace!(target: "dom_host.mutation", "append {child} to {}", parent.0);
        self.document.append_child(parent.0, child)?;
        Ok(())
    }

    /// Appends to a container; for an anchor, inserts right before the anchor.
    pub fn append_child_to_container(
        &mut self,
        container: Container,
        child: impl Into<Child>,
    ) -> Result<(), HostError> {
        let child = child.into().key();
        let target = self.container_target(container)?;
        log::trace!(target: "dom_host.mutation", "append {child} to container {container:?}");
        match container {
            Container::Anchor(anchor) => self.document.insert_before(target, child, anchor)?,
            _ => self.document.append_child(target, child)?,
        }
        Ok(())
    }

    pub fn insert_before(
        &mut self,
        parent: ElementInstance,
        child: impl Into<Child>,
        before: impl Into<Child>,
    ) -> Result<(), HostError> {
        let child = child.into().key();
        let before = before.into().key();
        log::trace!(
            target: "dom_host.mutation",
            "insert {child} before {before} in {}",
            parent.0
        );
        self.document.insert_before(parent.0, child, before)?;
        Ok(())
    }

    /// Inserts before `before` in the container's real parent.
    ///
    /// For anchors, `before` is used as given; it is expected to already sit
    /// in the anchor's parent, so no position relative to the anchor is derived.
    pub fn insert_in_container_before(
        &mut self,
        container: Container,
        child: impl Into<Child>,
        before: impl Into<Child>,
    ) -> Result<(), HostError> {
        let child = child.into().key();
        let before = before.into().key();
        let target = self.container_target(container)?;
        log::trace!(
            target: "dom_host.mutation",
            "insert {child} before {before} in container {container:?}"
        );
        self.document.insert_before(target, child, before)?;
        Ok(())
    }

    /// Detaches `child` and forgets the handle and props records of its subtree.
    pub fn remove_child(
        &mut self,
        parent: ElementInstance,
        child: impl Into<Child>,
    ) -> Result<(), HostError> {
        let child = child.into().key();
        log::trace!(target: "dom_host.mutation", "remove {child} from {}", parent.0);
        self.document.remove_child(parent.0, child)?;
        self.forget_subtree(child);
        Ok(())
    }

    pub fn remove_child_from_container(
        &mut self,
        container: Container,
        child: impl Into<Child>,
    ) -> Result<(), HostError> {
        let child = child.into().key();
        let target = self.container_target(container)?;
        log::trace!(target: "dom_host.mutation", "remove {child} from container {container:?}");
        self.document.remove_child(target, child)?;
        self.forget_subtree(child);
        Ok(())
    }

    /// `old_text` is only used for diagnostics.
    pub fn commit_text_update(
        &mut self,
        instance: TextInstance,
        old_text: &str,
        new_text: &str,
    ) -> Result<(), HostError> {
        log::trace!(
            target: "dom_host.mutation",
            "text {}: {old_text:?} -> {new_text:?}",
            instance.0
        );
        self.document.set_text(instance.0, new_text)?;
        Ok(())
    }

    /// Clears all text content, ahead of switching to child instances.
    pub fn reset_text_content(&mut self, instance: ElementInstance) -> Result<(), HostError> {
        log::trace!(target: "dom_host.mutation", "reset text content of {}", instance.0);
        self.document.set_text_content(instance.0, "")?;
        Ok(())
    }

    /// Records `new_props` as the latest props, then applies `payload`.
    ///
    /// The props are stored even for an empty payload: event delivery reads
    /// handlers from them whether or not any attribute changed.
    pub fn commit_update(
        &mut self,
        instance: ElementInstance,
        payload: &UpdatePayload,
        tag: &str,
        old_props: &Props,
        new_props: &Props,
    ) -> Result<(), HostError> {
        self.store_props(instance.0, new_props);
        log::trace!(
            target: "dom_host.mutation",
            "update <{tag}> {} with {} change(s)",
            instance.0,
            payload.len()
        );
        self.properties.apply_diff(
            &mut self.document,
            instance.0,
            payload,
            tag,
            old_props,
            new_props,
        )?;
        Ok(())
    }

    /// Runs after the instance is attached. Focus is decided again from
    /// `new_props` rather than from what creation reported.
    pub fn commit_mount(&mut self, instance: ElementInstance, tag: &str, new_props: &Props) {
        if !should_auto_focus(tag, new_props) {
            return;
        }
        let focused = self.selection.focus(&mut self.document, instance.0);
        log::debug!(
            target: "dom_host.mutation",
            "auto-focus <{tag}> {}: {}",
            instance.0,
            if focused { "focused" } else { "not focusable" }
        );
    }
}
