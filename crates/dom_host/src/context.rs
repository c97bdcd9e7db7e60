//! Host contexts: the facts handed down the tree during the render walk.

use crate::ancestor::AncestorInfo;
use crate::container::Container;
use crate::error::HostError;
use crate::namespace::child_namespace;
use host_tree::{HostDocument, Namespace, NodeKey, NodeType};

/// Context for the children at one position in the tree.
///
/// Values are never edited; [`HostContext::child`] derives a new one. The
/// variant is picked once, at the root, from the host configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostContext {
    Production(Namespace),
    Validating {
        namespace: Namespace,
        ancestors: AncestorInfo,
    },
}

impl HostContext {
    /// Root context for rendering into `container`.
    pub fn for_root(
        doc: &HostDocument,
        container: Container,
        validating: bool,
    ) -> Result<Self, HostError> {
        let (tag, namespace) = match container {
            Container::Document(key) | Container::Fragment(key) | Container::Element(key) => {
                root_facts(doc, key)?
            }
            Container::Anchor(anchor) => {
                let parent = doc
                    .parent(anchor)
                    .ok_or(HostError::AnchorWithoutParent(anchor))?;
                root_facts(doc, parent)?
            }
        };
        log::trace!(
            target: "dom_host.context",
            "root context for {container:?}: {tag} in {namespace:?}"
        );
        if validating {
            Ok(HostContext::Validating {
                namespace,
                ancestors: AncestorInfo::for_root(&tag),
            })
        } else {
            Ok(HostContext::Production(namespace))
        }
    }

    /// Context for the children of a `tag` element created under `self`.
    pub fn child(&self, tag: &str) -> Self {
        match self {
            HostContext::Production(namespace) => {
                HostContext::Production(child_namespace(*namespace, tag))
            }
            HostContext::Validating {
                namespace,
                ancestors,
            } => HostContext::Validating {
                namespace: child_namespace(*namespace, tag),
                ancestors: ancestors.updated(tag),
            },
        }
    }

    pub fn namespace(&self) -> Namespace {
        match self {
            HostContext::Production(namespace) | HostContext::Validating { namespace, .. } => {
                *namespace
            }
        }
    }

    /// Ancestor info, present only in validating contexts.
    pub fn ancestors(&self) -> Option<&AncestorInfo> {
        match self {
            HostContext::Production(_) => None,
            HostContext::Validating { ancestors, .. } => Some(ancestors),
        }
    }
}

/// Validation tag and child namespace for a non-anchor root node.
fn root_facts(doc: &HostDocument, key: NodeKey) -> Result<(String, Namespace), HostError> {
    match doc.node_type(key) {
        Some(NodeType::Document) => {
            let namespace = doc
                .document_element()
                .and_then(|root| doc.namespace(root))
                .unwrap_or_else(|| child_namespace(Namespace::Html, ""));
            Ok(("#document".to_string(), namespace))
        }
        Some(NodeType::Fragment) => Ok((
            "#fragment".to_string(),
            child_namespace(Namespace::Html, ""),
        )),
        Some(NodeType::Element) => {
            let tag = doc.tag(key).unwrap_or_default();
            let own = doc.namespace(key).unwrap_or_default();
            Ok((tag.to_ascii_lowercase(), child_namespace(own, tag)))
        }
        Some(NodeType::Text | NodeType::Comment) | None => Err(HostError::NotAContainer(key)),
    }
}
