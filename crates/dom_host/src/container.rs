use crate::error::HostError;
use host_tree::{HostDocument, NodeKey, NodeType};

/// Root attachment point for a rendered subtree.
///
/// The variant is fixed when the container is classified, so mutations match
/// on it instead of re-inspecting the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    Document(NodeKey),
    Fragment(NodeKey),
    Element(NodeKey),
    /// A comment node marking a graft point (portals). Children are placed in
    /// the anchor's parent, immediately before the anchor.
    Anchor(NodeKey),
}

impl Container {
    /// Classifies `key` by its node type.
    pub fn from_node(doc: &HostDocument, key: NodeKey) -> Result<Self, HostError> {
        match doc.node_type(key) {
            Some(NodeType::Document) => Ok(Container::Document(key)),
            Some(NodeType::Fragment) => Ok(Container::Fragment(key)),
            Some(NodeType::Element) => Ok(Container::Element(key)),
            Some(NodeType::Comment) => Ok(Container::Anchor(key)),
            Some(NodeType::Text) | None => Err(HostError::NotAContainer(key)),
        }
    }

    pub fn key(self) -> NodeKey {
        match self {
            Container::Document(key)
            | Container::Fragment(key)
            | Container::Element(key)
            | Container::Anchor(key) => key,
        }
    }

    pub fn is_anchor(self) -> bool {
        matches!(self, Container::Anchor(_))
    }
}
