use crate::selection::SelectionRange;
use crate::types::{Namespace, NodeKey, NodeKind, NodeType};
use std::fmt;
use std::sync::Arc;

/// Contract breach reported by a tree operation.
///
/// None of these are expected from a correct caller; they exist so that the
/// breach surfaces at the call that caused it instead of corrupting the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostTreeError {
    MissingKey(NodeKey),
    WrongNodeKind(NodeKey),
    InvalidParent(NodeKey),
    NotAChild { parent: NodeKey, child: NodeKey },
    CycleDetected { parent: NodeKey, child: NodeKey },
}

impl fmt::Display for HostTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostTreeError::MissingKey(key) => write!(f, "no node with key {key}"),
            HostTreeError::WrongNodeKind(key) => {
                write!(f, "node {key} has the wrong kind for this operation")
            }
            HostTreeError::InvalidParent(key) => write!(f, "node {key} cannot have children"),
            HostTreeError::NotAChild { parent, child } => {
                write!(f, "node {child} is not a child of {parent}")
            }
            HostTreeError::CycleDetected { parent, child } => {
                write!(f, "attaching {child} under {parent} would create a cycle")
            }
        }
    }
}

impl std::error::Error for HostTreeError {}

struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

/// Mutable host document.
///
/// The document node itself is created by [`HostDocument::new`] and is
/// returned by [`HostDocument::root`].
pub struct HostDocument {
    nodes: Vec<NodeRecord>,
    root: NodeKey,
    active: Option<NodeKey>,
    selection: Option<SelectionRange>,
}

impl HostDocument {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeKey::INVALID,
            active: None,
            selection: None,
        };
        doc.root = doc.insert(NodeKind::Document);
        doc
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ---------------------------------------------------------------------
    // Creation
    // ---------------------------------------------------------------------

    pub fn create_element(&mut self, tag: &str, namespace: Namespace) -> NodeKey {
        self.insert(NodeKind::Element {
            tag: Arc::from(tag),
            namespace,
            attributes: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeKey {
        self.insert(NodeKind::Text {
            text: text.to_string(),
        })
    }

    pub fn create_comment(&mut self, text: &str) -> NodeKey {
        self.insert(NodeKind::Comment {
            text: text.to_string(),
        })
    }

    pub fn create_fragment(&mut self) -> NodeKey {
        self.insert(NodeKind::Fragment)
    }

    fn insert(&mut self, kind: NodeKind) -> NodeKey {
        let key = NodeKey::from_index(self.nodes.len());
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        });
        key
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    fn record(&self, key: NodeKey) -> Result<&NodeRecord, HostTreeError> {
        key.index()
            .and_then(|index| self.nodes.get(index))
            .ok_or(HostTreeError::MissingKey(key))
    }

    fn record_mut(&mut self, key: NodeKey) -> Result<&mut NodeRecord, HostTreeError> {
        key.index()
            .and_then(|index| self.nodes.get_mut(index))
            .ok_or(HostTreeError::MissingKey(key))
    }

    pub fn contains_key(&self, key: NodeKey) -> bool {
        self.record(key).is_ok()
    }

    pub fn kind(&self, key: NodeKey) -> Option<&NodeKind> {
        self.record(key).ok().map(|record| &record.kind)
    }

    pub fn node_type(&self, key: NodeKey) -> Option<NodeType> {
        self.kind(key).map(NodeKind::node_type)
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.record(key).ok().and_then(|record| record.parent)
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        match self.record(key) {
            Ok(record) => &record.children,
            Err(_) => &[],
        }
    }

    pub fn tag(&self, key: NodeKey) -> Option<&str> {
        match self.kind(key)? {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn namespace(&self, key: NodeKey) -> Option<Namespace> {
        match self.kind(key)? {
            NodeKind::Element { namespace, .. } => Some(*namespace),
            _ => None,
        }
    }

    /// Value of a text or comment node.
    pub fn text(&self, key: NodeKey) -> Option<&str> {
        match self.kind(key)? {
            NodeKind::Text { text } | NodeKind::Comment { text } => Some(text),
            _ => None,
        }
    }

    /// Concatenated text of all descendant text nodes, in tree order.
    pub fn text_content(&self, key: NodeKey) -> String {
        fn walk(doc: &HostDocument, key: NodeKey, out: &mut String) {
            match doc.kind(key) {
                Some(NodeKind::Text { text }) => out.push_str(text),
                Some(NodeKind::Comment { .. }) | None => {}
                Some(_) => {
                    for child in doc.children(key) {
                        walk(doc, *child, out);
                    }
                }
            }
        }
        let mut out = String::new();
        walk(self, key, &mut out);
        out
    }

    pub fn attributes(&self, key: NodeKey) -> &[(Arc<str>, Option<String>)] {
        match self.kind(key) {
            Some(NodeKind::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    /// Attribute value; valueless attributes read as `""`.
    pub fn attribute(&self, key: NodeKey, name: &str) -> Option<&str> {
        self.attributes(key)
            .iter()
            .find(|(attr, _)| attr.as_ref() == name)
            .map(|(_, value)| value.as_deref().unwrap_or(""))
    }

    pub fn has_attribute(&self, key: NodeKey, name: &str) -> bool {
        self.attribute(key, name).is_some()
    }

    /// First element child of the document node.
    pub fn document_element(&self) -> Option<NodeKey> {
        self.children(self.root)
            .iter()
            .copied()
            .find(|child| self.node_type(*child) == Some(NodeType::Element))
    }

    /// Whether `node` is `ancestor` or lies somewhere below it.
    pub fn contains(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = Some(node);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.parent(key);
        }
        false
    }

    pub fn is_connected(&self, key: NodeKey) -> bool {
        self.contains(self.root, key)
    }

    // ---------------------------------------------------------------------
    // Tree mutation
    // ---------------------------------------------------------------------

    pub fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), HostTreeError> {
        self.check_attach(parent, child)?;
        self.detach(child)?;
        self.record_mut(parent)?.children.push(child);
        self.record_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Inserts `child` immediately before `before`, which must be a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeKey,
        child: NodeKey,
        before: NodeKey,
    ) -> Result<(), HostTreeError> {
        self.check_attach(parent, child)?;
        if self.parent(before) != Some(parent) {
            return Err(HostTreeError::NotAChild {
                parent,
                child: before,
            });
        }
        if child == before {
            return Ok(());
        }
        self.detach(child)?;
        let siblings = &mut self.record_mut(parent)?.children;
        let pos = siblings
            .iter()
            .position(|k| *k == before)
            .ok_or(HostTreeError::NotAChild {
                parent,
                child: before,
            })?;
        siblings.insert(pos, child);
        self.record_mut(child)?.parent = Some(parent);
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), HostTreeError> {
        self.record(parent)?;
        if self.parent(child) != Some(parent) {
            return Err(HostTreeError::NotAChild { parent, child });
        }
        self.detach(child)
    }

    fn check_attach(&self, parent: NodeKey, child: NodeKey) -> Result<(), HostTreeError> {
        if !self.record(parent)?.kind.allows_children() {
            return Err(HostTreeError::InvalidParent(parent));
        }
        match self.record(child)?.kind {
            NodeKind::Document | NodeKind::Fragment => {
                return Err(HostTreeError::WrongNodeKind(child));
            }
            _ => {}
        }
        if self.contains(child, parent) {
            return Err(HostTreeError::CycleDetected { parent, child });
        }
        Ok(())
    }

    /// Unlinks `key` from its parent, if any. Focus inside the detached
    /// subtree is dropped.
    fn detach(&mut self, key: NodeKey) -> Result<(), HostTreeError> {
        let Some(parent) = self.record_mut(key)?.parent.take() else {
            return Ok(());
        };
        self.record_mut(parent)?.children.retain(|k| *k != key);
        if let Some(active) = self.active
            && self.contains(key, active)
        {
            log::trace!(target: "host_tree", "focused node {active} left the tree");
            self.active = None;
            self.selection = None;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Content mutation
    // ---------------------------------------------------------------------

    /// Sets the value of a text or comment node.
    pub fn set_text(&mut self, key: NodeKey, value: &str) -> Result<(), HostTreeError> {
        match &mut self.record_mut(key)?.kind {
            NodeKind::Text { text } | NodeKind::Comment { text } => {
                text.clear();
                text.push_str(value);
                Ok(())
            }
            _ => Err(HostTreeError::WrongNodeKind(key)),
        }
    }

    /// Replaces all children of `key` with a single text node holding `value`,
    /// or with nothing when `value` is empty. On text and comment nodes this
    /// behaves like [`HostDocument::set_text`].
    ///
    /// When the only child already is a text node, it is rewritten in place.
    pub fn set_text_content(&mut self, key: NodeKey, value: &str) -> Result<(), HostTreeError> {
        let record = self.record(key)?;
        if !record.kind.allows_children() {
            return self.set_text(key, value);
        }
        if let [only] = record.children[..]
            && !value.is_empty()
            && self.node_type(only) == Some(NodeType::Text)
        {
            return self.set_text(only, value);
        }
        let children = record.children.clone();
        for child in children {
            self.detach(child)?;
        }
        if !value.is_empty() {
            let text = self.create_text(value);
            self.append_child(key, text)?;
        }
        Ok(())
    }

    pub fn set_attribute(
        &mut self,
        key: NodeKey,
        name: &str,
        value: Option<String>,
    ) -> Result<(), HostTreeError> {
        match &mut self.record_mut(key)?.kind {
            NodeKind::Element { attributes, .. } => {
                match attributes.iter_mut().find(|(attr, _)| attr.as_ref() == name) {
                    Some((_, existing)) => *existing = value,
                    None => attributes.push((Arc::from(name), value)),
                }
                Ok(())
            }
            _ => Err(HostTreeError::WrongNodeKind(key)),
        }
    }

    pub fn remove_attribute(&mut self, key: NodeKey, name: &str) -> Result<(), HostTreeError> {
        match &mut self.record_mut(key)?.kind {
            NodeKind::Element { attributes, .. } => {
                attributes.retain(|(attr, _)| attr.as_ref() != name);
                Ok(())
            }
            _ => Err(HostTreeError::WrongNodeKind(key)),
        }
    }

    // ---------------------------------------------------------------------
    // Focus and selection
    // ---------------------------------------------------------------------

    pub fn active_element(&self) -> Option<NodeKey> {
        self.active
    }

    /// Focuses a connected element. Returns `false` (and changes nothing)
    /// for detached nodes and non-elements.
    pub fn focus(&mut self, key: NodeKey) -> bool {
        if self.node_type(key) != Some(NodeType::Element) || !self.is_connected(key) {
            return false;
        }
        if self.active != Some(key) {
            self.active = Some(key);
            self.selection = None;
        }
        true
    }

    pub fn selection(&self) -> Option<SelectionRange> {
        self.selection
    }

    /// Sets the selection inside the focused element, clamped to its text.
    /// Returns `false` when nothing is focused.
    pub fn set_selection(&mut self, range: SelectionRange) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let text = self.text_content(active);
        self.selection = Some(range.clamp_to(&text));
        true
    }
}

impl Default for HostDocument {
    fn default() -> Self {
        Self::new()
    }
}
