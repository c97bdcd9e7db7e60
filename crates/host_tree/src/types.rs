use std::fmt;
use std::sync::Arc;

/// Arena key of a host node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub u32);

impl NodeKey {
    /// Reserved sentinel; never issued by a [`HostDocument`](crate::HostDocument).
    pub const INVALID: NodeKey = NodeKey(0);

    pub(crate) fn from_index(index: usize) -> Self {
        NodeKey(index as u32 + 1)
    }

    pub(crate) fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Markup namespace of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

impl Namespace {
    pub const HTML_URI: &'static str = "http://www.w3.org/1999/xhtml";
    pub const SVG_URI: &'static str = "http://www.w3.org/2000/svg";
    pub const MATHML_URI: &'static str = "http://www.w3.org/1998/Math/MathML";

    pub fn uri(self) -> &'static str {
        match self {
            Namespace::Html => Self::HTML_URI,
            Namespace::Svg => Self::SVG_URI,
            Namespace::MathMl => Self::MATHML_URI,
        }
    }

    /// Short prefix used in outlines; empty for HTML.
    pub(crate) fn prefix(self) -> &'static str {
        match self {
            Namespace::Html => "",
            Namespace::Svg => "svg ",
            Namespace::MathMl => "math ",
        }
    }
}

/// Node-kind discriminant, mirroring the DOM `nodeType` values that matter here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Element,
    Text,
    Comment,
    Document,
    Fragment,
}

/// Payload of a host node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Fragment,
    Element {
        tag: Arc<str>,
        namespace: Namespace,
        /// Ordered; `None` marks a valueless attribute such as `disabled`.
        attributes: Vec<(Arc<str>, Option<String>)>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Document => NodeType::Document,
            NodeKind::Fragment => NodeType::Fragment,
            NodeKind::Element { .. } => NodeType::Element,
            NodeKind::Text { .. } => NodeType::Text,
            NodeKind::Comment { .. } => NodeType::Comment,
        }
    }

    pub(crate) fn allows_children(&self) -> bool {
        matches!(
            self,
            NodeKind::Document | NodeKind::Fragment | NodeKind::Element { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_start_at_one() {
        assert_eq!(NodeKey::from_index(0), NodeKey(1));
        assert_eq!(NodeKey(1).index(), Some(0));
        assert_eq!(NodeKey::INVALID.index(), None);
        assert_eq!(NodeKey(7).to_string(), "#7");
    }

    #[test]
    fn namespace_uris() {
        assert_eq!(Namespace::default(), Namespace::Html);
        assert_eq!(Namespace::Svg.uri(), "http://www.w3.org/2000/svg");
        assert_eq!(Namespace::MathMl.uri(), Namespace::MATHML_URI);
    }
}
