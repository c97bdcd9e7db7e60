//! Ancestor bookkeeping for nesting validation.
//!
//! [`AncestorInfo`] is a persistent value: [`AncestorInfo::updated`] returns a
//! new value that shares its tail with the receiver, so descending never
//! touches the parent's copy.

use std::sync::Arc;

/// Tags that end list-item and definition-item auto-closing scopes.
const SPECIAL_TAGS: &[&str] = &[
    "address", "applet", "area", "article", "aside", "base", "basefont", "bgsound",
    "blockquote", "body", "br", "button", "caption", "center", "col", "colgroup", "dd",
    "details", "dir", "div", "dl", "dt", "embed", "fieldset", "figcaption", "figure",
    "footer", "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head",
    "header", "hgroup", "hr", "html", "iframe", "img", "input", "isindex", "li", "link",
    "listing", "main", "marquee", "menu", "menuitem", "meta", "nav", "noembed", "noframes",
    "noscript", "object", "ol", "p", "param", "plaintext", "pre", "script", "section",
    "select", "source", "style", "summary", "table", "tbody", "td", "template", "textarea",
    "tfoot", "th", "thead", "title", "tr", "track", "ul", "wbr", "xmp",
];

/// Tags that open a new "in scope" boundary.
const IN_SCOPE_TAGS: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template",
    "foreignObject", "desc", "title",
];

fn is_in_scope_tag(tag: &str) -> bool {
    IN_SCOPE_TAGS.contains(&tag)
}

fn is_button_scope_tag(tag: &str) -> bool {
    tag == "button" || is_in_scope_tag(tag)
}

#[derive(Debug, PartialEq, Eq)]
struct Frame {
    tag: Arc<str>,
    parent: Option<Arc<Frame>>,
}

/// Scope facts about the open elements above a position in the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AncestorInfo {
    path: Option<Arc<Frame>>,
    pub(crate) form_tag: Option<Arc<str>>,
    pub(crate) a_tag_in_scope: Option<Arc<str>>,
    pub(crate) button_tag_in_scope: Option<Arc<str>>,
    pub(crate) nobr_tag_in_scope: Option<Arc<str>>,
    pub(crate) p_tag_in_button_scope: Option<Arc<str>>,
    pub(crate) list_item_tag_autoclosing: Option<Arc<str>>,
    pub(crate) dl_item_tag_autoclosing: Option<Arc<str>>,
}

impl AncestorInfo {
    /// Info for the children of a root container whose own tag is `tag`
    /// (`#document`, `#fragment`, or the element's tag).
    pub fn for_root(tag: &str) -> Self {
        Self::default().updated(tag)
    }

    /// Info for the children of a `tag` element placed at this position.
    pub fn updated(&self, tag: &str) -> Self {
        let mut next = self.clone();
        let tag: Arc<str> = Arc::from(tag);

        if is_in_scope_tag(&tag) {
            next.a_tag_in_scope = None;
            next.button_tag_in_scope = None;
            next.nobr_tag_in_scope = None;
        }
        if is_button_scope_tag(&tag) {
            next.p_tag_in_button_scope = None;
        }
        if SPECIAL_TAGS.contains(&&*tag) && !matches!(&*tag, "address" | "div" | "p") {
            next.list_item_tag_autoclosing = None;
            next.dl_item_tag_autoclosing = None;
        }

        match &*tag {
            "form" => next.form_tag = Some(Arc::clone(&tag)),
            "a" => next.a_tag_in_scope = Some(Arc::clone(&tag)),
            "button" => next.button_tag_in_scope = Some(Arc::clone(&tag)),
            "nobr" => next.nobr_tag_in_scope = Some(Arc::clone(&tag)),
            "p" => next.p_tag_in_button_scope = Some(Arc::clone(&tag)),
            "li" => next.list_item_tag_autoclosing = Some(Arc::clone(&tag)),
            "dd" | "dt" => next.dl_item_tag_autoclosing = Some(Arc::clone(&tag)),
            _ => {}
        }

        next.path = Some(Arc::new(Frame {
            tag,
            parent: self.path.clone(),
        }));
        next
    }

    /// Innermost open tag.
    pub fn current(&self) -> Option<&str> {
        self.path.as_deref().map(|frame| &*frame.tag)
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut frame = self.path.as_deref();
        while let Some(current) = frame {
            depth += 1;
            frame = current.parent.as_deref();
        }
        depth
    }

    /// Open tags from the outermost to the innermost.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags = Vec::with_capacity(self.depth());
        let mut frame = self.path.as_deref();
        while let Some(current) = frame {
            tags.push(&*current.tag);
            frame = current.parent.as_deref();
        }
        tags.reverse();
        tags
    }
}
