//! HTML nesting rules.
//!
//! A compact rendition of the HTML parser's content-model restrictions: the
//! situations where the parser would silently restructure markup, so a tree
//! built directly through the DOM would not survive a serialize/parse trip.

use crate::ancestor::AncestorInfo;
use std::fmt;

/// What is being placed at a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NestingChild<'a> {
    Tag(&'a str),
    Text(&'a str),
}

impl NestingChild<'_> {
    fn tag(&self) -> &str {
        match self {
            NestingChild::Tag(tag) => tag,
            NestingChild::Text(_) => "#text",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdvisoryKind {
    /// The child is not allowed directly inside its parent.
    InvalidChild,
    /// The child is not allowed anywhere below an ancestor.
    InvalidDescendant,
    /// Non-whitespace text in a position that only admits elements.
    Text,
    /// Whitespace-only text in a position that only admits elements.
    WhitespaceText,
}

/// One illegal nesting, as reported to the application author.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NestingAdvisory {
    pub kind: AdvisoryKind,
    /// Offending tag, or `#text`.
    pub child: String,
    /// Parent (for child-level rules) or ancestor (for descendant rules).
    pub ancestor: String,
}

impl fmt::Display for NestingAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AdvisoryKind::InvalidChild => write!(
                f,
                "<{}> cannot appear as a child of <{}>",
                self.child, self.ancestor
            ),
            AdvisoryKind::InvalidDescendant => write!(
                f,
                "<{}> cannot appear as a descendant of <{}>",
                self.child, self.ancestor
            ),
            AdvisoryKind::Text => {
                write!(f, "text nodes cannot appear as a child of <{}>", self.ancestor)
            }
            AdvisoryKind::WhitespaceText => write!(
                f,
                "whitespace text nodes cannot appear as a child of <{}>; \
                 check for stray whitespace between tags",
                self.ancestor
            ),
        }
    }
}

/// Rule table consulted by the nesting validator.
pub trait NestingRules {
    /// Returns the advisory for placing `child` below `ancestors`, if any.
    fn check(&self, ancestors: &AncestorInfo, child: NestingChild<'_>) -> Option<NestingAdvisory>;

    fn is_legal_child(&self, ancestors: &AncestorInfo, child: NestingChild<'_>) -> bool {
        self.check(ancestors, child).is_none()
    }
}

/// The HTML content-model rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlNestingRules;

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];
const IMPLIED_END_TAGS: &[&str] = &["dd", "dt", "li", "option", "optgroup", "p", "rp", "rt"];
const ROOT_ONLY_TAGS: &[&str] = &[
    "body", "caption", "col", "colgroup", "frameset", "frame", "head", "html", "tbody", "td",
    "tfoot", "th", "thead", "tr",
];
/// Tags closed by an open `<p>` in button scope.
const P_CLOSERS: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "details", "dialog", "dir", "div",
    "dl", "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "main", "menu",
    "nav", "ol", "p", "section", "summary", "ul", "pre", "listing", "table", "hr", "xmp", "h1",
    "h2", "h3", "h4", "h5", "h6",
];

/// Children admitted by parents with a closed content model.
fn allowed_children(parent: &str) -> Option<&'static [&'static str]> {
    let allowed: &'static [&'static str] = match parent {
        "select" => &["option", "optgroup", "#text"],
        "optgroup" => &["option", "#text"],
        "option" => &["#text"],
        "tr" => &["th", "td", "style", "script", "template"],
        "tbody" | "thead" | "tfoot" => &["tr", "style", "script", "template"],
        "colgroup" => &["col", "template"],
        "table" => &[
            "caption", "colgroup", "tbody", "tfoot", "thead", "style", "script", "template",
        ],
        "head" => &[
            "base", "basefont", "bgsound", "link", "meta", "title", "noscript", "noframes",
            "style", "script", "template",
        ],
        "html" => &["head", "body", "frameset"],
        "frameset" => &["frame"],
        "#document" => &["html"],
        _ => return None,
    };
    Some(allowed)
}

fn is_tag_valid_with_parent(tag: &str, parent: Option<&str>) -> bool {
    if let Some(allowed) = parent.and_then(allowed_children) {
        return allowed.contains(&tag);
    }

    if HEADINGS.contains(&tag) {
        return !parent.is_some_and(|parent| HEADINGS.contains(&parent));
    }
    if matches!(tag, "rp" | "rt") {
        return !parent.is_some_and(|parent| IMPLIED_END_TAGS.contains(&parent));
    }
    if ROOT_ONLY_TAGS.contains(&tag) {
        return parent.is_none();
    }
    true
}

fn find_invalid_ancestor<'a>(tag: &str, ancestors: &'a AncestorInfo) -> Option<&'a str> {
    let found = if P_CLOSERS.contains(&tag) {
        ancestors.p_tag_in_button_scope.as_ref()
    } else {
        match tag {
            "form" => ancestors
                .form_tag
                .as_ref()
                .or(ancestors.p_tag_in_button_scope.as_ref()),
            "li" => ancestors.list_item_tag_autoclosing.as_ref(),
            "dd" | "dt" => ancestors.dl_item_tag_autoclosing.as_ref(),
            "button" => ancestors.button_tag_in_scope.as_ref(),
            "a" => ancestors.a_tag_in_scope.as_ref(),
            "nobr" => ancestors.nobr_tag_in_scope.as_ref(),
            _ => None,
        }
    };
    found.map(|tag| &**tag)
}

impl NestingRules for HtmlNestingRules {
    fn check(&self, ancestors: &AncestorInfo, child: NestingChild<'_>) -> Option<NestingAdvisory> {
        let tag = child.tag();
        let parent = ancestors.current();

        if !is_tag_valid_with_parent(tag, parent) {
            let parent = parent.unwrap_or("#root").to_string();
            let kind = match child {
                NestingChild::Tag(_) => AdvisoryKind::InvalidChild,
                NestingChild::Text(text) if text.trim().is_empty() => AdvisoryKind::WhitespaceText,
                NestingChild::Text(_) => AdvisoryKind::Text,
            };
            return Some(NestingAdvisory {
                kind,
                child: tag.to_string(),
                ancestor: parent,
            });
        }

        find_invalid_ancestor(tag, ancestors).map(|ancestor| NestingAdvisory {
            kind: AdvisoryKind::InvalidDescendant,
            child: tag.to_string(),
            ancestor: ancestor.to_string(),
        })
    }
}
