//! Namespace resolution for elements and their children.
//!
//! Both functions are pure: the same `(parent, tag)` pair always resolves to
//! the same namespace, which keeps repeated descents through a foreign island
//! (`<svg>` inside HTML, `<foreignObject>` back out to HTML) reproducible.

use host_tree::Namespace;

/// Namespace a tag opens on its own, independent of its parent.
pub fn intrinsic_namespace(tag: &str) -> Namespace {
    match tag {
        "svg" => Namespace::Svg,
        "math" => Namespace::MathMl,
        _ => Namespace::Html,
    }
}

/// Namespace in effect for the *children* of a `tag` element whose parent
/// context is `parent`.
///
/// HTML parents defer to the tag's intrinsic namespace; foreign parents keep
/// their namespace for every tag except the `foreignObject` escape hatch.
pub fn child_namespace(parent: Namespace, tag: &str) -> Namespace {
    match parent {
        Namespace::Html => intrinsic_namespace(tag),
        Namespace::Svg if tag == "foreignObject" => Namespace::Html,
        foreign => foreign,
    }
}

/// Namespace the `tag` element itself is created in, given its parent's context.
///
/// Differs from [`child_namespace`] only for `foreignObject`, which is an SVG
/// element whose children are HTML.
pub fn element_namespace(parent: Namespace, tag: &str) -> Namespace {
    match parent {
        Namespace::Html => intrinsic_namespace(tag),
        foreign => foreign,
    }
}
