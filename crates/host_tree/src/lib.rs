//! # host_tree
//!
//! A small, mutable document tree with browser-style semantics:
//! - element nodes carry a tag, a [`Namespace`] and ordered attributes
//! - text and comment nodes carry a mutable string
//! - attaching an already-attached node moves it
//! - the document tracks the focused element and a text selection
//!
//! Nodes are never freed; a detached node keeps its key and can be attached
//! again. Keys are only meaningful within the document that issued them.

mod debug;
mod document;
mod selection;
mod types;

pub use debug::outline;
pub use document::{HostDocument, HostTreeError};
pub use selection::SelectionRange;
pub use types::{Namespace, NodeKey, NodeKind, NodeType};
