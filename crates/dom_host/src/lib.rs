//! # dom_host
//!
//! Host adapter between a renderer-agnostic reconciler and a mutable
//! document tree ([`host_tree::HostDocument`]).
//!
//! The reconciler drives a [`DomHost`] through three groups of operations:
//! - render phase: host contexts ([`DomHost::root_host_context`],
//!   [`DomHost::child_host_context`]) and the instance factory
//!   ([`DomHost::create_element_instance`], [`DomHost::prepare_update`], ...)
//! - commit bracket: [`DomHost::prepare_for_commit`] returns a
//!   [`CommitSession`] that restores focus, selection and event delivery
//!   when it ends, however it ends
//! - mutations, issued through the session (append, insert, remove, text
//!   and prop updates), with anchor containers redirected to their parent
//!
//! With [`DomHostConfig::validate_nesting`] set, contexts carry ancestor
//! information and illegal HTML nesting is reported through `log`.

mod ancestor;
mod commit;
mod config;
mod container;
mod context;
mod error;
mod events;
mod host;
mod instance;
mod mutation;
mod namespace;
mod nesting;
mod property;
mod props;
mod selection;
mod validate;

pub use ancestor::AncestorInfo;
pub use commit::CommitSession;
pub use config::DomHostConfig;
pub use container::Container;
pub use context::HostContext;
pub use error::HostError;
pub use events::{EventDelivery, EventSwitch};
pub use host::{CommitPhase, DomHost};
pub use instance::{
    Child, ElementInstance, TextInstance, should_deprioritize_subtree, should_set_text_content,
};
pub use namespace::{child_namespace, element_namespace, intrinsic_namespace};
pub use nesting::{AdvisoryKind, HtmlNestingRules, NestingAdvisory, NestingChild, NestingRules};
pub use property::{AttributeEngine, PropertyEngine, should_auto_focus};
pub use props::{PropValue, Props, UpdatePayload};
pub use selection::{DocumentSelection, FocusSelection, SelectionSnapshot};
pub use validate::{AdvisoryValidator, NestingValidator, NoopValidator};
