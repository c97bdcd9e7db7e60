//! Property engine: turning props into host attributes and text.

use crate::props::{PropValue, Props, UpdatePayload};
use host_tree::{HostDocument, HostTreeError, NodeKey};

/// Computes and applies prop changes for element instances.
///
/// The payload produced by [`PropertyEngine::diff`] is handed back verbatim
/// to [`PropertyEngine::apply_diff`]; the host layer never looks inside.
pub trait PropertyEngine {
    fn diff(
        &self,
        doc: &HostDocument,
        element: NodeKey,
        tag: &str,
        old_props: &Props,
        new_props: &Props,
    ) -> Option<UpdatePayload>;

    /// Materializes every declared prop on a freshly created element.
    fn apply_initial(
        &self,
        doc: &mut HostDocument,
        element: NodeKey,
        tag: &str,
        props: &Props,
    ) -> Result<(), HostTreeError>;

    fn apply_diff(
        &self,
        doc: &mut HostDocument,
        element: NodeKey,
        payload: &UpdatePayload,
        tag: &str,
        old_props: &Props,
        new_props: &Props,
    ) -> Result<(), HostTreeError>;
}

/// Props that steer the host but are never written as attributes.
const RESERVED_PROPS: &[&str] = &["children", "autoFocus", "key", "ref"];

/// Attribute name for a prop, or `None` when the prop is not an attribute.
fn attribute_name(prop: &str) -> Option<&str> {
    if RESERVED_PROPS.contains(&prop) || is_event_prop(prop) {
        return None;
    }
    Some(match prop {
        "className" => "class",
        "htmlFor" => "for",
        "tabIndex" => "tabindex",
        other => other,
    })
}

/// `onClick`, `onInput`, ... (an `on` prefix followed by an uppercase letter).
pub(crate) fn is_event_prop(prop: &str) -> bool {
    let bytes = prop.as_bytes();
    bytes.len() > 2 && bytes.starts_with(b"on") && bytes[2].is_ascii_uppercase()
}

/// Whether an element should take focus once it is attached.
pub fn should_auto_focus(tag: &str, props: &Props) -> bool {
    matches!(tag, "button" | "input" | "select" | "textarea") && props.is_truthy("autoFocus")
}

/// Default engine: plain attribute writes plus primitive text children.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttributeEngine;

impl AttributeEngine {
    fn apply_prop(
        &self,
        doc: &mut HostDocument,
        element: NodeKey,
        key: &str,
        value: &PropValue,
    ) -> Result<(), HostTreeError> {
        if key == Props::CHILDREN {
            if let Some(text) = value.as_text() {
                doc.set_text_content(element, &text)?;
            }
            return Ok(());
        }
        let Some(name) = attribute_name(key) else {
            return Ok(());
        };
        match value {
            PropValue::Null | PropValue::Bool(false) => doc.remove_attribute(element, name),
            PropValue::Bool(true) => doc.set_attribute(element, name, None),
            PropValue::Text(text) => doc.set_attribute(element, name, Some(text.clone())),
            PropValue::Number(number) => {
                doc.set_attribute(element, name, Some(number.to_string()))
            }
            PropValue::Handler(_) | PropValue::Nodes => Ok(()),
        }
    }
}

impl PropertyEngine for AttributeEngine {
    fn diff(
        &self,
        _doc: &HostDocument,
        _element: NodeKey,
        _tag: &str,
        old_props: &Props,
        new_props: &Props,
    ) -> Option<UpdatePayload> {
        let mut payload = UpdatePayload::new();
        for (key, old) in old_props.iter() {
            if new_props.get(key).is_none() && *old != PropValue::Null {
                payload.push(key, PropValue::Null);
            }
        }
        for (key, new) in new_props.iter() {
            if old_props.get(key) != Some(new) {
                payload.push(key, new.clone());
            }
        }
        (!payload.is_empty()).then_some(payload)
    }

    fn apply_initial(
        &self,
        doc: &mut HostDocument,
        element: NodeKey,
        _tag: &str,
        props: &Props,
    ) -> Result<(), HostTreeError> {
        for (key, value) in props.iter() {
            self.apply_prop(doc, element, key, value)?;
        }
        Ok(())
    }

    fn apply_diff(
        &self,
        doc: &mut HostDocument,
        element: NodeKey,
        payload: &UpdatePayload,
        _tag: &str,
        _old_props: &Props,
        _new_props: &Props,
    ) -> Result<(), HostTreeError> {
        for (key, value) in payload.iter() {
            self.apply_prop(doc, element, key, value)?;
        }
        Ok(())
    }
}
