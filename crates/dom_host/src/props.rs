//! Props as seen by the host layer, and the update payload derived from them.

use core_types::HandlerId;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Handler(HandlerId),
    /// Non-primitive children (elements, lists); only the reconciler looks inside.
    Nodes,
}

impl PropValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            PropValue::Null => false,
            PropValue::Bool(value) => *value,
            PropValue::Number(value) => *value != 0.0 && !value.is_nan(),
            PropValue::Text(value) => !value.is_empty(),
            PropValue::Handler(_) | PropValue::Nodes => true,
        }
    }

    /// String form of a primitive (text or number) value.
    pub fn as_text(&self) -> Option<String> {
        match self {
            PropValue::Text(value) => Some(value.clone()),
            PropValue::Number(value) => Some(value.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<HandlerId> for PropValue {
    fn from(value: HandlerId) -> Self {
        PropValue::Handler(value)
    }
}

/// Ordered prop list of one element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    entries: Vec<(Arc<str>, PropValue)>,
}

impl Props {
    pub const CHILDREN: &'static str = "children";

    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Props::set`].
    pub fn with(mut self, key: &str, value: impl Into<PropValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<PropValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k.as_ref() == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((Arc::from(key), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, value)| value)
    }

    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(PropValue::is_truthy)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(key, value)| (key.as_ref(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The text of `children` when it is a single string or number.
    pub fn children_text(&self) -> Option<String> {
        self.get(Self::CHILDREN).and_then(PropValue::as_text)
    }
}

impl<'a, V: Into<PropValue>> FromIterator<(&'a str, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (&'a str, V)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (key, value) in iter {
            props.set(key, value);
        }
        props
    }
}

/// Changed props, in the order the diff produced them.
///
/// `PropValue::Null` marks a removed prop. The host never inspects the list
/// between computing and applying it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdatePayload {
    entries: Vec<(Arc<str>, PropValue)>,
}

impl UpdatePayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: PropValue) {
        self.entries.push((Arc::from(key), value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(key, value)| (key.as_ref(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
