//! Parameter values carried by locator invocations.
//!
//! Parameters are an insertion-ordered mapping from string keys to
//! primitive-ish values; each surviving entry becomes one attribute in the
//! invocation output, stringified. Absent values are omitted entirely.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};

use crate::result::{MarcarError, MarcarResult};

/// Conversion hook for parameter values that produce their own attribute
/// string.
///
/// This is the escape hatch for values that are not plain primitives: the
/// hook is called exactly once per invocation, and a conversion failure is
/// propagated untouched to whoever invoked the locator.
pub trait CustomValue: fmt::Debug + Send + Sync {
    /// Produce the string written into the attribute map, or a message
    /// describing why the value has no string form.
    fn attribute_string(&self) -> Result<String, String>;
}

/// A single parameter value
#[derive(Debug, Clone)]
pub enum ParameterValue {
    /// Plain string value
    Text(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value, rendered as `true`/`false`
    Bool(bool),
    /// Explicit null, rendered as `null`
    Null,
    /// Value with its own conversion hook
    Custom(Arc<dyn CustomValue>),
}

impl ParameterValue {
    /// Render the value into its attribute string.
    pub(crate) fn render(&self, key: &str) -> MarcarResult<String> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Integer(number) => Ok(number.to_string()),
            Self::Float(number) => Ok(number.to_string()),
            Self::Bool(flag) => Ok(flag.to_string()),
            Self::Null => Ok("null".to_owned()),
            Self::Custom(value) => {
                value
                    .attribute_string()
                    .map_err(|message| MarcarError::ValueConversion {
                        key: key.to_owned(),
                        message,
                    })
            }
        }
    }
}

impl PartialEq for ParameterValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Null, Self::Null) => true,
            // custom values compare by identity, never structurally
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Serialize for ParameterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Integer(number) => serializer.serialize_i64(*number),
            Self::Float(number) => serializer.serialize_f64(*number),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Null => serializer.serialize_unit(),
            Self::Custom(value) => match value.attribute_string() {
                Ok(text) => serializer.serialize_str(&text),
                Err(message) => Err(S::Error::custom(message)),
            },
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Arc<dyn CustomValue>> for ParameterValue {
    fn from(value: Arc<dyn CustomValue>) -> Self {
        Self::Custom(value)
    }
}

/// Ordered parameters attached to a locator invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Parameters {
    entries: IndexMap<String, ParameterValue>,
}

impl Parameters {
    /// Create an empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, preserving insertion order
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a parameter only if a value is present.
    ///
    /// An absent value leaves no trace: the key never reaches the attribute
    /// output and does not count toward [`len`](Self::len).
    #[must_use]
    pub fn with_optional<V: Into<ParameterValue>>(
        self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Insert a parameter in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParameterValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a parameter by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.entries.get(key)
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the parameter set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}
