//! Attribute map construction.
//!
//! The attribute map is the flat, ordered string mapping merged into a
//! rendered element's attributes: the path attribute always comes first,
//! followed by one entry per parameter in insertion order.

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use serde::Serialize;

use crate::parameters::Parameters;
use crate::result::MarcarResult;

/// Ordered attribute output of a locator invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeMap {
    entries: IndexMap<String, String>,
}

impl AttributeMap {
    /// Create an empty attribute map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, preserving insertion order
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Look up an attribute by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Number of attributes
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no attributes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over attributes in output order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// The single shared empty map returned by every production-resolved
    /// invocation.
    pub(crate) fn shared_empty() -> Arc<Self> {
        static EMPTY: OnceLock<Arc<AttributeMap>> = OnceLock::new();
        Arc::clone(EMPTY.get_or_init(|| Arc::new(Self::new())))
    }
}

/// Build the attribute map for one locator invocation.
///
/// `path` is the already-joined locator path; `parameters` contributes one
/// attribute per entry, named `parameter_prefix` + key. Output order is
/// deterministic: the path attribute first, then parameters in insertion
/// order. A parameter value that fails its own conversion hook aborts the
/// build and the failure is handed back to the caller.
pub fn build_attributes(
    path: &str,
    parameters: Option<&Parameters>,
    path_attribute: &str,
    parameter_prefix: &str,
) -> MarcarResult<AttributeMap> {
    let mut map = AttributeMap::new();
    map.insert(path_attribute, path);

    if let Some(parameters) = parameters {
        for (key, value) in parameters.iter() {
            map.insert(format!("{parameter_prefix}{key}"), value.render(key)?);
        }
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{CustomValue, ParameterValue};
    use crate::result::MarcarError;

    const PATH_ATTRIBUTE: &str = "data-testid";
    const PREFIX: &str = "data-test-";

    mod map_tests {
        use super::*;

        #[test]
        fn test_insert_and_get() {
            let mut map = AttributeMap::new();
            map.insert("data-testid", "root");
            assert_eq!(map.get("data-testid"), Some("root"));
            assert_eq!(map.len(), 1);
            assert!(!map.is_empty());
        }

        #[test]
        fn test_iteration_order_is_insertion_order() {
            let mut map = AttributeMap::new();
            map.insert("z", "1");
            map.insert("a", "2");
            let names: Vec<_> = map.iter().map(|(name, _)| name).collect();
            assert_eq!(names, ["z", "a"]);
        }

        #[test]
        fn test_shared_empty_is_a_singleton() {
            assert!(Arc::ptr_eq(
                &AttributeMap::shared_empty(),
                &AttributeMap::shared_empty()
            ));
        }

        #[test]
        fn test_serializes_as_a_plain_object() {
            let mut map = AttributeMap::new();
            map.insert("data-testid", "root");
            map.insert("data-test-qux", "quux");
            let json = serde_json::to_value(&map).unwrap();
            assert_eq!(
                json,
                serde_json::json!({"data-testid": "root", "data-test-qux": "quux"})
            );
        }
    }

    mod builder_tests {
        use super::*;

        #[test]
        fn test_path_attribute_comes_first() {
            let parameters = Parameters::new().with("qux", "quux");
            let map =
                build_attributes("root", Some(&parameters), PATH_ATTRIBUTE, PREFIX).unwrap();
            let names: Vec<_> = map.iter().map(|(name, _)| name).collect();
            assert_eq!(names, ["data-testid", "data-test-qux"]);
        }

        #[test]
        fn test_no_parameters_yields_only_the_path_attribute() {
            let map = build_attributes("root", None, PATH_ATTRIBUTE, PREFIX).unwrap();
            assert_eq!(map.len(), 1);
            assert_eq!(map.get("data-testid"), Some("root"));
        }

        #[test]
        fn test_parameters_keep_their_order() {
            let parameters = Parameters::new()
                .with("b", "2")
                .with("a", "1");
            let map =
                build_attributes("root", Some(&parameters), PATH_ATTRIBUTE, PREFIX).unwrap();
            let names: Vec<_> = map.iter().map(|(name, _)| name).collect();
            assert_eq!(names, ["data-testid", "data-test-b", "data-test-a"]);
        }

        #[test]
        fn test_value_stringification() {
            let parameters = Parameters::new()
                .with("null", ParameterValue::Null)
                .with("flag", false)
                .with("count", 42)
                .with("ratio", 0.5);
            let map =
                build_attributes("root", Some(&parameters), PATH_ATTRIBUTE, PREFIX).unwrap();
            assert_eq!(map.get("data-test-null"), Some("null"));
            assert_eq!(map.get("data-test-flag"), Some("false"));
            assert_eq!(map.get("data-test-count"), Some("42"));
            assert_eq!(map.get("data-test-ratio"), Some("0.5"));
        }

        #[test]
        fn test_custom_naming_options() {
            let parameters = Parameters::new().with("qux", "quux");
            let map = build_attributes("root", Some(&parameters), "data-qa", "data-qa-").unwrap();
            assert_eq!(map.get("data-qa"), Some("root"));
            assert_eq!(map.get("data-qa-qux"), Some("quux"));
        }

        #[test]
        fn test_conversion_failure_propagates() {
            #[derive(Debug)]
            struct Broken;

            impl CustomValue for Broken {
                fn attribute_string(&self) -> Result<String, String> {
                    Err("boom".to_owned())
                }
            }

            let parameters = Parameters::new()
                .with("fine", "ok")
                .with("bad", ParameterValue::Custom(Arc::new(Broken)));
            let error =
                build_attributes("root", Some(&parameters), PATH_ATTRIBUTE, PREFIX).unwrap_err();
            assert!(matches!(
                error,
                MarcarError::ValueConversion { ref key, .. } if key == "bad"
            ));
        }
    }
}
