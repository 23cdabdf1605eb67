//! Invocation output and the hidden mark.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::attributes::AttributeMap;
use crate::node::Locator;
use crate::parameters::Parameters;

/// Hidden association from a properties object back to the node and
/// parameters that produced it.
#[derive(Clone)]
pub(crate) struct Mark {
    pub(crate) node: Locator,
    pub(crate) parameters: Option<Arc<Parameters>>,
}

/// Flat output of a locator invocation.
///
/// Consumers merge the attributes into a rendered element and may forward
/// the whole value to nested components. The mark and the transform output
/// ride along invisibly: serialization and iteration expose the attribute
/// map alone.
#[derive(Clone)]
pub struct Properties {
    attributes: Arc<AttributeMap>,
    mapped: Option<Value>,
    mark: Option<Mark>,
    continuation: Locator,
}

impl Properties {
    /// Output of invoking the inert singleton.
    pub(crate) fn inert() -> Self {
        Self {
            attributes: AttributeMap::shared_empty(),
            mapped: None,
            mark: None,
            continuation: Locator::inert(),
        }
    }

    /// Output of a production-resolved invocation on a live node: the
    /// shared empty attributes plus any transform output over empty input.
    /// No mark.
    pub(crate) fn production(mapped: Option<Value>) -> Self {
        Self {
            attributes: AttributeMap::shared_empty(),
            mapped,
            mark: None,
            continuation: Locator::inert(),
        }
    }

    /// Output of a development invocation, mark stamped.
    pub(crate) fn marked(
        attributes: Arc<AttributeMap>,
        mapped: Option<Value>,
        mark: Mark,
        continuation: Locator,
    ) -> Self {
        Self {
            attributes,
            mapped,
            mark: Some(mark),
            continuation,
        }
    }

    /// Copy sharing the attribute storage, minus the mark.
    pub(crate) fn without_mark(&self) -> Self {
        Self {
            attributes: Arc::clone(&self.attributes),
            mapped: self.mapped.clone(),
            mark: None,
            continuation: self.continuation.clone(),
        }
    }

    pub(crate) fn mark(&self) -> Option<&Mark> {
        self.mark.as_ref()
    }

    /// Attributes produced at the invoked level
    #[must_use]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Output of the configured attributes transform, if any
    #[must_use]
    pub fn mapped(&self) -> Option<&Value> {
        self.mapped.as_ref()
    }

    /// Continue chained access below the invoked node.
    ///
    /// When the owning root maps attribute chains, the returned handle
    /// carries this invocation's attributes forward, so a later invocation
    /// further down reports them as part of its chain.
    #[must_use]
    pub fn child(&self, name: impl AsRef<str>) -> Locator {
        self.continuation.child(name)
    }

    /// Look up an attribute by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Number of attributes
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the invocation produced no attributes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate over attributes in output order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter()
    }

    /// Whether two properties values share the same attribute storage.
    ///
    /// Stripping the mark never copies the attributes, and unmarked input
    /// passes through untouched; this is the observable form of those
    /// contracts.
    #[must_use]
    pub fn same_attributes(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.attributes, &b.attributes)
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.attributes.serialize(serializer)
    }
}

impl fmt::Debug for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Properties")
            .field("attributes", &self.attributes)
            .field("marked", &self.mark.is_some())
            .finish_non_exhaustive()
    }
}
