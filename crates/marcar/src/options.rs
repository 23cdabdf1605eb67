//! Root configuration options.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::attributes::AttributeMap;
use crate::mode::ModeSwitch;

/// Default separator between path segments
pub const DEFAULT_PATH_SEPARATOR: &str = "-";

/// Default prefix for parameter attribute names
pub const DEFAULT_PARAMETER_ATTRIBUTE_PREFIX: &str = "data-test-";

/// Default name of the path attribute
pub const DEFAULT_PATH_ATTRIBUTE: &str = "data-testid";

/// Transform applied to attribute output before it reaches the caller.
///
/// A single slot holds either the per-invocation transform or the chain
/// transform, making the two mutually exclusive by construction.
#[derive(Clone, Default)]
pub(crate) enum AttributesTransform {
    /// Attributes are returned as built
    #[default]
    None,
    /// Per-invocation transform over the raw map
    Map(Arc<dyn Fn(AttributeMap) -> Value + Send + Sync>),
    /// Transform over the accumulated root-to-leaf chain of maps
    Chain(Arc<dyn Fn(Vec<AttributeMap>) -> Value + Send + Sync>),
}

impl fmt::Debug for AttributesTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Map(_) => f.write_str("Map(..)"),
            Self::Chain(_) => f.write_str("Chain(..)"),
        }
    }
}

/// Options for creating a root locator
#[derive(Debug, Clone)]
pub struct RootOptions {
    pub(crate) path_separator: String,
    pub(crate) parameter_attribute_prefix: String,
    pub(crate) path_attribute: String,
    pub(crate) production_pin: bool,
    pub(crate) transform: AttributesTransform,
    pub(crate) mode: Option<ModeSwitch>,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            path_separator: DEFAULT_PATH_SEPARATOR.to_owned(),
            parameter_attribute_prefix: DEFAULT_PARAMETER_ATTRIBUTE_PREFIX.to_owned(),
            path_attribute: DEFAULT_PATH_ATTRIBUTE.to_owned(),
            production_pin: false,
            transform: AttributesTransform::None,
            mode: None,
        }
    }
}

impl RootOptions {
    /// Create options with the default formatting and no pin
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the separator joining path segments
    #[must_use]
    pub fn with_path_separator(mut self, separator: impl Into<String>) -> Self {
        self.path_separator = separator.into();
        self
    }

    /// Set the prefix for parameter attribute names
    #[must_use]
    pub fn with_parameter_attribute_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.parameter_attribute_prefix = prefix.into();
        self
    }

    /// Set the name of the path attribute
    #[must_use]
    pub fn with_path_attribute(mut self, name: impl Into<String>) -> Self {
        self.path_attribute = name.into();
        self
    }

    /// Pin the root to production regardless of the mode switch.
    ///
    /// Pinning is one-directional: a pinned root never becomes
    /// development-like, even while the switch still reads development.
    #[must_use]
    pub fn with_production_pin(mut self, pinned: bool) -> Self {
        self.production_pin = pinned;
        self
    }

    /// Transform each invocation's attribute map before returning it.
    ///
    /// Replaces any previously configured chain transform; the two are
    /// mutually exclusive.
    #[must_use]
    pub fn with_map_attributes(
        mut self,
        transform: impl Fn(AttributeMap) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.transform = AttributesTransform::Map(Arc::new(transform));
        self
    }

    /// Transform the accumulated root-to-leaf chain of attribute maps.
    ///
    /// The chain holds one map per level that was actually invoked along
    /// the access expression, root first. Replaces any previously
    /// configured per-invocation transform.
    #[must_use]
    pub fn with_map_attributes_chain(
        mut self,
        transform: impl Fn(Vec<AttributeMap>) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.transform = AttributesTransform::Chain(Arc::new(transform));
        self
    }

    /// Bind the root to a private mode switch instead of the process-wide
    /// one.
    #[must_use]
    pub fn with_mode_switch(mut self, switch: ModeSwitch) -> Self {
        self.mode = Some(switch);
        self
    }
}
