//! The lazy, memoizing locator tree.
//!
//! A [`Locator`] is a cheap-to-clone handle over one position in the
//! identifier hierarchy. Child handles are created on first access and
//! cached for the node's lifetime, so repeated access to the same name
//! always yields the identical handle. Equality between handles is
//! reference identity, never structural.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::attributes::{build_attributes, AttributeMap};
use crate::mode::{global_mode_switch, ModeSwitch};
use crate::options::{AttributesTransform, RootOptions};
use crate::parameters::Parameters;
use crate::properties::{Mark, Properties};
use crate::result::{MarcarError, MarcarResult};

/// Per-root configuration shared by every node of a tree.
struct RootConfig {
    path_separator: String,
    parameter_attribute_prefix: String,
    path_attribute: String,
    transform: AttributesTransform,
    mode: ModeSwitch,
}

struct ActiveNode {
    path: String,
    config: Arc<RootConfig>,
    children: Mutex<HashMap<String, Locator>>,
    /// Attribute maps contributed by ancestor invocations along the access
    /// expression this handle was reached through. Empty unless the root
    /// maps attribute chains and an ancestor was invoked.
    chain: Vec<AttributeMap>,
}

enum Inner {
    /// A node of a development-capable tree
    Active(ActiveNode),
    /// The universal production singleton
    Inert,
}

/// One position in the identifier hierarchy.
///
/// Capable of producing child handles, attribute output, and string/number
/// coercions. Structurally frozen in both modes: the tree's shape derives
/// solely from access, never from edits.
#[derive(Clone)]
pub struct Locator {
    inner: Arc<Inner>,
}

impl Locator {
    /// Create a root locator with default options.
    #[must_use]
    pub fn root(id: impl Into<String>) -> Self {
        Self::root_with_options(id, RootOptions::default())
    }

    /// Create a root locator.
    ///
    /// If the root resolves to production at creation time -- because it is
    /// pinned or because its switch already reads production -- this
    /// returns the inert singleton directly, so every production root and
    /// all of its descendants are one and the same handle.
    #[must_use]
    pub fn root_with_options(id: impl Into<String>, options: RootOptions) -> Self {
        let mode = options
            .mode
            .unwrap_or_else(|| global_mode_switch().clone());
        if mode.resolve(options.production_pin).is_production() {
            return Self::inert();
        }

        let path = id.into();
        tracing::trace!(%path, "created root locator");
        Self::active(
            path,
            Arc::new(RootConfig {
                path_separator: options.path_separator,
                parameter_attribute_prefix: options.parameter_attribute_prefix,
                path_attribute: options.path_attribute,
                transform: options.transform,
                mode,
            }),
            Vec::new(),
        )
    }

    /// The universal production singleton.
    ///
    /// Property access on it returns itself, invocation returns the shared
    /// empty attributes, and every production-resolved access path compares
    /// equal to this exact handle.
    #[must_use]
    pub fn inert() -> Self {
        static INERT: OnceLock<Locator> = OnceLock::new();
        INERT
            .get_or_init(|| Self {
                inner: Arc::new(Inner::Inert),
            })
            .clone()
    }

    fn active(path: String, config: Arc<RootConfig>, chain: Vec<AttributeMap>) -> Self {
        Self {
            inner: Arc::new(Inner::Active(ActiveNode {
                path,
                config,
                children: Mutex::new(HashMap::new()),
                chain,
            })),
        }
    }

    /// Child handle under `name`, created on first access and cached.
    ///
    /// Any string is a valid child name. Repeated access to the same name
    /// on the same handle yields the identical child.
    #[must_use]
    pub fn child(&self, name: impl AsRef<str>) -> Self {
        match &*self.inner {
            Inner::Inert => self.clone(),
            Inner::Active(node) => {
                let name = name.as_ref();
                let mut children = node
                    .children
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                if let Some(existing) = children.get(name) {
                    return existing.clone();
                }
                let path = format!("{}{}{}", node.path, node.config.path_separator, name);
                tracing::trace!(%path, "created child locator");
                let child = Self::active(path, Arc::clone(&node.config), node.chain.clone());
                children.insert(name.to_owned(), child.clone());
                child
            }
        }
    }

    /// Invoke the locator without parameters.
    pub fn invoke(&self) -> MarcarResult<Properties> {
        self.invoke_inner(None)
    }

    /// Invoke the locator with parameters.
    ///
    /// Accepts `Parameters` by value or an `Arc<Parameters>`; the latter is
    /// returned with its identity intact by
    /// [`get_locator_parameters`](crate::get_locator_parameters).
    pub fn invoke_with(
        &self,
        parameters: impl Into<Arc<Parameters>>,
    ) -> MarcarResult<Properties> {
        self.invoke_inner(Some(parameters.into()))
    }

    fn invoke_inner(&self, parameters: Option<Arc<Parameters>>) -> MarcarResult<Properties> {
        let node = match &*self.inner {
            Inner::Inert => return Ok(Properties::inert()),
            Inner::Active(node) => node,
        };

        if node.config.mode.is_production() {
            // Live resolution: empty attributes, no mark. A configured
            // transform still runs, over empty input.
            let mapped = match &node.config.transform {
                AttributesTransform::None => None,
                AttributesTransform::Map(transform) => Some(transform(AttributeMap::new())),
                AttributesTransform::Chain(transform) => Some(transform(Vec::new())),
            };
            return Ok(Properties::production(mapped));
        }

        let map = build_attributes(
            &node.path,
            parameters.as_deref(),
            &node.config.path_attribute,
            &node.config.parameter_attribute_prefix,
        )?;

        let (mapped, chain) = match &node.config.transform {
            AttributesTransform::None => (None, None),
            AttributesTransform::Map(transform) => (Some(transform(map.clone())), None),
            AttributesTransform::Chain(transform) => {
                let mut full = node.chain.clone();
                full.push(map.clone());
                let value = transform(full.clone());
                (Some(value), Some(full))
            }
        };

        // Chained access below this invocation continues through a handle
        // that remembers the accumulated maps.
        let continuation = match chain {
            Some(full) => Self::active(node.path.clone(), Arc::clone(&node.config), full),
            None => self.clone(),
        };

        tracing::trace!(path = %node.path, "locator invoked");
        Ok(Properties::marked(
            Arc::new(map),
            mapped,
            Mark {
                node: self.clone(),
                parameters,
            },
            continuation,
        ))
    }

    /// String coercion: the joined path in development, empty in
    /// production. Resolved live on every call.
    #[must_use]
    pub fn as_string(&self) -> String {
        match &*self.inner {
            Inner::Inert => String::new(),
            Inner::Active(node) => {
                if node.config.mode.is_production() {
                    String::new()
                } else {
                    node.path.clone()
                }
            }
        }
    }

    /// Numeric coercion: `NaN` in development (a locator is not a number),
    /// `0` in production.
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match &*self.inner {
            Inner::Inert => 0.0,
            Inner::Active(node) => {
                if node.config.mode.is_production() {
                    0.0
                } else {
                    f64::NAN
                }
            }
        }
    }

    /// JSON coercion. Always agrees with [`as_string`](Self::as_string).
    #[must_use]
    pub fn to_json(&self) -> String {
        Value::String(self.as_string()).to_string()
    }

    /// Reject an attempt to splice a child into the tree.
    ///
    /// # Errors
    ///
    /// Always fails with [`MarcarError::MutationRejected`]: locator trees
    /// are frozen in both modes.
    pub fn insert_child(&self, name: &str) -> MarcarResult<()> {
        Err(self.mutation_rejected(format!("insert child `{name}`")))
    }

    /// Reject an attempt to remove a cached child.
    ///
    /// # Errors
    ///
    /// Always fails with [`MarcarError::MutationRejected`].
    pub fn remove_child(&self, name: &str) -> MarcarResult<()> {
        Err(self.mutation_rejected(format!("remove child `{name}`")))
    }

    /// Reject an attempt to lock the tree against further access.
    ///
    /// # Errors
    ///
    /// Always fails with [`MarcarError::MutationRejected`]: unbounded child
    /// access is part of the contract and cannot be revoked.
    pub fn seal(&self) -> MarcarResult<()> {
        Err(self.mutation_rejected("seal".to_owned()))
    }

    /// Locator handles never accept new entries through mutation.
    #[must_use]
    pub fn is_extensible(&self) -> bool {
        false
    }

    fn mutation_rejected(&self, operation: String) -> MarcarError {
        MarcarError::MutationRejected {
            operation,
            path: match &*self.inner {
                Inner::Inert => String::new(),
                Inner::Active(node) => node.path.clone(),
            },
        }
    }
}

/// Reference identity: two handles are equal iff they were reached via the
/// same access path from the same root. Never structural.
impl PartialEq for Locator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Locator {}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.inner {
            Inner::Inert => f
                .debug_struct("Locator")
                .field("inert", &true)
                .finish_non_exhaustive(),
            Inner::Active(node) => f
                .debug_struct("Locator")
                .field("path", &node.path)
                .finish_non_exhaustive(),
        }
    }
}

impl Serialize for Locator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}
