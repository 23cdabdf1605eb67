//! Marcar: stable hierarchical test-id attributes with zero production cost.
//!
//! Consumers declare a lazy tree of named locator handles; invoking a
//! handle yields a flat attribute map embedding its hierarchical path and
//! parameters, ready to merge into a rendered element. A hidden mark links
//! every produced value back to its node and parameters, and a one-shot
//! process-wide switch collapses the whole system to a single inert no-op
//! for production builds.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      MARCAR Architecture                         │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐     ┌────────────┐     ┌──────────────────┐     │
//! │   │ Locator    │     │ Attribute  │     │ Properties       │     │
//! │   │ tree       │────►│ builder    │────►│ (+ hidden mark)  │     │
//! │   │ (lazy)     │     │            │     │                  │     │
//! │   └─────┬──────┘     └────────────┘     └────────┬─────────┘     │
//! │         │   mode resolved live on every call     │               │
//! │   ┌─────▼──────────────────────────────┐  ┌──────▼─────────┐     │
//! │   │ Mode switch (one-shot, dev → prod) │  │ Mark registry  │     │
//! │   └────────────────────────────────────┘  └────────────────┘     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```
//! use marcar::{Locator, Parameters};
//!
//! let root = Locator::root("app");
//! let header = root.child("header");
//!
//! let properties = header.invoke_with(Parameters::new().with("kind", "sticky"))?;
//!
//! assert_eq!(properties.get("data-testid"), Some("app-header"));
//! assert_eq!(properties.get("data-test-kind"), Some("sticky"));
//! # Ok::<(), marcar::MarcarError>(())
//! ```
//!
//! In production, call [`set_global_production_mode`] once at startup (or
//! pin individual roots with
//! [`RootOptions::with_production_pin`]): every invocation then returns the
//! same shared empty attributes, every access path collapses to one inert
//! singleton, and no marks are ever created.

#![warn(missing_docs)]

mod attributes;
mod mark;
mod mode;
mod node;
mod options;
mod parameters;
mod properties;
mod result;

pub use attributes::{build_attributes, AttributeMap};
pub use mark::{
    create_locator_from_properties, get_locator_parameters, remove_mark_from_properties,
};
pub use mode::{global_mode_switch, set_global_production_mode, Mode, ModeSwitch};
pub use node::Locator;
pub use options::{
    RootOptions, DEFAULT_PARAMETER_ATTRIBUTE_PREFIX, DEFAULT_PATH_ATTRIBUTE,
    DEFAULT_PATH_SEPARATOR,
};
pub use parameters::{CustomValue, ParameterValue, Parameters};
pub use properties::Properties;
pub use result::{MarcarError, MarcarResult};
