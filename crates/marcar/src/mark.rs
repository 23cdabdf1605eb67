//! Recovering and stripping the hidden mark.
//!
//! Any component that receives a [`Properties`] value can recover the
//! parameters it was invoked with, or strip the association entirely,
//! without re-deriving the path. All three operations
//! consult the process-wide mode switch live: once it reads production,
//! they become no-ops even for marks that physically still exist.

use std::sync::Arc;

use crate::mode::global_mode_switch;
use crate::node::Locator;
use crate::parameters::Parameters;
use crate::properties::Properties;

/// Recover the parameters a properties value was produced with.
///
/// Returns the very `Arc` that was passed to the invocation, so callers
/// holding the original can compare by identity. Unmarked input, marks
/// recorded without parameters, and every call under the production switch
/// all collapse to `None`; no-parameter outcomes cannot be told apart.
#[must_use]
pub fn get_locator_parameters(properties: &Properties) -> Option<Arc<Parameters>> {
    if global_mode_switch().is_production() {
        return None;
    }
    properties.mark().and_then(|mark| mark.parameters.clone())
}

/// Return `properties` without its mark.
///
/// A marked value comes back as a copy sharing the attribute storage, minus
/// the mark. Unmarked input and every call under the production switch come
/// back unchanged. Idempotent: stripping twice is the same as stripping
/// once.
#[must_use]
pub fn remove_mark_from_properties(properties: Properties) -> Properties {
    if global_mode_switch().is_production() {
        return properties;
    }
    if properties.mark().is_some() {
        properties.without_mark()
    } else {
        properties
    }
}

/// Re-derive the locator a properties value was produced by.
///
/// The recovered handle is identical (reference identity) to the node that
/// was invoked. Unmarked input yields the inert singleton, as does every
/// call under the production switch.
#[must_use]
pub fn create_locator_from_properties(properties: &Properties) -> Locator {
    if global_mode_switch().is_production() {
        return Locator::inert();
    }
    properties
        .mark()
        .map_or_else(Locator::inert, |mark| mark.node.clone())
}
