//! Development/production mode resolution.
//!
//! A locator tree behaves as either development (real attribute output,
//! mark stamping) or production (universal no-op). The effective mode is
//! resolved live on every invocation, coercion, and mark extraction; it is
//! never cached on a node, so flipping the switch is observed by handles
//! created before the flip.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Behavioral mode of a locator tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Real path/attribute computation and mark stamping
    Development,
    /// Universal no-op: empty attributes, no marks
    Production,
}

impl Mode {
    /// Whether this mode is production
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// One-shot development-to-production switch.
///
/// Starts in development and can be flipped to production exactly once;
/// there is no way back for the lifetime of the switch. Clones share the
/// underlying flag, so a switch handed to a root via
/// [`RootOptions::with_mode_switch`](crate::RootOptions::with_mode_switch)
/// keeps controlling that root after the original handle is dropped.
#[derive(Debug, Clone, Default)]
pub struct ModeSwitch {
    production: Arc<AtomicBool>,
}

impl ModeSwitch {
    /// Create a switch in development mode
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the switch to production. Irreversible.
    pub fn set_production(&self) {
        let was_production = self.production.swap(true, Ordering::SeqCst);
        if !was_production {
            tracing::debug!("mode switch flipped to production");
        }
    }

    /// Current state of the switch
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.production.load(Ordering::SeqCst)
    }

    /// Resolve the effective mode for a root.
    ///
    /// A root pinned to production resolves to production no matter what
    /// the switch says; a non-pinned root follows the switch.
    #[must_use]
    pub fn resolve(&self, pinned_production: bool) -> Mode {
        if pinned_production || self.is_production() {
            Mode::Production
        } else {
            Mode::Development
        }
    }
}

/// The process-wide switch.
///
/// Used by every root that was not given a private switch, and by the mark
/// extraction functions regardless of which switch their input's root was
/// bound to.
#[must_use]
pub fn global_mode_switch() -> &'static ModeSwitch {
    static GLOBAL: OnceLock<ModeSwitch> = OnceLock::new();
    GLOBAL.get_or_init(ModeSwitch::new)
}

/// Flip the process-wide switch to production. Irreversible.
pub fn set_global_production_mode() {
    global_mode_switch().set_production();
}

#[cfg(test)]
mod tests {
    use super::*;

    mod switch_tests {
        use super::*;

        #[test]
        fn test_starts_in_development() {
            let switch = ModeSwitch::new();
            assert!(!switch.is_production());
        }

        #[test]
        fn test_set_production_is_one_shot() {
            let switch = ModeSwitch::new();
            switch.set_production();
            assert!(switch.is_production());
            // a second flip is a no-op, not a toggle
            switch.set_production();
            assert!(switch.is_production());
        }

        #[test]
        fn test_clones_share_the_flag() {
            let switch = ModeSwitch::new();
            let handle = switch.clone();
            handle.set_production();
            assert!(switch.is_production());
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_development_by_default() {
            assert_eq!(ModeSwitch::new().resolve(false), Mode::Development);
        }

        #[test]
        fn test_pin_overrides_development_switch() {
            assert_eq!(ModeSwitch::new().resolve(true), Mode::Production);
        }

        #[test]
        fn test_switch_forces_non_pinned_roots() {
            let switch = ModeSwitch::new();
            switch.set_production();
            assert_eq!(switch.resolve(false), Mode::Production);
            assert_eq!(switch.resolve(true), Mode::Production);
        }

        #[test]
        fn test_mode_is_production() {
            assert!(Mode::Production.is_production());
            assert!(!Mode::Development.is_production());
        }
    }
}
