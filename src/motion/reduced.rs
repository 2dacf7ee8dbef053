//! Reduced-motion policy.
//!
//! When the user asks the OS for reduced motion, every transition of a
//! variant set collapses to a near-instant linear tween. Target values are
//! kept so elements still end up where they belong.

use std::rc::Rc;

use serde::Serialize;
use spark_signals::{signal, Signal};

use super::variant::{Easing, Transition, VariantKey, VariantSet};
use crate::config::{FolioConfig, REDUCED_MOTION_DURATION};
use crate::platform::media::{MediaSignal, Unsubscribe};

/// Transition used in place of every transition under reduced motion.
pub fn reduced_transition(duration: f64) -> Transition {
    Transition::tween(duration, Easing::Linear)
}

/// True when the reduced-motion signal is on.
pub fn should_reduce_motion(reduced_motion: &dyn MediaSignal) -> bool {
    reduced_motion.current()
}

/// Same keys and values, every transition replaced by [`reduced_transition`].
///
/// States without a transition get one.
pub fn collapse_transitions(variants: &VariantSet, duration: f64) -> VariantSet {
    variants.map_transitions(|_| Some(reduced_transition(duration)))
}

/// Variants adjusted for the user's motion preference.
///
/// Returns `variants` unchanged unless `respect_reduced_motion` is set and
/// the signal is on.
pub fn get_animation_variants(
    variants: &VariantSet,
    respect_reduced_motion: bool,
    reduced_motion: &dyn MediaSignal,
) -> VariantSet {
    if respect_reduced_motion && should_reduce_motion(reduced_motion) {
        collapse_transitions(variants, REDUCED_MOTION_DURATION)
    } else {
        variants.clone()
    }
}

/// Props handed to an animated element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationProps {
    pub variants: VariantSet,
    pub initial: VariantKey,
    pub animate: VariantKey,
    pub exit: VariantKey,
}

/// `hidden -> visible -> exit` props with reduced motion respected.
pub fn get_animation_props(variants: &VariantSet, reduced_motion: &dyn MediaSignal) -> AnimationProps {
    AnimationProps {
        variants: get_animation_variants(variants, true, reduced_motion),
        initial: VariantKey::Hidden,
        animate: VariantKey::Visible,
        exit: VariantKey::Exit,
    }
}

// =============================================================================
// WATCH
// =============================================================================

/// Live mirror of the reduced-motion signal.
///
/// Subscribes on creation and unsubscribes on drop. The collapsed duration
/// comes from [`FolioConfig::reduced_motion_duration`].
pub struct ReducedMotionWatch {
    reduced: Signal<bool>,
    duration: f64,
    unsubscribe: Option<Unsubscribe>,
}

impl ReducedMotionWatch {
    pub fn new(reduced_motion: Rc<dyn MediaSignal>) -> Self {
        Self::with_config(reduced_motion, &FolioConfig::default())
    }

    pub fn with_config(reduced_motion: Rc<dyn MediaSignal>, config: &FolioConfig) -> Self {
        let reduced = signal(reduced_motion.current());
        let mirror = reduced.clone();
        let unsubscribe = reduced_motion.on_change(Box::new(move |value| {
            tracing::debug!(reduced = value, "reduced motion preference changed");
            mirror.set(value);
        }));
        Self {
            reduced,
            duration: config.reduced_motion_duration,
            unsubscribe: Some(unsubscribe),
        }
    }

    pub fn prefers_reduced_motion(&self) -> bool {
        self.reduced.get()
    }

    /// Reactive view of the preference.
    pub fn signal(&self) -> Signal<bool> {
        self.reduced.clone()
    }

    /// [`get_animation_variants`] against the current preference.
    pub fn apply(&self, variants: &VariantSet, respect_reduced_motion: bool) -> VariantSet {
        if respect_reduced_motion && self.prefers_reduced_motion() {
            collapse_transitions(variants, self.duration)
        } else {
            variants.clone()
        }
    }
}

impl Drop for ReducedMotionWatch {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
