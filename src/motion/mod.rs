//! Motion-policy engine.
//!
//! Declarative animation variants for the view layer:
//! - [`variant`] - variant data (states, transitions, easings)
//! - [`timing`] - standard durations and base transitions
//! - [`builders`] - parameterized variant builders
//! - [`presets`] - prebuilt sets (fade, slide, reveal, card hover, modal, ...)
//!   and ready-made element props
//! - [`reduced`] - reduced-motion policy

pub mod builders;
pub mod presets;
pub mod reduced;
pub mod timing;
pub mod variant;

pub use builders::{
    create_in_view_variants, create_rotate_variants, create_scale_variants, create_slide_variants,
    create_stagger_variants, SlideDirection,
};
pub use reduced::{
    get_animation_props, get_animation_variants, should_reduce_motion, AnimationProps, ReducedMotionWatch,
};
pub use presets::{ElementPreset, ElementProps, GestureProps};
pub use timing::{base_transition, layout_transition, optimized_transition, Speed};
pub use variant::{
    AnimatedProperty, Easing, Length, Repeat, Transition, TransitionKind, VariantKey, VariantSet, VariantState,
};
