//! # folio-core
//!
//! Client-side state and motion core of a portfolio site.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A single [`PreferenceStore`] is created at the application root and read by
//! every view that needs the theme or language. Everything the core needs
//! from its host (OS media queries, durable storage, viewport intersection)
//! is injected through the traits in [`platform`].
//!
//! ```text
//! Action → reduce → state signal → { scheme marker, persistence effect }
//! VisibilityTrigger → is_intersecting → VariantKey::{Hidden, Visible}
//! VariantSet → reduced-motion policy → view layer
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Preference and application state types
//! - [`state`] - Store, persistence bridge, visibility trigger, form engine
//! - [`motion`] - Animation variants, builders, presets, reduced motion
//! - [`validate`] - Field-level validators
//! - [`contact`] - Contact form values and localized validation
//! - [`platform`] - Host seams and deterministic fakes
//! - [`config`] - Runtime configuration

pub mod config;
pub mod contact;
pub mod error;
pub mod motion;
pub mod platform;
pub mod state;
pub mod types;
pub mod validate;

// Re-export commonly used items
pub use types::*;

pub use config::FolioConfig;
pub use error::{ConfigError, ObserverError, StorageError, SubmitError};

pub use state::{
    reduce, Action, FieldErrors, FieldValue, FormEngine, FormState, FormValues, PreferenceBridge,
    PreferenceStore, SubmitStatus, VisibilityTrigger, LAZY_ROOT_MARGIN,
};

pub use motion::{
    create_in_view_variants, create_rotate_variants, create_scale_variants, create_slide_variants,
    create_stagger_variants, get_animation_props, get_animation_variants, should_reduce_motion,
    AnimatedProperty, AnimationProps, Easing, ElementPreset, ElementProps, GestureProps, Length,
    ReducedMotionWatch, SlideDirection, Transition, VariantKey, VariantSet, VariantState,
};

pub use validate::{PasswordStrength, ValidationResult};

pub use contact::{contact_form, validate_contact, ContactField, ContactForm};
