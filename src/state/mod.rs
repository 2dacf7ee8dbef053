//! State Module - reactive application state
//!
//! - **Store** - global theme/language preferences, effective color scheme
//! - **Bridge** - durable persistence of the preference projection
//! - **Visibility** - per-section viewport intersection
//! - **Form** - value/error/touched state for forms

pub mod action;
pub mod bridge;
pub mod form;
pub mod store;
pub mod visibility;

pub use action::{reduce, Action};
pub use bridge::PreferenceBridge;
pub use form::{FieldErrors, FieldValue, FormEngine, FormState, FormValues, SubmitStatus};
pub use store::PreferenceStore;
pub use visibility::{VisibilityTrigger, LAZY_ROOT_MARGIN};
