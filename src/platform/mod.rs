//! Platform seams.
//!
//! Everything the core needs from its host lives behind these traits:
//! - [`media`] - OS media-query signals (dark mode, reduced motion)
//! - [`storage`] - durable per-device key-value storage
//! - [`intersection`] - viewport intersection observation

pub mod intersection;
pub mod media;
pub mod storage;

pub use intersection::{
    IntersectionCallback, IntersectionEntry, IntersectionObserver, IntersectionPrimitive,
    ManualIntersection, NodeRef, ObserverOptions, Threshold, UnsupportedIntersection,
};
pub use media::{AbsentMedia, ManualMedia, MediaCallback, MediaSignal, Unsubscribe};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
