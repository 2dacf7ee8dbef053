//! Visibility Trigger - viewport intersection state per section
//!
//! Observes when a node enters or leaves the viewport and exposes a boolean
//! that gates the "hidden" vs "visible" motion variant of the section.
//!
//! - Attaching `None` is inert: no observer is created, no error.
//! - Every notification updates `is_intersecting` from the latest entry.
//! - Changing `threshold`, `root_margin` or `root` replaces the observer.
//! - Detaching (or dropping) disconnects exactly once; late notifications
//!   from the old observer are ignored.
//! - A missing intersection primitive leaves the trigger at `false`.
//! - In `once` mode the first intersecting entry latches `has_loaded`, stops
//!   observing the node, and keeps the trigger visible from then on. A loaded
//!   trigger never creates another observer.
//!
//! # Example
//!
//! ```ignore
//! let mut trigger = VisibilityTrigger::new(primitive, ObserverOptions::default());
//! trigger.attach(Some(NodeRef(section_index)));
//! let key = trigger.animate_key(); // VariantKey::Hidden until it scrolls in
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use spark_signals::{signal, Signal};

use crate::motion::variant::VariantKey;
use crate::platform::intersection::{
    IntersectionEntry, IntersectionObserver, IntersectionPrimitive, NodeRef, ObserverOptions,
};

/// Root margin used by [`VisibilityTrigger::lazy`], so content starts loading
/// just before it scrolls in.
pub const LAZY_ROOT_MARGIN: &str = "50px";

struct ActiveObserver {
    observer: Rc<dyn IntersectionObserver>,
    live: Rc<Cell<bool>>,
}

pub struct VisibilityTrigger {
    primitive: Rc<dyn IntersectionPrimitive>,
    options: ObserverOptions,
    once: bool,
    node: Option<NodeRef>,
    active: Option<ActiveObserver>,
    is_intersecting: Signal<bool>,
    has_loaded: Signal<bool>,
    entry: Rc<RefCell<Option<IntersectionEntry>>>,
}

impl VisibilityTrigger {
    pub fn new(primitive: Rc<dyn IntersectionPrimitive>, options: ObserverOptions) -> Self {
        Self {
            primitive,
            options,
            once: false,
            node: None,
            active: None,
            is_intersecting: signal(false),
            has_loaded: signal(false),
            entry: Rc::new(RefCell::new(None)),
        }
    }

    /// One-shot trigger for lazy content: default threshold, a
    /// [`LAZY_ROOT_MARGIN`] margin, `once` mode on.
    pub fn lazy(primitive: Rc<dyn IntersectionPrimitive>) -> Self {
        Self::new(primitive, ObserverOptions::default().with_root_margin(LAZY_ROOT_MARGIN)).once(true)
    }

    /// Latch on the first intersection instead of tracking every change.
    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach to a node, replacing any previous attachment.
    pub fn attach(&mut self, node: Option<NodeRef>) {
        if node == self.node && (self.active.is_some() || node.is_none()) {
            return;
        }
        self.teardown();
        self.node = node;
        self.start();
    }

    /// Stop observing and release the observer.
    pub fn detach(&mut self) {
        self.teardown();
        self.node = None;
    }

    /// Replace the options. A changed value recreates the observer.
    pub fn set_options(&mut self, options: ObserverOptions) {
        if options == self.options {
            return;
        }
        self.options = options;
        if self.node.is_some() {
            self.teardown();
            self.start();
        }
    }

    fn start(&mut self) {
        let Some(node) = self.node else {
            return;
        };
        if self.once && self.has_loaded.get() {
            return;
        }

        let live = Rc::new(Cell::new(true));
        let callback_live = live.clone();
        let state = self.is_intersecting.clone();
        let loaded = self.has_loaded.clone();
        let last_entry = self.entry.clone();
        let once = self.once;
        let handle: Rc<RefCell<Option<Weak<dyn IntersectionObserver>>>> = Rc::new(RefCell::new(None));
        let callback_handle = handle.clone();
        let callback = Rc::new(move |entries: &[IntersectionEntry]| {
            if !callback_live.get() || (once && loaded.get()) {
                return;
            }
            let Some(latest) = entries.last() else {
                return;
            };
            tracing::trace!(
                node = latest.target.0,
                intersecting = latest.is_intersecting,
                ratio = latest.intersection_ratio,
                "intersection changed"
            );
            *last_entry.borrow_mut() = Some(*latest);
            if state.get() != latest.is_intersecting {
                state.set(latest.is_intersecting);
            }
            if once && latest.is_intersecting {
                tracing::debug!(node = latest.target.0, "loaded, no longer observing");
                loaded.set(true);
                let observer = callback_handle.borrow().as_ref().and_then(Weak::upgrade);
                if let Some(observer) = observer {
                    observer.unobserve(latest.target);
                }
            }
        });

        match self.primitive.create(&self.options, callback) {
            Ok(observer) => {
                tracing::debug!(node = node.0, threshold = ?self.options.threshold, once, "observing node");
                let observer: Rc<dyn IntersectionObserver> = Rc::from(observer);
                *handle.borrow_mut() = Some(Rc::downgrade(&observer));
                observer.observe(node);
                self.active = Some(ActiveObserver { observer, live });
            }
            Err(err) => {
                tracing::warn!(error = %err, "visibility trigger inactive");
            }
        }
    }

    fn teardown(&mut self) {
        if let Some(active) = self.active.take() {
            active.live.set(false);
            active.observer.disconnect();
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn is_intersecting(&self) -> bool {
        self.is_intersecting.get()
    }

    /// Reactive view of `is_intersecting`.
    pub fn signal(&self) -> Signal<bool> {
        self.is_intersecting.clone()
    }

    /// True once a `once` trigger has seen its node intersect.
    pub fn has_loaded(&self) -> bool {
        self.has_loaded.get()
    }

    /// Reactive view of `has_loaded`.
    pub fn loaded_signal(&self) -> Signal<bool> {
        self.has_loaded.clone()
    }

    pub fn is_once(&self) -> bool {
        self.once
    }

    /// Latest entry received, if any.
    pub fn entry(&self) -> Option<IntersectionEntry> {
        *self.entry.borrow()
    }

    pub fn node(&self) -> Option<NodeRef> {
        self.node
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// True while an observer is running.
    pub fn is_observing(&self) -> bool {
        self.active.is_some()
    }

    /// Variant the section should animate to.
    pub fn animate_key(&self) -> VariantKey {
        if self.is_intersecting() {
            VariantKey::Visible
        } else {
            VariantKey::Hidden
        }
    }
}

impl Drop for VisibilityTrigger {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::intersection::{ManualIntersection, Threshold, UnsupportedIntersection};

    fn setup() -> (VisibilityTrigger, ManualIntersection) {
        let primitive = ManualIntersection::new();
        let trigger = VisibilityTrigger::new(Rc::new(primitive.clone()), ObserverOptions::default());
        (trigger, primitive)
    }

    #[test]
    fn test_initially_not_intersecting() {
        let (trigger, _) = setup();
        assert!(!trigger.is_intersecting());
        assert_eq!(trigger.animate_key(), VariantKey::Hidden);
    }

    #[test]
    fn test_null_node_is_inert() {
        let (mut trigger, primitive) = setup();
        trigger.attach(None);
        assert_eq!(primitive.created_count(), 0);
        assert_eq!(primitive.observe_calls(), 0);
        assert!(!trigger.is_observing());
    }

    #[test]
    fn test_attach_observes_node() {
        let (mut trigger, primitive) = setup();
        trigger.attach(Some(NodeRef(3)));
        assert_eq!(primitive.created_count(), 1);
        assert_eq!(primitive.targets_of(0), vec![NodeRef(3)]);
        assert_eq!(primitive.options_of(0), Some(ObserverOptions::default()));
    }

    #[test]
    fn test_updates_on_every_notification() {
        let (mut trigger, primitive) = setup();
        trigger.attach(Some(NodeRef(1)));

        primitive.fire(NodeRef(1), true, 0.2);
        assert!(trigger.is_intersecting());
        assert_eq!(trigger.animate_key(), VariantKey::Visible);

        primitive.fire(NodeRef(1), true, 0.8);
        assert_eq!(trigger.entry().unwrap().intersection_ratio, 0.8);

        primitive.fire(NodeRef(1), false, 0.0);
        assert!(!trigger.is_intersecting());
    }

    #[test]
    fn test_latest_entry_in_batch_wins() {
        let (mut trigger, primitive) = setup();
        trigger.attach(Some(NodeRef(1)));
        primitive.fire_batch(&[
            IntersectionEntry { target: NodeRef(1), is_intersecting: true, intersection_ratio: 0.5 },
            IntersectionEntry { target: NodeRef(1), is_intersecting: false, intersection_ratio: 0.0 },
        ]);
        assert!(!trigger.is_intersecting());
    }

    #[test]
    fn test_detach_disconnects_once() {
        let (mut trigger, primitive) = setup();
        trigger.attach(Some(NodeRef(1)));
        trigger.detach();
        trigger.detach();
        drop(trigger);
        assert_eq!(primitive.disconnects_of(0), 1);
    }

    #[test]
    fn test_no_updates_after_detach() {
        let (mut trigger, primitive) = setup();
        trigger.attach(Some(NodeRef(1)));
        trigger.detach();
        primitive.fire(NodeRef(1), true, 1.0);
        assert!(!trigger.is_intersecting());
    }

    #[test]
    fn test_threshold_change_recreates_observer() {
        let (mut trigger, primitive) = setup();
        trigger.attach(Some(NodeRef(1)));
        trigger.set_options(ObserverOptions::default().with_threshold(0.5));

        assert_eq!(primitive.created_count(), 2);
        assert_eq!(primitive.disconnects_of(0), 1);
        assert_eq!(primitive.live_count(), 1);
        assert_eq!(
            primitive.options_of(1).unwrap().threshold,
            Threshold::Single(0.5)
        );
    }

    #[test]
    fn test_same_options_keep_observer() {
        let (mut trigger, primitive) = setup();
        trigger.attach(Some(NodeRef(1)));
        trigger.set_options(ObserverOptions::default());
        trigger.attach(Some(NodeRef(1)));
        assert_eq!(primitive.created_count(), 1);
    }

    #[test]
    fn test_root_and_margin_changes_recreate() {
        let (mut trigger, primitive) = setup();
        trigger.attach(Some(NodeRef(1)));
        trigger.set_options(ObserverOptions::default().with_root_margin("10px"));
        trigger.set_options(
            ObserverOptions::default()
                .with_root_margin("10px")
                .with_root(Some(NodeRef(0))),
        );
        assert_eq!(primitive.created_count(), 3);
        assert_eq!(primitive.live_count(), 1);
    }

    #[test]
    fn test_options_change_while_detached() {
        let (mut trigger, primitive) = setup();
        trigger.set_options(ObserverOptions::default().with_threshold(vec![0.0, 1.0]));
        assert_eq!(primitive.created_count(), 0);
        trigger.attach(Some(NodeRef(2)));
        assert_eq!(
            primitive.options_of(0).unwrap().threshold,
            Threshold::Multiple(vec![0.0, 1.0])
        );
    }

    #[test]
    fn test_reattach_to_other_node() {
        let (mut trigger, primitive) = setup();
        trigger.attach(Some(NodeRef(1)));
        trigger.attach(Some(NodeRef(2)));
        assert_eq!(primitive.disconnects_of(0), 1);
        assert_eq!(primitive.targets_of(1), vec![NodeRef(2)]);
    }

    #[test]
    fn test_lazy_defaults() {
        let primitive = ManualIntersection::new();
        let mut trigger = VisibilityTrigger::lazy(Rc::new(primitive.clone()));
        assert!(trigger.is_once());
        trigger.attach(Some(NodeRef(4)));
        let options = primitive.options_of(0).unwrap();
        assert_eq!(options.root_margin, "50px");
        assert_eq!(options.threshold, Threshold::Single(0.1));
    }

    #[test]
    fn test_once_latches_and_unobserves() {
        let primitive = ManualIntersection::new();
        let mut trigger = VisibilityTrigger::lazy(Rc::new(primitive.clone()));
        trigger.attach(Some(NodeRef(4)));

        primitive.fire(NodeRef(4), false, 0.0);
        assert!(!trigger.has_loaded());

        primitive.fire(NodeRef(4), true, 0.3);
        assert!(trigger.has_loaded());
        assert!(trigger.is_intersecting());
        assert!(primitive.targets_of(0).is_empty());

        // scrolled away: stays visible
        primitive.fire_batch(&[IntersectionEntry {
            target: NodeRef(4),
            is_intersecting: false,
            intersection_ratio: 0.0,
        }]);
        assert!(trigger.is_intersecting());
        assert_eq!(trigger.animate_key(), VariantKey::Visible);
    }

    #[test]
    fn test_loaded_trigger_never_reobserves() {
        let primitive = ManualIntersection::new();
        let mut trigger = VisibilityTrigger::lazy(Rc::new(primitive.clone()));
        trigger.attach(Some(NodeRef(4)));
        primitive.fire(NodeRef(4), true, 1.0);

        trigger.set_options(ObserverOptions::default().with_threshold(0.5));
        trigger.attach(Some(NodeRef(5)));
        assert_eq!(primitive.created_count(), 1);
        assert_eq!(primitive.disconnects_of(0), 1);
        assert!(trigger.has_loaded());
    }

    #[test]
    fn test_tracking_mode_does_not_unobserve() {
        let (mut trigger, primitive) = setup();
        trigger.attach(Some(NodeRef(1)));
        primitive.fire(NodeRef(1), true, 1.0);
        assert!(!trigger.has_loaded());
        assert_eq!(primitive.targets_of(0), vec![NodeRef(1)]);
    }

    #[test]
    fn test_unsupported_stays_false() {
        let mut trigger =
            VisibilityTrigger::new(Rc::new(UnsupportedIntersection), ObserverOptions::default());
        trigger.attach(Some(NodeRef(1)));
        assert!(!trigger.is_observing());
        assert!(!trigger.is_intersecting());
    }
}
