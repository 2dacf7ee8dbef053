//! OS media-query signals (color scheme, reduced motion).
//!
//! A media signal is a boolean the host reports ("prefers dark?", "prefers
//! reduced motion?") plus change notifications. Hosts bridge their platform
//! query into [`ManualMedia`]; environments without the query use
//! [`AbsentMedia`], which stays at the safe default `false`.
//!
//! # Example
//!
//! ```ignore
//! use folio_core::platform::media::{ManualMedia, MediaSignal};
//!
//! let prefers_dark = ManualMedia::new(false);
//! let unsubscribe = prefers_dark.on_change(Box::new(|dark| println!("dark: {dark}")));
//! prefers_dark.set(true); // prints "dark: true"
//! unsubscribe();
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use spark_signals::{signal, Signal};

/// Cleanup returned by subscriptions. Call it to stop receiving notifications.
pub type Unsubscribe = Box<dyn FnOnce()>;

/// Listener invoked with the new value on every change.
pub type MediaCallback = Box<dyn Fn(bool)>;

/// A subscribable boolean reported by the OS.
pub trait MediaSignal {
    /// Current value of the query.
    fn current(&self) -> bool;

    /// Subscribe to changes. The returned closure unsubscribes.
    fn on_change(&self, callback: MediaCallback) -> Unsubscribe;
}

// =============================================================================
// MANUAL MEDIA
// =============================================================================

struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Rc<dyn Fn(bool)>)>,
}

/// Host-driven media signal.
///
/// Clones share the same value and listener list.
#[derive(Clone)]
pub struct ManualMedia {
    value: Signal<bool>,
    listeners: Rc<RefCell<Listeners>>,
}

impl ManualMedia {
    pub fn new(initial: bool) -> Self {
        Self {
            value: signal(initial),
            listeners: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Report a new value. Listeners fire only when the value changes.
    pub fn set(&self, value: bool) {
        if self.value.get() == value {
            return;
        }
        self.value.set(value);
        tracing::trace!(value, "media signal changed");

        // Snapshot so listeners may unsubscribe while being notified
        let listeners: Vec<Rc<dyn Fn(bool)>> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for listener in listeners {
            listener(value);
        }
    }

    /// Reactive view of the value for effects and deriveds.
    pub fn signal(&self) -> Signal<bool> {
        self.value.clone()
    }

    /// Number of active subscriptions.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

impl MediaSignal for ManualMedia {
    fn current(&self) -> bool {
        self.value.get()
    }

    fn on_change(&self, callback: MediaCallback) -> Unsubscribe {
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Rc::from(callback)));
            id
        };

        let weak: Weak<RefCell<Listeners>> = Rc::downgrade(&self.listeners);
        Box::new(move || {
            if let Some(listeners) = weak.upgrade() {
                listeners.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }
}

// =============================================================================
// ABSENT MEDIA
// =============================================================================

/// Media query not available in this environment. Always `false`, never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsentMedia;

impl MediaSignal for AbsentMedia {
    fn current(&self) -> bool {
        false
    }

    fn on_change(&self, _callback: MediaCallback) -> Unsubscribe {
        Box::new(|| {})
    }
}

// =============================================================================
// TESTS
// =============================================================================
