//! Viewport intersection adapter.
//!
//! Wraps the platform's intersection primitive behind
//! `{observe, unobserve, disconnect}` so the visibility trigger can be driven
//! by a deterministic fake that fires callbacks synchronously.
//!
//! Nodes are identified by index, the same way components are indices into
//! the host's node arrays.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::ObserverError;

// =============================================================================
// TYPES
// =============================================================================

/// Handle to a host node (an index into the host's node table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(pub usize);

/// One intersection notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeRef,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

/// Visible-ratio thresholds at which notifications fire.
#[derive(Debug, Clone, PartialEq)]
pub enum Threshold {
    Single(f64),
    Multiple(Vec<f64>),
}

impl Threshold {
    /// Threshold values as a list, in the order given.
    pub fn values(&self) -> Vec<f64> {
        match self {
            Self::Single(v) => vec![*v],
            Self::Multiple(vs) => vs.clone(),
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::Single(0.1)
    }
}

impl From<f64> for Threshold {
    fn from(value: f64) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<f64>> for Threshold {
    fn from(values: Vec<f64>) -> Self {
        Self::Multiple(values)
    }
}

/// Observer options: `{threshold = 0.1, root_margin = "0px", root = None}`.
///
/// `root = None` observes against the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: Threshold,
    pub root_margin: String,
    pub root: Option<NodeRef>,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: Threshold::default(),
            root_margin: "0px".to_string(),
            root: None,
        }
    }
}

impl ObserverOptions {
    pub fn with_threshold(mut self, threshold: impl Into<Threshold>) -> Self {
        self.threshold = threshold.into();
        self
    }

    pub fn with_root_margin(mut self, margin: impl Into<String>) -> Self {
        self.root_margin = margin.into();
        self
    }

    pub fn with_root(mut self, root: Option<NodeRef>) -> Self {
        self.root = root;
        self
    }
}

/// Check a CSS-style margin: one to four `<number>px` or `<number>%` tokens.
pub fn parse_root_margin(margin: &str) -> Result<Vec<(f64, bool)>, ObserverError> {
    let invalid = || ObserverError::InvalidRootMargin(margin.to_string());
    let tokens: Vec<&str> = margin.split_whitespace().collect();
    if tokens.is_empty() || tokens.len() > 4 {
        return Err(invalid());
    }
    tokens
        .iter()
        .map(|token| {
            let (number, percent) = if let Some(n) = token.strip_suffix("px") {
                (n, false)
            } else if let Some(n) = token.strip_suffix('%') {
                (n, true)
            } else {
                return Err(invalid());
            };
            number.parse::<f64>().map(|v| (v, percent)).map_err(|_| invalid())
        })
        .collect()
}

/// Callback receiving batches of entries.
pub type IntersectionCallback = Rc<dyn Fn(&[IntersectionEntry])>;

/// A live observer instance.
pub trait IntersectionObserver {
    fn observe(&self, node: NodeRef);
    fn unobserve(&self, node: NodeRef);
    /// Stop all observation and release the underlying resource.
    fn disconnect(&self);
}

/// Factory for observers. Fails when the environment lacks the primitive.
pub trait IntersectionPrimitive {
    fn create(
        &self,
        options: &ObserverOptions,
        callback: IntersectionCallback,
    ) -> Result<Box<dyn IntersectionObserver>, ObserverError>;
}

// =============================================================================
// MANUAL INTERSECTION (deterministic)
// =============================================================================

struct ObserverRecord {
    options: ObserverOptions,
    callback: IntersectionCallback,
    targets: RefCell<Vec<NodeRef>>,
    observe_calls: Cell<usize>,
    disconnects: Cell<usize>,
}

impl ObserverRecord {
    fn is_live(&self) -> bool {
        self.disconnects.get() == 0
    }
}

struct ManualObserver {
    record: Rc<ObserverRecord>,
}

impl IntersectionObserver for ManualObserver {
    fn observe(&self, node: NodeRef) {
        self.record.observe_calls.set(self.record.observe_calls.get() + 1);
        let mut targets = self.record.targets.borrow_mut();
        if !targets.contains(&node) {
            targets.push(node);
        }
    }

    fn unobserve(&self, node: NodeRef) {
        self.record.targets.borrow_mut().retain(|n| *n != node);
    }

    fn disconnect(&self) {
        self.record.disconnects.set(self.record.disconnects.get() + 1);
        self.record.targets.borrow_mut().clear();
    }
}

/// Intersection primitive that fires callbacks only when told to.
///
/// Clones share the list of created observers.
#[derive(Clone, Default)]
pub struct ManualIntersection {
    observers: Rc<RefCell<Vec<Rc<ObserverRecord>>>>,
}

impl ManualIntersection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of observers created so far.
    pub fn created_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Number of observers not yet disconnected.
    pub fn live_count(&self) -> usize {
        self.observers.borrow().iter().filter(|r| r.is_live()).count()
    }

    /// Options the n-th observer was created with.
    pub fn options_of(&self, n: usize) -> Option<ObserverOptions> {
        self.observers.borrow().get(n).map(|r| r.options.clone())
    }

    /// Nodes currently observed by the n-th observer.
    pub fn targets_of(&self, n: usize) -> Vec<NodeRef> {
        self.observers
            .borrow()
            .get(n)
            .map(|r| r.targets.borrow().clone())
            .unwrap_or_default()
    }

    /// Total `observe` calls across all observers.
    pub fn observe_calls(&self) -> usize {
        self.observers.borrow().iter().map(|r| r.observe_calls.get()).sum()
    }

    /// How many times the n-th observer was disconnected.
    pub fn disconnects_of(&self, n: usize) -> usize {
        self.observers
            .borrow()
            .get(n)
            .map(|r| r.disconnects.get())
            .unwrap_or(0)
    }

    /// Deliver one entry for `node` to every live observer watching it.
    pub fn fire(&self, node: NodeRef, is_intersecting: bool, ratio: f64) {
        self.fire_batch(&[IntersectionEntry {
            target: node,
            is_intersecting,
            intersection_ratio: ratio,
        }]);
    }

    /// Deliver a batch of entries. Each live observer receives the entries for
    /// the nodes it watches, in order.
    pub fn fire_batch(&self, entries: &[IntersectionEntry]) {
        let records: Vec<Rc<ObserverRecord>> = self.observers.borrow().clone();
        for record in records {
            if !record.is_live() {
                continue;
            }
            let relevant: Vec<IntersectionEntry> = {
                let targets = record.targets.borrow();
                entries
                    .iter()
                    .filter(|e| targets.contains(&e.target))
                    .copied()
                    .collect()
            };
            if !relevant.is_empty() {
                (record.callback)(&relevant);
            }
        }
    }
}

impl IntersectionPrimitive for ManualIntersection {
    fn create(
        &self,
        options: &ObserverOptions,
        callback: IntersectionCallback,
    ) -> Result<Box<dyn IntersectionObserver>, ObserverError> {
        parse_root_margin(&options.root_margin)?;
        let record = Rc::new(ObserverRecord {
            options: options.clone(),
            callback,
            targets: RefCell::new(Vec::new()),
            observe_calls: Cell::new(0),
            disconnects: Cell::new(0),
        });
        self.observers.borrow_mut().push(record.clone());
        Ok(Box::new(ManualObserver { record }))
    }
}

/// Environment without an intersection primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedIntersection;

impl IntersectionPrimitive for UnsupportedIntersection {
    fn create(
        &self,
        _options: &ObserverOptions,
        _callback: IntersectionCallback,
    ) -> Result<Box<dyn IntersectionObserver>, ObserverError> {
        Err(ObserverError::Unsupported("no intersection observer"))
    }
}

// =============================================================================
// TESTS
// =============================================================================
