//! Animation variant data.
//!
//! A [`VariantSet`] maps named states (`hidden`, `visible`, `exit`, `rest`,
//! `hover`, `tap`, ...) to target values plus a [`Transition`]. Everything
//! here is plain, serializable data compared by structural equality.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

// =============================================================================
// Easing
// =============================================================================

/// Timing curve of a tween.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Bounce,
    Elastic,
    Anticipate,
    CubicBezier([f64; 4]),
}

impl Easing {
    /// Control points of the cubic-bezier curve.
    pub fn control_points(self) -> [f64; 4] {
        match self {
            Self::Linear => [0.0, 0.0, 1.0, 1.0],
            Self::EaseIn => [0.4, 0.0, 1.0, 1.0],
            Self::EaseOut => [0.0, 0.0, 0.2, 1.0],
            Self::EaseInOut => [0.4, 0.0, 0.2, 1.0],
            Self::Bounce => [0.68, -0.55, 0.265, 1.55],
            Self::Elastic | Self::Anticipate => [0.175, 0.885, 0.32, 1.275],
            Self::CubicBezier(points) => points,
        }
    }
}

// =============================================================================
// Transition
// =============================================================================

/// How a transition interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum TransitionKind {
    Tween,
    Spring { stiffness: f64, damping: f64, mass: f64 },
}

/// Repeat count of a looping transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Repeat {
    Times(u32),
    Infinite,
}

/// Transition descriptor. Times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease: Option<Easing>,
    #[serde(flatten)]
    pub kind: Option<TransitionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger_children: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_children: Option<f64>,
    /// `-1` reverses the child order of a stagger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger_direction: Option<i8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Repeat>,
}

impl Transition {
    /// Tween with the given duration and easing.
    pub fn tween(duration: f64, ease: Easing) -> Self {
        Self {
            duration: Some(duration),
            ease: Some(ease),
            kind: Some(TransitionKind::Tween),
            ..Self::default()
        }
    }

    pub fn spring(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            kind: Some(TransitionKind::Spring { stiffness, damping, mass }),
            ..Self::default()
        }
    }

    /// Parent-only transition that orchestrates children.
    pub fn stagger(stagger_children: f64) -> Self {
        Self {
            stagger_children: Some(stagger_children),
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_delay_children(mut self, delay: f64) -> Self {
        self.delay_children = Some(delay);
        self
    }

    pub fn with_stagger_direction(mut self, direction: i8) -> Self {
        self.stagger_direction = Some(direction);
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = Some(repeat);
        self
    }
}

// =============================================================================
// Variant states
// =============================================================================

/// Name of a variant state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKey {
    Hidden,
    Visible,
    Exit,
    Rest,
    Hover,
    Tap,
    Initial,
    In,
    Out,
    Animate,
}

impl VariantKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Visible => "visible",
            Self::Exit => "exit",
            Self::Rest => "rest",
            Self::Hover => "hover",
            Self::Tap => "tap",
            Self::Initial => "initial",
            Self::In => "in",
            Self::Out => "out",
            Self::Animate => "animate",
        }
    }
}

/// Numeric property that can be animated through keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimatedProperty {
    Opacity,
    X,
    Y,
    Scale,
    Rotate,
}

/// CSS length target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
    /// Natural size of the content.
    Auto,
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Px(value) => serializer.collect_str(&format_args!("{value}px")),
            Self::Percent(value) => serializer.collect_str(&format_args!("{value}%")),
            Self::Auto => serializer.serialize_str("auto"),
        }
    }
}

/// Target values of one state. Unset properties are left to the view layer.
///
/// A property with keyframes animates through every frame in order; setting
/// keyframes clears the single target of the same property.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(flatten)]
    pub keyframes: BTreeMap<AnimatedProperty, Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<Length>,
    /// CSS `clip-path` value, e.g. `inset(0 0 100% 0)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
}

impl VariantState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn rotate(mut self, rotate: f64) -> Self {
        self.rotate = Some(rotate);
        self
    }

    pub fn keyframes(mut self, property: AnimatedProperty, frames: impl Into<Vec<f64>>) -> Self {
        let single = match property {
            AnimatedProperty::Opacity => &mut self.opacity,
            AnimatedProperty::X => &mut self.x,
            AnimatedProperty::Y => &mut self.y,
            AnimatedProperty::Scale => &mut self.scale,
            AnimatedProperty::Rotate => &mut self.rotate,
        };
        *single = None;
        self.keyframes.insert(property, frames.into());
        self
    }

    pub fn width(mut self, width: Length) -> Self {
        self.width = Some(width);
        self
    }

    pub fn border_radius(mut self, radius: Length) -> Self {
        self.border_radius = Some(radius);
        self
    }

    pub fn clip_path(mut self, clip_path: impl Into<String>) -> Self {
        self.clip_path = Some(clip_path.into());
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }
}

/// Named set of variant states.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct VariantSet {
    states: BTreeMap<VariantKey, VariantState>,
}

impl VariantSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: VariantKey, state: VariantState) -> Self {
        self.states.insert(key, state);
        self
    }

    pub fn insert(&mut self, key: VariantKey, state: VariantState) {
        self.states.insert(key, state);
    }

    pub fn get(&self, key: VariantKey) -> Option<&VariantState> {
        self.states.get(&key)
    }

    pub fn hidden(&self) -> Option<&VariantState> {
        self.get(VariantKey::Hidden)
    }

    pub fn visible(&self) -> Option<&VariantState> {
        self.get(VariantKey::Visible)
    }

    pub fn exit(&self) -> Option<&VariantState> {
        self.get(VariantKey::Exit)
    }

    pub fn keys(&self) -> impl Iterator<Item = VariantKey> + '_ {
        self.states.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariantKey, &VariantState)> + '_ {
        self.states.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Same keys and values with every transition replaced by `f(transition)`.
    pub fn map_transitions(&self, f: impl Fn(Option<Transition>) -> Option<Transition>) -> Self {
        Self {
            states: self
                .states
                .iter()
                .map(|(key, state)| {
                    let mut state = state.clone();
                    state.transition = f(state.transition);
                    (*key, state)
                })
                .collect(),
        }
    }

    /// JSON form handed to the view layer.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// =============================================================================
// TESTS
// =============================================================================
