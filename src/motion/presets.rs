//! Prebuilt variant sets.
//!
//! Built-in presets, constructed on demand the same way every call.

use serde::Serialize;

use super::builders::{
    create_rotate_variants, create_scale_variants, create_slide_variants, SlideDirection,
    DEFAULT_ROTATE_ANGLE, DEFAULT_SLIDE_DISTANCE,
};
use super::reduced::{get_animation_props, AnimationProps};
use super::timing::{
    base_transition, fast_transition, instant_transition, optimized_transition, spring_transition, Speed,
};
use super::variant::{
    AnimatedProperty, Easing, Length, Repeat, Transition, VariantKey, VariantSet, VariantState,
};
use crate::platform::media::MediaSignal;

/// Starting scale of the prebuilt scale and modal sets.
pub const PRESET_SCALE: f64 = 0.8;

/// Rise distance of the section reveal.
pub const REVEAL_DISTANCE: f64 = 50.0;

pub const PULSE_DURATION: f64 = 1.5;

pub const TYPING_DURATION: f64 = 2.0;

/// Plain fade.
pub fn fade() -> VariantSet {
    VariantSet::new()
        .with(VariantKey::Hidden, VariantState::new().opacity(0.0).transition(base_transition()))
        .with(VariantKey::Visible, VariantState::new().opacity(1.0).transition(base_transition()))
        .with(VariantKey::Exit, VariantState::new().opacity(0.0).transition(fast_transition()))
}

/// Upward slide at the default distance.
pub fn slide() -> VariantSet {
    create_slide_variants(SlideDirection::Up, DEFAULT_SLIDE_DISTANCE)
}

pub fn scale() -> VariantSet {
    create_scale_variants(PRESET_SCALE)
}

pub fn rotate() -> VariantSet {
    create_rotate_variants(DEFAULT_ROTATE_ANGLE)
}

/// Card lift on hover, press on tap.
pub fn card_hover() -> VariantSet {
    VariantSet::new()
        .with(
            VariantKey::Rest,
            VariantState::new().scale(1.0).y(0.0).transition(base_transition()),
        )
        .with(
            VariantKey::Hover,
            VariantState::new().scale(1.02).y(-4.0).transition(fast_transition()),
        )
        .with(VariantKey::Tap, VariantState::new().scale(0.98).transition(instant_transition()))
}

pub fn button_hover() -> VariantSet {
    VariantSet::new()
        .with(VariantKey::Rest, VariantState::new().scale(1.0).transition(base_transition()))
        .with(VariantKey::Hover, VariantState::new().scale(1.05).transition(fast_transition()))
        .with(VariantKey::Tap, VariantState::new().scale(0.95).transition(instant_transition()))
}

/// Dialog entrance on a spring.
pub fn modal() -> VariantSet {
    let mut spring = base_transition();
    spring.kind = spring_transition().kind;

    VariantSet::new()
        .with(
            VariantKey::Hidden,
            VariantState::new()
                .opacity(0.0)
                .scale(PRESET_SCALE)
                .y(20.0)
                .transition(base_transition()),
        )
        .with(
            VariantKey::Visible,
            VariantState::new().opacity(1.0).scale(1.0).y(0.0).transition(spring),
        )
        .with(
            VariantKey::Exit,
            VariantState::new()
                .opacity(0.0)
                .scale(PRESET_SCALE)
                .y(20.0)
                .transition(fast_transition()),
        )
}

/// Overlay behind a modal.
pub fn backdrop() -> VariantSet {
    fade()
}

/// Route transition: `initial` -> `in` -> `out`.
pub fn page() -> VariantSet {
    VariantSet::new()
        .with(VariantKey::Initial, VariantState::new().opacity(0.0).y(20.0).scale(0.98))
        .with(
            VariantKey::In,
            VariantState::new()
                .opacity(1.0)
                .y(0.0)
                .scale(1.0)
                .transition(optimized_transition(Speed::Normal, Easing::EaseOut)),
        )
        .with(
            VariantKey::Out,
            VariantState::new()
                .opacity(0.0)
                .y(-20.0)
                .scale(0.98)
                .transition(optimized_transition(Speed::Fast, Easing::EaseIn)),
        )
}

/// Endless linear rotation.
pub fn spinner() -> VariantSet {
    VariantSet::new().with(
        VariantKey::Animate,
        VariantState::new().rotate(360.0).transition(Transition {
            duration: Some(Speed::Slowest.seconds()),
            ease: Some(Easing::Linear),
            repeat: Some(Repeat::Infinite),
            ..Transition::default()
        }),
    )
}

/// Endless opacity pulse for loading placeholders.
pub fn pulse() -> VariantSet {
    VariantSet::new().with(
        VariantKey::Animate,
        VariantState::new()
            .keyframes(AnimatedProperty::Opacity, [0.5, 1.0, 0.5])
            .transition(Transition {
                duration: Some(PULSE_DURATION),
                ease: Some(Easing::EaseInOut),
                repeat: Some(Repeat::Infinite),
                ..Transition::default()
            }),
    )
}

/// Text that types itself out by growing from zero width.
pub fn typing() -> VariantSet {
    VariantSet::new()
        .with(
            VariantKey::Hidden,
            VariantState::new().width(Length::Px(0.0)).transition(base_transition()),
        )
        .with(
            VariantKey::Visible,
            VariantState::new().width(Length::Auto).transition(Transition {
                duration: Some(TYPING_DURATION),
                ease: Some(Easing::EaseInOut),
                ..Transition::default()
            }),
        )
}

/// Section reveal: rises while a clip opens top to bottom.
pub fn reveal() -> VariantSet {
    VariantSet::new()
        .with(
            VariantKey::Hidden,
            VariantState::new()
                .opacity(0.0)
                .y(REVEAL_DISTANCE)
                .clip_path("inset(0 0 100% 0)")
                .transition(base_transition()),
        )
        .with(
            VariantKey::Visible,
            VariantState::new()
                .opacity(1.0)
                .y(0.0)
                .clip_path("inset(0 0 0% 0)")
                .transition(base_transition().with_duration(Speed::Slow.seconds())),
        )
}

/// Circle growing into a rounded card.
pub fn morph() -> VariantSet {
    VariantSet::new()
        .with(
            VariantKey::Initial,
            VariantState::new()
                .border_radius(Length::Percent(50.0))
                .scale(0.0)
                .transition(base_transition()),
        )
        .with(
            VariantKey::Animate,
            VariantState::new()
                .border_radius(Length::Px(8.0))
                .scale(1.0)
                .transition(base_transition().with_duration(Speed::Slow.seconds())),
        )
}

/// Preset by name, for configuration-driven callers.
pub fn by_name(name: &str) -> Option<VariantSet> {
    let variants = match name {
        "fade" => fade(),
        "slide" => slide(),
        "scale" => scale(),
        "rotate" => rotate(),
        "cardHover" | "card-hover" => card_hover(),
        "buttonHover" | "button-hover" => button_hover(),
        "modal" => modal(),
        "backdrop" => backdrop(),
        "page" => page(),
        "spinner" => spinner(),
        "pulse" => pulse(),
        "typing" => typing(),
        "reveal" => reveal(),
        "morph" => morph(),
        _ => return None,
    };
    Some(variants)
}

// =============================================================================
// ELEMENT PRESETS
// =============================================================================

/// Props for gesture-driven elements: they rest at `initial` and switch to
/// `while_hover`/`while_tap` during the gesture.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureProps {
    pub variants: VariantSet,
    pub initial: VariantKey,
    pub while_hover: VariantKey,
    pub while_tap: VariantKey,
}

impl GestureProps {
    fn rest_hover_tap(variants: VariantSet) -> Self {
        Self {
            variants,
            initial: VariantKey::Rest,
            while_hover: VariantKey::Hover,
            while_tap: VariantKey::Tap,
        }
    }
}

/// Ready-made props for a common element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ElementProps {
    /// Enters and leaves; reduced motion respected.
    Presence(AnimationProps),
    /// Reacts to hover and tap.
    Gesture(GestureProps),
}

/// Common element animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementPreset {
    FadeIn,
    SlideUp,
    SlideDown,
    SlideLeft,
    SlideRight,
    ScaleIn,
    Reveal,
    Modal,
    CardHover,
    ButtonHover,
}

impl ElementPreset {
    pub const ALL: [ElementPreset; 10] = [
        Self::FadeIn,
        Self::SlideUp,
        Self::SlideDown,
        Self::SlideLeft,
        Self::SlideRight,
        Self::ScaleIn,
        Self::Reveal,
        Self::Modal,
        Self::CardHover,
        Self::ButtonHover,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FadeIn => "fadeIn",
            Self::SlideUp => "slideUp",
            Self::SlideDown => "slideDown",
            Self::SlideLeft => "slideLeft",
            Self::SlideRight => "slideRight",
            Self::ScaleIn => "scaleIn",
            Self::Reveal => "reveal",
            Self::Modal => "modal",
            Self::CardHover => "cardHover",
            Self::ButtonHover => "buttonHover",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.as_str() == name)
    }

    /// Props for this element. Gesture presets are too short to need the
    /// reduced-motion collapse and ignore `reduced_motion`.
    pub fn props(self, reduced_motion: &dyn MediaSignal) -> ElementProps {
        let slide = |direction| create_slide_variants(direction, DEFAULT_SLIDE_DISTANCE);
        let presence = |variants: VariantSet| {
            ElementProps::Presence(get_animation_props(&variants, reduced_motion))
        };
        match self {
            Self::FadeIn => presence(fade()),
            Self::SlideUp => presence(slide(SlideDirection::Up)),
            Self::SlideDown => presence(slide(SlideDirection::Down)),
            Self::SlideLeft => presence(slide(SlideDirection::Left)),
            Self::SlideRight => presence(slide(SlideDirection::Right)),
            Self::ScaleIn => presence(scale()),
            Self::Reveal => presence(reveal()),
            Self::Modal => presence(modal()),
            Self::CardHover => ElementProps::Gesture(GestureProps::rest_hover_tap(card_hover())),
            Self::ButtonHover => ElementProps::Gesture(GestureProps::rest_hover_tap(button_hover())),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
