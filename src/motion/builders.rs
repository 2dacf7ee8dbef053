//! Variant builders.
//!
//! Pure functions: same arguments, same [`VariantSet`]. Distances are in
//! pixels, angles in degrees, delays in seconds.

use super::timing::{base_transition, fast_transition};
use super::variant::{Transition, VariantKey, VariantSet, VariantState};

/// Default slide distance.
pub const DEFAULT_SLIDE_DISTANCE: f64 = 20.0;
/// Default delay between staggered children.
pub const DEFAULT_STAGGER_DELAY: f64 = 0.1;
/// Delay before the first staggered child. Independent of the stagger delay.
pub const STAGGER_DELAY_CHILDREN: f64 = 0.1;
/// Default starting scale of scale variants.
pub const DEFAULT_SCALE: f64 = 0.9;
/// Default starting angle of rotate variants.
pub const DEFAULT_ROTATE_ANGLE: f64 = 180.0;
/// Delay added to in-view reveals.
pub const IN_VIEW_DELAY: f64 = 0.1;

/// Direction an element travels into place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideDirection {
    /// Starts below, moves up.
    #[default]
    Up,
    /// Starts above, moves down.
    Down,
    /// Starts right, moves left.
    Left,
    /// Starts left, moves right.
    Right,
}

/// Slide-and-fade variants.
///
/// `hidden`/`exit` offset the element by `distance` on the direction's axis;
/// `visible` rests at 0. A zero distance is a pure fade and a negative
/// distance reverses the travel.
pub fn create_slide_variants(direction: SlideDirection, distance: f64) -> VariantSet {
    let offset = |state: VariantState, amount: f64| match direction {
        SlideDirection::Up => state.y(amount),
        SlideDirection::Down => state.y(0.0 - amount),
        SlideDirection::Left => state.x(amount),
        SlideDirection::Right => state.x(0.0 - amount),
    };

    VariantSet::new()
        .with(
            VariantKey::Hidden,
            offset(VariantState::new().opacity(0.0), distance).transition(base_transition()),
        )
        .with(
            VariantKey::Visible,
            offset(VariantState::new().opacity(1.0), 0.0).transition(base_transition()),
        )
        .with(
            VariantKey::Exit,
            offset(VariantState::new().opacity(0.0), distance).transition(fast_transition()),
        )
}

/// Parent variants that stagger their children.
///
/// `visible` reveals children `stagger_delay` apart after a fixed
/// [`STAGGER_DELAY_CHILDREN`]; `hidden` and `exit` run in reverse order,
/// `exit` at half the delay.
pub fn create_stagger_variants(stagger_delay: f64) -> VariantSet {
    VariantSet::new()
        .with(
            VariantKey::Hidden,
            VariantState::new()
                .transition(Transition::stagger(stagger_delay).with_stagger_direction(-1)),
        )
        .with(
            VariantKey::Visible,
            VariantState::new()
                .transition(Transition::stagger(stagger_delay).with_delay_children(STAGGER_DELAY_CHILDREN)),
        )
        .with(
            VariantKey::Exit,
            VariantState::new()
                .transition(Transition::stagger(stagger_delay / 2.0).with_stagger_direction(-1)),
        )
}

/// Scale-and-fade variants growing from `scale` to 1.
pub fn create_scale_variants(scale: f64) -> VariantSet {
    VariantSet::new()
        .with(
            VariantKey::Hidden,
            VariantState::new().opacity(0.0).scale(scale).transition(base_transition()),
        )
        .with(
            VariantKey::Visible,
            VariantState::new().opacity(1.0).scale(1.0).transition(base_transition()),
        )
        .with(
            VariantKey::Exit,
            VariantState::new().opacity(0.0).scale(scale).transition(fast_transition()),
        )
}

/// Rotate-and-fade variants turning from `angle` to 0.
pub fn create_rotate_variants(angle: f64) -> VariantSet {
    VariantSet::new()
        .with(
            VariantKey::Hidden,
            VariantState::new().opacity(0.0).rotate(angle).transition(base_transition()),
        )
        .with(
            VariantKey::Visible,
            VariantState::new().opacity(1.0).rotate(0.0).transition(base_transition()),
        )
        .with(
            VariantKey::Exit,
            VariantState::new().opacity(0.0).rotate(angle).transition(fast_transition()),
        )
}

/// Copy of `base` whose `visible` transition waits [`IN_VIEW_DELAY`].
pub fn create_in_view_variants(base: &VariantSet) -> VariantSet {
    let mut variants = base.clone();
    let visible = base.visible().cloned().unwrap_or_default();
    variants.insert(
        VariantKey::Visible,
        visible.transition(base_transition().with_delay(IN_VIEW_DELAY)),
    );
    variants
}

// =============================================================================
// TESTS
// =============================================================================
