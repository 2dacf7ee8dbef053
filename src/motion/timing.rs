//! Standard durations and base transitions shared by every builder and preset.

use super::variant::{Easing, Transition};

/// Named duration steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Instant,
    Fast,
    Normal,
    Slow,
    Slower,
    Slowest,
}

impl Speed {
    /// Duration in seconds.
    pub fn seconds(self) -> f64 {
        match self {
            Self::Instant => 0.0,
            Self::Fast => 0.15,
            Self::Normal => 0.3,
            Self::Slow => 0.5,
            Self::Slower => 0.75,
            Self::Slowest => 1.0,
        }
    }
}

/// Normal-speed ease-out tween.
pub fn base_transition() -> Transition {
    Transition::tween(Speed::Normal.seconds(), Easing::EaseOut)
}

/// Base transition at fast speed. Used for exits and hovers.
pub fn fast_transition() -> Transition {
    base_transition().with_duration(Speed::Fast.seconds())
}

/// Duration-only transition for taps.
pub fn instant_transition() -> Transition {
    Transition {
        duration: Some(Speed::Instant.seconds()),
        ..Transition::default()
    }
}

/// Tween at a named speed and easing.
pub fn optimized_transition(speed: Speed, easing: Easing) -> Transition {
    Transition::tween(speed.seconds(), easing)
}

pub fn spring_transition() -> Transition {
    Transition::spring(300.0, 30.0, 1.0)
}

/// Transition for shared-layout moves (reordering, resizing).
pub fn layout_transition() -> Transition {
    spring_transition()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::variant::TransitionKind;

    #[test]
    fn test_speeds() {
        assert_eq!(Speed::Instant.seconds(), 0.0);
        assert_eq!(Speed::Normal.seconds(), 0.3);
        assert_eq!(Speed::Slowest.seconds(), 1.0);
    }

    #[test]
    fn test_base_transition() {
        let t = base_transition();
        assert_eq!(t.duration, Some(0.3));
        assert_eq!(t.ease, Some(Easing::EaseOut));
        assert_eq!(t.kind, Some(TransitionKind::Tween));
    }

    #[test]
    fn test_fast_keeps_easing() {
        let t = fast_transition();
        assert_eq!(t.duration, Some(0.15));
        assert_eq!(t.ease, Some(Easing::EaseOut));
    }

    #[test]
    fn test_layout_transition_springs() {
        let t = layout_transition();
        assert_eq!(
            t.kind,
            Some(TransitionKind::Spring { stiffness: 300.0, damping: 30.0, mass: 1.0 })
        );
        assert_eq!(t.duration, None);
    }

    #[test]
    fn test_optimized_transition() {
        let t = optimized_transition(Speed::Slow, Easing::EaseInOut);
        assert_eq!(t.duration, Some(0.5));
        assert_eq!(t.ease, Some(Easing::EaseInOut));
    }
}
