use std::time::Duration;
use thiserror::Error;

/// Supported easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EasingKind {
    /// Decelerating approach to the end value.
    EaseOut,
    /// Accelerate, then decelerate.
    EaseInOut,
}

#[derive(Debug, Error, PartialEq)]
pub enum AnimationSpecError {
    #[error("animation duration must be greater than zero")]
    ZeroDuration,

    #[error("animation endpoint {0} is not a finite number")]
    NonFinite(f64),
}

/// One tween from `from` to `to` over `duration`, shaped by `easing`.
///
/// Validated on construction and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingKind,
}

impl AnimationSpec {
    pub fn new(
        from: f64,
        to: f64,
        duration: Duration,
        easing: EasingKind,
    ) -> Result<Self, AnimationSpecError> {
        if duration.is_zero() {
            return Err(AnimationSpecError::ZeroDuration);
        }
        for v in [from, to] {
            if !v.is_finite() {
                return Err(AnimationSpecError::NonFinite(v));
            }
        }
        Ok(Self { from, to, duration, easing })
    }

    pub fn from_millis(
        from: f64,
        to: f64,
        duration_ms: u64,
        easing: EasingKind,
    ) -> Result<Self, AnimationSpecError> {
        Self::new(from, to, Duration::from_millis(duration_ms), easing)
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn easing(&self) -> EasingKind {
        self.easing
    }
}
