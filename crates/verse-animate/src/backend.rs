use crate::easing;
use verse_model::EasingKind;

pub type EasingFn = fn(f64) -> f64;

/// The tweening capability the interpolator depends on.
///
/// `Interpolator` takes this as an optional injected dependency; when it is
/// absent, animations degrade to no-ops.
pub trait TweenBackend: Send + Sync {
    /// Value at `progress` (already eased) between `from` and `to`.
    fn interpolate(&self, from: f64, to: f64, progress: f64) -> f64;

    /// Curve for the given easing kind.
    fn easing(&self, kind: EasingKind) -> EasingFn;
}

/// Linear interpolation with the quadratic curves in [`crate::easing`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTween;

impl TweenBackend for BuiltinTween {
    fn interpolate(&self, from: f64, to: f64, progress: f64) -> f64 {
        from + (to - from) * progress
    }

    fn easing(&self, kind: EasingKind) -> EasingFn {
        match kind {
            EasingKind::EaseOut => easing::ease_out,
            EasingKind::EaseInOut => easing::ease_in_out,
        }
    }
}
