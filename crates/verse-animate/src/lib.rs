//! Eased tweening for the verse card and the pulse ball.
//!
//! The [`Interpolator`] drives frames on the tokio timer. Curves come from
//! an injected [`TweenBackend`]; without one (or without a runtime on the
//! calling thread) every animation is a logged no-op.

pub mod backend;
pub mod easing;
pub mod interpolator;
pub mod sequence;

pub use backend::{BuiltinTween, EasingFn, TweenBackend};
pub use interpolator::{AnimationHandle, Interpolator, Playback, DEFAULT_FRAME_INTERVAL};
pub use sequence::{ball_pulse, card_entrance, run_sequence, Phase};
