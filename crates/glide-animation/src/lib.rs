//! Animation primitives for Glide.
//!
//! [`animate`] is the low-level interpolation primitive: it runs a single
//! tween on a [`glide_core::FrameClock`] and hands back a cancel handle.
//! [`ValueAnimator`] builds on it to drive one observable number that can be
//! retargeted mid-flight.

pub mod easing;
pub mod tween;
pub mod value_animator;

pub use easing::{Easing, Lerp};
pub use tween::{animate, TweenConfig, TweenHandle, TweenSpec, DEFAULT_DURATION_MILLIS};
pub use value_animator::{ValueAnimator, WeakValueAnimator};

pub mod prelude {
    pub use crate::easing::{Easing, Lerp};
    pub use crate::tween::{animate, TweenConfig, TweenHandle, TweenSpec};
    pub use crate::value_animator::{ValueAnimator, WeakValueAnimator};
}
