//! Deterministic frame harness for Glide tests.
//!
//! ```ignore
//! let mut rule = FrameTestRule::new();
//! let animator = ValueAnimator::new(rule.frame_clock(), |_| {});
//! animator.set_smoothly(1.0, None);
//! rule.run_until_idle(FRAME_INTERVAL_MILLIS, 64);
//! ```

pub mod testing;

pub use testing::{CountingScheduler, FrameTestRule, FRAME_INTERVAL_MILLIS};
