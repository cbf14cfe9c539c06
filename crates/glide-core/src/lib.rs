#![doc = r"Frame-driven runtime pieces shared by the Glide crates."]

pub mod frame_clock;
pub mod platform;
pub mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock, NextFrame};
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

/// Identifier handed out for every registered frame callback.
pub type FrameCallbackId = u64;

/// Nanoseconds in one millisecond, the unit frame timestamps are reported in.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
