//! Host hooks for the Glide runtime.
//!
//! The runtime never reads a wall clock or talks to a display itself. A host
//! implements [`RuntimeScheduler`] to learn when a frame is wanted and
//! [`Clock`] to stamp the frames it produces; tests plug in fakes for both.

/// Receives frame requests from the runtime.
///
/// Must be `Send + Sync`: a host may forward the request to another thread
/// that owns the display loop.
pub trait RuntimeScheduler: Send + Sync {
    /// Called whenever a frame callback is queued.
    fn schedule_frame(&self);
}

/// Source of frame timestamps.
pub trait Clock: Send + Sync {
    type Instant: Copy + Send + Sync;

    fn now(&self) -> Self::Instant;

    /// Whole milliseconds since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}
