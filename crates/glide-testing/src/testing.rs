use glide_core::{FrameClock, Runtime, RuntimeHandle, RuntimeScheduler, NANOS_PER_MILLI};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Frame interval of a 60 Hz display, rounded down to whole milliseconds.
pub const FRAME_INTERVAL_MILLIS: u64 = 16;

/// Scheduler that only counts how often a frame was requested.
#[derive(Debug, Default)]
pub struct CountingScheduler {
    requests: AtomicUsize,
}

impl CountingScheduler {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

/// Headless harness that drives frames from a fake clock.
///
/// Time only moves when the test advances it, so every frame timestamp a
/// callback sees is known up front.
pub struct FrameTestRule {
    runtime: Runtime,
    scheduler: Arc<CountingScheduler>,
    now_nanos: u64,
    frames: usize,
}

impl FrameTestRule {
    /// Create a rule whose clock starts at zero.
    pub fn new() -> Self {
        let scheduler = Arc::new(CountingScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        Self {
            runtime,
            scheduler,
            now_nanos: 0,
            frames: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    /// Produce a frame at `frame_time_nanos`.
    ///
    /// # Panics
    ///
    /// Panics if the fake clock would move backwards.
    pub fn advance_frame(&mut self, frame_time_nanos: u64) {
        assert!(
            frame_time_nanos >= self.now_nanos,
            "frame time went backwards: {frame_time_nanos} < {}",
            self.now_nanos
        );
        self.now_nanos = frame_time_nanos;
        self.frames += 1;
        self.runtime.handle().drain_frame_callbacks(frame_time_nanos);
    }

    /// Move the clock forward by `millis` and produce a frame.
    pub fn advance_frame_by(&mut self, millis: u64) {
        let next = self.now_nanos + millis * NANOS_PER_MILLI;
        self.advance_frame(next);
    }

    /// Produce frames every `interval_millis` until no callback is pending.
    ///
    /// Returns the number of frames produced.
    ///
    /// # Panics
    ///
    /// Panics when callbacks are still pending after `max_frames` frames.
    pub fn run_until_idle(&mut self, interval_millis: u64, max_frames: usize) -> usize {
        let mut produced = 0;
        while self.has_pending_frames() {
            if produced == max_frames {
                panic!("run_until_idle: still busy after {max_frames} frames");
            }
            self.advance_frame_by(interval_millis);
            produced += 1;
        }
        produced
    }

    pub fn has_pending_frames(&self) -> bool {
        self.runtime.handle().has_frame_callbacks()
    }

    pub fn now_nanos(&self) -> u64 {
        self.now_nanos
    }

    pub fn now_millis(&self) -> u64 {
        self.now_nanos / NANOS_PER_MILLI
    }

    /// Frames produced so far, including ones that ran no callbacks.
    pub fn frames_produced(&self) -> usize {
        self.frames
    }

    /// How often the runtime asked the scheduler for a frame.
    pub fn frame_requests(&self) -> usize {
        self.scheduler.requests()
    }
}

impl Default for FrameTestRule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
