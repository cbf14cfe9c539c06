//! `std`-backed host services for the Glide runtime.
//!
//! [`StdRuntime`] pairs a [`Runtime`] with a scheduler that records frame
//! requests and a monotonic clock. [`FrameLoop`] turns that into a paced
//! loop for command-line hosts that have no display to sync with.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use glide_core::{Clock, FrameClock, Runtime, RuntimeHandle, RuntimeScheduler};

type FrameWaker = Box<dyn Fn() + Send + Sync + 'static>;

/// Scheduler that latches frame requests until the host collects them.
#[derive(Default)]
pub struct StdScheduler {
    requested: AtomicBool,
    total_requests: AtomicU64,
    waker: Mutex<Option<FrameWaker>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a frame was requested since the last call, and clears the latch.
    pub fn take_frame_request(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }

    /// Number of frame requests seen since creation.
    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    /// Installs a hook run on every frame request, e.g. to unpark a loop thread.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        *self.waker.lock().unwrap_or_else(PoisonError::into_inner) = Some(Box::new(waker));
    }

    pub fn clear_frame_waker(&self) {
        self.waker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.requested.store(true, Ordering::Release);
        if let Some(waker) = self
            .waker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            waker();
        }
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field("requested", &self.requested.load(Ordering::Acquire))
            .field("total_requests", &self.total_requests())
            .finish()
    }
}

/// Monotonic clock over [`std::time::Instant`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Instant) -> u64 {
        u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// A [`Runtime`] wired to [`StdScheduler`] and [`StdClock`].
///
/// Frame timestamps are measured from the moment the runtime was created.
#[derive(Clone)]
pub struct StdRuntime {
    runtime: Runtime,
    scheduler: Arc<StdScheduler>,
    clock: StdClock,
    epoch: Instant,
}

impl StdRuntime {
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::new());
        let clock = StdClock;
        Self {
            runtime: Runtime::new(scheduler.clone()),
            scheduler,
            clock,
            epoch: clock.now(),
        }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn scheduler(&self) -> Arc<StdScheduler> {
        Arc::clone(&self.scheduler)
    }

    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_frame_waker(waker);
    }

    pub fn clear_frame_waker(&self) {
        self.scheduler.clear_frame_waker();
    }

    /// Nanoseconds since this runtime was created.
    pub fn frame_time_nanos(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    pub fn has_pending_frames(&self) -> bool {
        self.runtime.needs_frame()
    }

    /// Runs queued frame callbacks with `frame_time_nanos`.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.runtime.handle().drain_frame_callbacks(frame_time_nanos);
    }

    /// Produces one frame stamped with the current time and returns that time.
    pub fn produce_frame(&self) -> u64 {
        self.take_frame_request();
        let now = self.frame_time_nanos();
        self.drain_frame_callbacks(now);
        now
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .field("needs_frame", &self.runtime.needs_frame())
            .finish()
    }
}

/// Fixed-rate frame pump for hosts without vsync.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    runtime: StdRuntime,
    interval: Duration,
}

impl FrameLoop {
    /// Paces frames `interval` apart. A zero interval is bumped to one millisecond.
    pub fn new(runtime: StdRuntime, interval: Duration) -> Self {
        Self {
            runtime,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn with_fps(runtime: StdRuntime, fps: u32) -> Self {
        let fps = fps.max(1);
        Self::new(runtime, Duration::from_secs(1) / fps)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Produces frames until no callback is waiting, calling `after_frame`
    /// with each frame time. Returns the number of frames produced.
    pub fn run_until_idle<E>(
        &self,
        mut after_frame: impl FnMut(u64) -> Result<(), E>,
    ) -> Result<usize, E> {
        let mut frames = 0;
        let mut deadline = Instant::now();
        while self.runtime.has_pending_frames() {
            deadline += self.interval;
            if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
                thread::sleep(wait);
            }
            let frame_time = self.runtime.produce_frame();
            frames += 1;
            after_frame(frame_time)?;
        }
        log::debug!("frame loop idle after {frames} frame(s)");
        Ok(frames)
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
