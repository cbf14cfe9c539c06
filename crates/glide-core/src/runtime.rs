use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::FrameCallbackId;

pub(crate) type FrameCallback = Box<dyn FnOnce(u64) + 'static>;

/// Callbacks waiting for the next frame, in registration order.
#[derive(Default)]
struct FrameQueue {
    entries: Vec<(FrameCallbackId, FrameCallback)>,
    next_id: FrameCallbackId,
}

impl FrameQueue {
    fn push(&mut self, callback: FrameCallback) -> FrameCallbackId {
        self.next_id += 1;
        self.entries.push((self.next_id, callback));
        self.next_id
    }

    fn remove(&mut self, id: FrameCallbackId) -> Option<FrameCallback> {
        let index = self.entries.iter().position(|(queued, _)| *queued == id)?;
        Some(self.entries.remove(index).1)
    }

    fn take_all(&mut self) -> Vec<(FrameCallbackId, FrameCallback)> {
        std::mem::take(&mut self.entries)
    }
}

struct RuntimeState {
    scheduler: Arc<dyn RuntimeScheduler>,
    queue: RefCell<FrameQueue>,
    frame_pending: Cell<bool>,
}

impl RuntimeState {
    fn request_frame(&self) {
        self.frame_pending.set(true);
        self.scheduler.schedule_frame();
    }

    fn enqueue(&self, callback: FrameCallback) -> FrameCallbackId {
        let id = self.queue.borrow_mut().push(callback);
        self.request_frame();
        id
    }

    fn dequeue(&self, id: FrameCallbackId) {
        let removed = {
            let mut queue = self.queue.borrow_mut();
            let removed = queue.remove(id);
            if removed.is_some() && queue.entries.is_empty() {
                self.frame_pending.set(false);
            }
            removed
        };
        // Dropped outside the borrow: captured state may cancel other callbacks.
        drop(removed);
    }

    fn has_queued(&self) -> bool {
        !self.queue.borrow().entries.is_empty()
    }

    fn run_frame(&self, frame_time_nanos: u64) {
        // The queue is released before running anything so callbacks can
        // register for the following frame.
        let due = self.queue.borrow_mut().take_all();
        if !due.is_empty() {
            log::debug!("frame at {frame_time_nanos}ns runs {} callback(s)", due.len());
        }
        for (_, callback) in due {
            callback(frame_time_nanos);
        }
        self.frame_pending.set(self.has_queued());
    }
}

/// Owner of the frame-callback queue.
///
/// The runtime is single-threaded: it lives on the thread that created it
/// and hands out [`RuntimeHandle`]s that weakly reference it. Only the
/// scheduler it is built with may be shared across threads.
#[derive(Clone)]
pub struct Runtime {
    state: Rc<RuntimeState>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            state: Rc::new(RuntimeState {
                scheduler,
                queue: RefCell::new(FrameQueue::default()),
                frame_pending: Cell::new(false),
            }),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            state: Rc::downgrade(&self.state),
        }
    }

    /// Whether a callback is waiting for a frame.
    pub fn needs_frame(&self) -> bool {
        self.state.frame_pending.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

/// Scheduler that ignores frame requests; the host polls `needs_frame` instead.
#[derive(Debug, Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

/// Weak, cloneable access to a [`Runtime`].
///
/// Every operation becomes a no-op once the runtime has been dropped.
#[derive(Clone)]
pub struct RuntimeHandle {
    state: Weak<RuntimeState>,
}

impl RuntimeHandle {
    /// Queues `callback` for the next frame and asks the scheduler for one.
    ///
    /// Returns `None` when the runtime is gone.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        let state = self.state.upgrade()?;
        Some(state.enqueue(Box::new(callback)))
    }

    /// Removes a queued callback. Unknown or already-run ids are ignored.
    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(state) = self.state.upgrade() {
            state.dequeue(id);
        }
    }

    /// Runs every callback queued before this call with `frame_time_nanos`.
    ///
    /// Callbacks registered while draining are kept for the next frame.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(state) = self.state.upgrade() {
            state.run_frame(frame_time_nanos);
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn needs_frame(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|state| state.frame_pending.get())
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.state.upgrade().is_some_and(|state| state.has_queued())
    }

    pub fn is_alive(&self) -> bool {
        self.state.strong_count() > 0
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
