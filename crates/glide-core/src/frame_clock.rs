use crate::runtime::RuntimeHandle;
use crate::{FrameCallbackId, NANOS_PER_MILLI};
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// Entry point for "run this on the next visual frame".
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Runs `callback` once, on the next frame, with the frame time in nanoseconds.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let fired = Rc::new(Cell::new(false));
        let fired_flag = Rc::clone(&fired);
        let id = self.runtime.register_frame_callback(move |frame_time_nanos| {
            fired_flag.set(true);
            callback(frame_time_nanos);
        });
        FrameCallbackRegistration {
            runtime: self.runtime.clone(),
            id,
            fired,
        }
    }

    /// Like [`with_frame_nanos`](Self::with_frame_nanos), truncated to whole milliseconds.
    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| callback(nanos / NANOS_PER_MILLI))
    }

    pub fn next_frame(&self) -> NextFrame {
        NextFrame {
            clock: self.clone(),
            slot: Rc::new(RefCell::new(FrameSlot::default())),
            registration: None,
        }
    }
}

/// A callback queued on a [`FrameClock`].
///
/// Cancelling or dropping the registration before the frame arrives removes
/// the callback from the runtime. After the callback has run both are no-ops.
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
    fired: Rc<Cell<bool>>,
}

impl FrameCallbackRegistration {
    /// `false` when the runtime was already gone at registration time.
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Whether the callback is still waiting for its frame.
    pub fn is_pending(&self) -> bool {
        self.id.is_some() && !self.fired.get() && self.runtime.is_alive()
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            if !self.fired.get() {
                self.runtime.cancel_frame_callback(id);
            }
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Default)]
struct FrameSlot {
    frame_time_nanos: Option<u64>,
    waker: Option<Waker>,
}

/// Future resolving to the timestamp of the next frame, in nanoseconds.
///
/// The frame callback is registered on first poll and removed again if the
/// future is dropped before it resolves.
pub struct NextFrame {
    clock: FrameClock,
    slot: Rc<RefCell<FrameSlot>>,
    registration: Option<FrameCallbackRegistration>,
}

impl Future for NextFrame {
    type Output = u64;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        {
            let mut slot = self.slot.borrow_mut();
            if let Some(time) = slot.frame_time_nanos {
                return Poll::Ready(time);
            }
            slot.waker = Some(cx.waker().clone());
        }

        if self.registration.is_none() {
            let slot = Rc::downgrade(&self.slot);
            let registration = self.clock.with_frame_nanos(move |time| {
                let Some(slot) = slot.upgrade() else {
                    return;
                };
                let waker = {
                    let mut slot = slot.borrow_mut();
                    slot.frame_time_nanos = Some(time);
                    slot.waker.take()
                };
                if let Some(waker) = waker {
                    waker.wake();
                }
            });
            self.registration = Some(registration);
        }

        Poll::Pending
    }
}

#[cfg(test)]
#[path = "tests/frame_clock_tests.rs"]
mod tests;
