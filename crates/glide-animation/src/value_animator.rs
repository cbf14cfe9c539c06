//! Smooth transitions for a single displayed number.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use glide_core::FrameClock;

use crate::tween::{animate, TweenConfig, TweenHandle, TweenSpec};

enum Transition {
    Idle,
    Active(TweenHandle<f64>),
}

struct AnimationSession {
    current_value: f64,
    transition: Transition,
}

impl AnimationSession {
    fn cancel_transition(&mut self) {
        let transition = std::mem::replace(&mut self.transition, Transition::Idle);
        if let Transition::Active(handle) = transition {
            handle.cancel();
        }
    }
}

impl Drop for AnimationSession {
    fn drop(&mut self) {
        self.cancel_transition();
    }
}

/// Drives an observable number towards successive targets.
///
/// Every value the animator produces, whether interpolated or set directly,
/// is reported to the change callback supplied at construction. At most one
/// transition is in flight at a time; starting a new one cancels the old one
/// first.
///
/// Clones share the same session. The in-flight transition is cancelled once
/// the last clone is dropped. A change callback that needs to reach its own
/// animator should capture a [`WeakValueAnimator`]: a strong clone captured
/// by the callback keeps the session alive for as long as the callback lives.
#[derive(Clone)]
pub struct ValueAnimator {
    session: Rc<RefCell<AnimationSession>>,
    on_change: Rc<dyn Fn(f64)>,
    frame_clock: FrameClock,
    spec: TweenSpec,
}

impl ValueAnimator {
    /// Creates an idle animator whose value starts at `0.0`.
    pub fn new(frame_clock: FrameClock, on_change: impl Fn(f64) + 'static) -> Self {
        Self {
            session: Rc::new(RefCell::new(AnimationSession {
                current_value: 0.0,
                transition: Transition::Idle,
            })),
            on_change: Rc::new(on_change),
            frame_clock,
            spec: TweenSpec::default(),
        }
    }

    /// Handle that does not keep the session alive.
    pub fn downgrade(&self) -> WeakValueAnimator {
        WeakValueAnimator {
            session: Rc::downgrade(&self.session),
            on_change: Rc::downgrade(&self.on_change),
            frame_clock: self.frame_clock.clone(),
            spec: self.spec,
        }
    }

    /// Replaces the tween used by [`set_smoothly`](Self::set_smoothly).
    pub fn with_spec(mut self, spec: TweenSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn spec(&self) -> TweenSpec {
        self.spec
    }

    /// Latest value, whether it came from a frame or from
    /// [`set_immediately`](Self::set_immediately).
    pub fn value(&self) -> f64 {
        self.session.borrow().current_value
    }

    pub fn is_animating(&self) -> bool {
        matches!(
            &self.session.borrow().transition,
            Transition::Active(handle) if handle.is_running()
        )
    }

    /// Animates from the current value (or `from`, when given) to `to`.
    ///
    /// Any in-flight transition is cancelled before the new one starts, and
    /// `from` is applied before this returns. The change callback first runs
    /// on the next frame, and the last frame reports `to` exactly.
    ///
    /// Safe to call from inside the change callback.
    pub fn set_smoothly(&self, to: f64, from: Option<f64>) {
        let start = {
            let mut session = self.session.borrow_mut();
            session.cancel_transition();
            if let Some(from) = from {
                session.current_value = from;
            }
            session.current_value
        };

        log::trace!("set_smoothly {start} -> {to}");
        let config = TweenConfig::new(start, to).with_spec(self.spec);
        let handle = animate(
            &self.frame_clock,
            config,
            frame_listener(Rc::downgrade(&self.session), Rc::clone(&self.on_change)),
        );
        self.session.borrow_mut().transition = Transition::Active(handle);
    }

    /// Sets the value and reports it once, synchronously.
    ///
    /// An in-flight transition is left running and keeps overwriting the
    /// value on later frames. Call [`stop`](Self::stop) first to pin the value.
    pub fn set_immediately(&self, to: f64) {
        self.session.borrow_mut().current_value = to;
        (self.on_change)(to);
    }

    /// Cancels the in-flight transition, leaving the value at its last frame.
    pub fn stop(&self) {
        self.session.borrow_mut().cancel_transition();
    }
}

/// Non-owning counterpart of [`ValueAnimator`], obtained from
/// [`ValueAnimator::downgrade`].
#[derive(Clone)]
pub struct WeakValueAnimator {
    session: Weak<RefCell<AnimationSession>>,
    on_change: Weak<dyn Fn(f64)>,
    frame_clock: FrameClock,
    spec: TweenSpec,
}

impl WeakValueAnimator {
    /// Returns the animator if any strong clone is still alive.
    pub fn upgrade(&self) -> Option<ValueAnimator> {
        Some(ValueAnimator {
            session: self.session.upgrade()?,
            on_change: self.on_change.upgrade()?,
            frame_clock: self.frame_clock.clone(),
            spec: self.spec,
        })
    }
}

fn frame_listener(
    session: Weak<RefCell<AnimationSession>>,
    on_change: Rc<dyn Fn(f64)>,
) -> impl Fn(f64) + 'static {
    move |value| {
        let Some(session) = session.upgrade() else {
            return;
        };
        {
            let mut session = session.borrow_mut();
            session.current_value = value;
            let finished = matches!(
                &session.transition,
                Transition::Active(handle) if !handle.is_running()
            );
            if finished {
                session.transition = Transition::Idle;
            }
        }
        on_change(value);
    }
}

impl fmt::Debug for ValueAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueAnimator")
            .field("value", &self.value())
            .field("animating", &self.is_animating())
            .field("spec", &self.spec)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/value_animator_tests.rs"]
mod tests;
