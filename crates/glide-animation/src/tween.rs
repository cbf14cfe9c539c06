//! Single-shot tween driven by frame callbacks.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use glide_core::{FrameCallbackRegistration, FrameClock, NANOS_PER_MILLI};

use crate::easing::{Easing, Lerp};

/// Duration used by [`TweenSpec::default`].
pub const DEFAULT_DURATION_MILLIS: u64 = 400;

/// Duration and easing of a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenSpec {
    pub duration_millis: u64,
    pub easing: Easing,
}

impl TweenSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    fn duration_nanos(&self) -> u64 {
        self.duration_millis.saturating_mul(NANOS_PER_MILLI)
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::linear(DEFAULT_DURATION_MILLIS)
    }
}

/// Everything [`animate`] needs besides the per-frame callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenConfig<T> {
    pub spec: TweenSpec,
    pub from: T,
    pub to: T,
}

impl<T> TweenConfig<T> {
    pub fn new(from: T, to: T) -> Self {
        Self {
            spec: TweenSpec::default(),
            from,
            to,
        }
    }

    pub fn with_spec(mut self, spec: TweenSpec) -> Self {
        self.spec = spec;
        self
    }
}

struct TweenState<T: 'static> {
    config: TweenConfig<T>,
    frame_clock: FrameClock,
    start_time_nanos: Cell<Option<u64>>,
    running: Cell<bool>,
    registration: RefCell<Option<FrameCallbackRegistration>>,
    on: Box<dyn Fn(T)>,
}

/// Starts interpolating `config.from` towards `config.to`.
///
/// Returns immediately; `on` is invoked once per frame, starting with the
/// next frame the clock produces. That first frame fixes the start time and
/// reports `from`. The frame on which the duration has elapsed reports `to`
/// exactly and ends the run.
///
/// The returned handle is the only way to stop the run early. Dropping it
/// lets the tween play out.
pub fn animate<T, F>(frame_clock: &FrameClock, config: TweenConfig<T>, on: F) -> TweenHandle<T>
where
    T: Lerp + Clone + 'static,
    F: Fn(T) + 'static,
{
    log::trace!(
        "tween start: {}ms {:?}",
        config.spec.duration_millis,
        config.spec.easing
    );
    let state = Rc::new(TweenState {
        config,
        frame_clock: frame_clock.clone(),
        start_time_nanos: Cell::new(None),
        running: Cell::new(true),
        registration: RefCell::new(None),
        on: Box::new(on),
    });
    schedule_next_frame(&state);
    TweenHandle { state }
}

fn schedule_next_frame<T: Lerp + Clone + 'static>(state: &Rc<TweenState<T>>) {
    let strong = Rc::clone(state);
    let registration = state
        .frame_clock
        .with_frame_nanos(move |frame_time_nanos| on_frame(&strong, frame_time_nanos));
    if !registration.is_active() {
        log::debug!("tween dropped: runtime is gone");
        state.running.set(false);
    }
    *state.registration.borrow_mut() = Some(registration);
}

fn on_frame<T: Lerp + Clone + 'static>(state: &Rc<TweenState<T>>, frame_time_nanos: u64) {
    let spent = state.registration.borrow_mut().take();
    drop(spent);

    if !state.running.get() {
        return;
    }

    let start_time = match state.start_time_nanos.get() {
        Some(start) => start,
        None => {
            state.start_time_nanos.set(Some(frame_time_nanos));
            frame_time_nanos
        }
    };
    let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
    let duration_nanos = state.config.spec.duration_nanos();

    let finished = elapsed_nanos >= duration_nanos;
    let value = if finished {
        state.config.to.clone()
    } else {
        let linear_progress = elapsed_nanos as f64 / duration_nanos as f64;
        let progress = state.config.spec.easing.transform(linear_progress);
        state.config.from.lerp(&state.config.to, progress)
    };

    if finished {
        state.running.set(false);
        log::trace!("tween finished after {elapsed_nanos}ns");
    }

    (state.on)(value);

    // `on` may have cancelled this run.
    if !finished && state.running.get() {
        schedule_next_frame(state);
    }
}

/// Cancel handle for a run started by [`animate`].
#[must_use = "dropping the handle leaves the tween running with no way to cancel it"]
pub struct TweenHandle<T: 'static> {
    state: Rc<TweenState<T>>,
}

impl<T: Clone + 'static> TweenHandle<T> {
    /// Stops the run. No further frame invokes the callback, including one
    /// already queued in the runtime.
    pub fn cancel(self) {
        let was_running = self.state.running.replace(false);
        let registration = self.state.registration.borrow_mut().take();
        if let Some(registration) = registration {
            registration.cancel();
        }
        if was_running {
            log::trace!("tween cancelled");
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    pub fn target(&self) -> T {
        self.state.config.to.clone()
    }

    pub fn spec(&self) -> TweenSpec {
        self.state.config.spec
    }
}

impl<T: 'static> fmt::Debug for TweenHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenHandle")
            .field("running", &self.state.running.get())
            .field("start_time_nanos", &self.state.start_time_nanos.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/tween_tests.rs"]
mod tests;
