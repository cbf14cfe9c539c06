use super::*;
use crate::runtime::{DefaultScheduler, Runtime};
use std::cell::Cell;
use std::sync::Arc;

#[test]
fn with_frame_millis_converts_nanos() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let clock = runtime.frame_clock();
    let seen = Rc::new(Cell::new(0u64));

    let seen_time = Rc::clone(&seen);
    let _registration = clock.with_frame_millis(move |millis| seen_time.set(millis));
    runtime.handle().drain_frame_callbacks(48_500_000);

    assert_eq!(seen.get(), 48);
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let clock = runtime.frame_clock();
    let fired = Rc::new(Cell::new(false));

    let fired_flag = Rc::clone(&fired);
    let registration = clock.with_frame_nanos(move |_| fired_flag.set(true));
    assert!(registration.is_active());
    drop(registration);
    runtime.handle().drain_frame_callbacks(0);

    assert!(!fired.get());
    assert!(!runtime.needs_frame());
}

#[test]
fn registration_is_inactive_without_runtime() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let clock = runtime.frame_clock();
    drop(runtime);

    let registration = clock.with_frame_nanos(|_| {});
    assert!(!registration.is_active());
    registration.cancel();
}

#[test]
fn next_frame_resolves_after_drain() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let clock = runtime.frame_clock();
    let mut next = Box::pin(clock.next_frame());
    let mut cx = Context::from_waker(futures_task::noop_waker_ref());

    assert_eq!(next.as_mut().poll(&mut cx), Poll::Pending);
    assert!(runtime.needs_frame());

    runtime.handle().drain_frame_callbacks(33_000_000);
    assert_eq!(next.as_mut().poll(&mut cx), Poll::Ready(33_000_000));
}

#[test]
fn registration_stops_pending_once_fired() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let clock = runtime.frame_clock();

    let registration = clock.with_frame_nanos(|_| {});
    assert!(registration.is_pending());

    runtime.handle().drain_frame_callbacks(0);
    assert!(!registration.is_pending());
    assert!(registration.is_active());
}

#[test]
fn dropping_next_frame_unregisters_callback() {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let mut next = Box::pin(runtime.frame_clock().next_frame());
    let mut cx = Context::from_waker(futures_task::noop_waker_ref());

    assert_eq!(next.as_mut().poll(&mut cx), Poll::Pending);
    drop(next);

    assert!(!runtime.needs_frame());
    assert!(!runtime.handle().has_frame_callbacks());
}
