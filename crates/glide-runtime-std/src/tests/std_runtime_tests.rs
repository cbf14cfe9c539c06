use super::*;
use glide_animation::{TweenSpec, ValueAnimator};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::AtomicUsize;

fn recording_animator(
    runtime: &StdRuntime,
    spec: TweenSpec,
) -> (ValueAnimator, Rc<RefCell<Vec<f64>>>) {
    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&values);
    let animator = ValueAnimator::new(runtime.frame_clock(), move |value| {
        sink.borrow_mut().push(value);
    })
    .with_spec(spec);
    (animator, values)
}

#[test]
fn smooth_transition_requests_frame_and_wakes_host() {
    let runtime = StdRuntime::new();
    let wakes = Arc::new(AtomicUsize::new(0));
    let wake_counter = Arc::clone(&wakes);
    runtime.set_frame_waker(move || {
        wake_counter.fetch_add(1, Ordering::SeqCst);
    });
    let (animator, values) = recording_animator(&runtime, TweenSpec::linear(30));

    assert!(!runtime.take_frame_request());
    animator.set_smoothly(1.0, None);
    assert!(runtime.take_frame_request(), "set_smoothly should request a frame");
    assert_eq!(wakes.load(Ordering::SeqCst), 1);

    runtime.drain_frame_callbacks(0);
    runtime.drain_frame_callbacks(30_000_000);

    assert_eq!(*values.borrow(), vec![0.0, 1.0]);
    assert!(!runtime.has_pending_frames());
    assert_eq!(runtime.scheduler().total_requests(), 2);
    runtime.clear_frame_waker();
}

#[test]
fn frame_loop_runs_transition_to_completion() {
    let runtime = StdRuntime::new();
    let (animator, values) = recording_animator(&runtime, TweenSpec::linear(20));
    let frame_loop = FrameLoop::with_fps(runtime.clone(), 500);

    animator.set_smoothly(10.0, Some(2.0));
    let mut stamps = Vec::new();
    let frames = frame_loop
        .run_until_idle(|time| {
            stamps.push(time);
            Ok::<_, ()>(())
        })
        .expect("loop never fails");

    assert!(frames >= 2);
    assert_eq!(stamps.len(), frames);
    assert!(stamps.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(values.borrow().first().copied(), Some(2.0));
    assert_eq!(values.borrow().last().copied(), Some(10.0));
    assert_eq!(animator.value(), 10.0);
}

#[test]
fn frame_loop_stops_on_callback_error() {
    let runtime = StdRuntime::new();
    let (animator, _values) = recording_animator(&runtime, TweenSpec::linear(1_000));
    animator.set_smoothly(1.0, None);

    let result = FrameLoop::with_fps(runtime, 1000).run_until_idle(|_| Err("stop"));
    assert_eq!(result, Err("stop"));
}

#[test]
fn frame_loop_idle_runtime_produces_no_frames() {
    let frame_loop = FrameLoop::new(StdRuntime::new(), Duration::ZERO);
    assert_eq!(frame_loop.interval(), Duration::from_millis(1));
    assert_eq!(frame_loop.run_until_idle(|_| Ok::<_, ()>(())), Ok(0));
}

#[test]
fn frame_time_is_monotonic() {
    let runtime = StdRuntime::new();
    let first = runtime.frame_time_nanos();
    thread::sleep(Duration::from_millis(2));
    assert!(runtime.frame_time_nanos() >= first + 1_000_000);
}

#[test]
fn std_clock_reports_elapsed_millis() {
    let clock = StdClock;
    let start = clock.now();
    thread::sleep(Duration::from_millis(5));
    assert!(clock.elapsed_millis(start) >= 5);
}

#[test]
fn take_frame_request_clears_latch() {
    let scheduler = StdScheduler::new();
    scheduler.schedule_frame();
    assert!(scheduler.take_frame_request());
    assert!(!scheduler.take_frame_request());
    assert_eq!(scheduler.total_requests(), 1);
}
