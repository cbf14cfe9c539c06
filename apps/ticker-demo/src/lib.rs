//! Number ticker driven by a [`ValueAnimator`] on a std frame loop.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use glide_animation::{Easing, TweenSpec, ValueAnimator, DEFAULT_DURATION_MILLIS};
use glide_runtime_std::{FrameLoop, StdRuntime};

/// Animate a number through each target in turn, printing every frame.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct TickerArgs {
    /// Values to animate to, in order
    #[arg(required = true, allow_negative_numbers = true)]
    pub targets: Vec<f64>,

    /// Start the first transition from this value instead of 0
    #[arg(long, allow_negative_numbers = true)]
    pub from: Option<f64>,

    /// Transition duration in milliseconds
    #[arg(long, default_value_t = DEFAULT_DURATION_MILLIS)]
    pub duration_ms: u64,

    /// Pause between targets in milliseconds
    #[arg(long, default_value_t = 250)]
    pub interval_ms: u64,

    /// Frames per second of the loop
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Easing curve: linear, ease-in, ease-out, ease-in-out, fast-out-slow-in
    #[arg(long, default_value = "linear", value_parser = parse_easing)]
    pub easing: Easing,

    /// Decimal places to print
    #[arg(long, default_value_t = 2)]
    pub precision: usize,
}

impl TickerArgs {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.targets.is_empty(), "at least one target is required");
        ensure!(self.fps > 0, "--fps must be greater than zero");
        ensure!(self.fps <= 1000, "--fps must be at most 1000, got {}", self.fps);
        Ok(())
    }

    pub fn spec(&self) -> TweenSpec {
        TweenSpec::tween(self.duration_ms, self.easing)
    }
}

pub fn parse_easing(name: &str) -> Result<Easing, String> {
    match name {
        "linear" => Ok(Easing::Linear),
        "ease-in" => Ok(Easing::EaseIn),
        "ease-out" => Ok(Easing::EaseOut),
        "ease-in-out" => Ok(Easing::EaseInOut),
        "fast-out-slow-in" => Ok(Easing::FastOutSlowIn),
        other => Err(format!("unknown easing `{other}`")),
    }
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerSummary {
    pub frames: usize,
    pub values_printed: usize,
    pub final_value: f64,
}

/// Runs every transition to completion, writing one line per reported value.
pub fn run(args: &TickerArgs, out: &mut impl Write) -> Result<TickerSummary> {
    args.validate()?;

    let runtime = StdRuntime::new();
    let reported = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&reported);
    let animator = ValueAnimator::new(runtime.frame_clock(), move |value| {
        sink.borrow_mut().push(value);
    })
    .with_spec(args.spec());

    let frame_loop = FrameLoop::with_fps(runtime, args.fps);

    let mut summary = TickerSummary {
        frames: 0,
        values_printed: 0,
        final_value: animator.value(),
    };
    let mut from = args.from;

    for (index, &target) in args.targets.iter().enumerate() {
        log::info!("transition {} of {}: -> {target}", index + 1, args.targets.len());
        animator.set_smoothly(target, from.take());

        let frames = frame_loop.run_until_idle(|_| -> Result<()> {
            for value in reported.borrow_mut().drain(..) {
                writeln!(out, "{value:.precision$}", precision = args.precision)
                    .context("failed to write value")?;
                summary.values_printed += 1;
            }
            Ok(())
        })?;
        summary.frames += frames;

        log::debug!("transition settled at {}", animator.value());
        if index + 1 < args.targets.len() && args.interval_ms > 0 {
            thread::sleep(Duration::from_millis(args.interval_ms));
        }
    }

    out.flush().context("failed to flush output")?;
    summary.final_value = animator.value();
    Ok(summary)
}
