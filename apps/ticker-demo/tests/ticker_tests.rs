use clap::Parser;
use glide_animation::Easing;
use ticker_demo::{parse_easing, run, TickerArgs};

fn args(extra: &[&str]) -> TickerArgs {
    let mut argv = vec!["ticker-demo"];
    argv.extend_from_slice(extra);
    TickerArgs::try_parse_from(argv).expect("arguments parse")
}

#[test]
fn defaults_match_the_value_animator() {
    let parsed = args(&["100"]);
    assert_eq!(parsed.targets, vec![100.0]);
    assert_eq!(parsed.from, None);
    assert_eq!(parsed.duration_ms, 400);
    assert_eq!(parsed.fps, 60);
    assert_eq!(parsed.easing, Easing::Linear);
}

#[test]
fn negative_targets_and_from_parse() {
    let parsed = args(&["--from", "-5", "--easing", "ease-out", "-10", "3.5"]);
    assert_eq!(parsed.targets, vec![-10.0, 3.5]);
    assert_eq!(parsed.from, Some(-5.0));
    assert_eq!(parsed.easing, Easing::EaseOut);
}

#[test]
fn missing_targets_is_a_usage_error() {
    assert!(TickerArgs::try_parse_from(["ticker-demo"]).is_err());
}

#[test]
fn unknown_easing_is_rejected() {
    assert!(parse_easing("bouncy").is_err());
    assert!(TickerArgs::try_parse_from(["ticker-demo", "--easing", "bouncy", "1"]).is_err());
}

#[test]
fn zero_fps_fails_validation() {
    let parsed = args(&["--fps", "0", "1"]);
    let error = run(&parsed, &mut Vec::new()).expect_err("zero fps must fail");
    assert!(error.to_string().contains("--fps"));
}

#[test]
fn run_prints_every_frame_and_settles_on_last_target() {
    let parsed = args(&[
        "--duration-ms",
        "20",
        "--interval-ms",
        "0",
        "--fps",
        "500",
        "--from",
        "1",
        "5",
        "-2",
    ]);
    let mut out = Vec::new();

    let summary = run(&parsed, &mut out).expect("run succeeds");

    let text = String::from_utf8(out).expect("utf8 output");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.first().copied(), Some("1.00"));
    assert!(lines.contains(&"5.00"));
    assert_eq!(lines.last().copied(), Some("-2.00"));
    assert_eq!(summary.values_printed, lines.len());
    assert_eq!(summary.final_value, -2.0);
    assert!(summary.frames >= 4);
}
