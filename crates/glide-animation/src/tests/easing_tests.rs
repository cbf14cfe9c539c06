use super::*;

const ALL: [Easing; 5] = [
    Easing::Linear,
    Easing::EaseIn,
    Easing::EaseOut,
    Easing::EaseInOut,
    Easing::FastOutSlowIn,
];

#[test]
fn linear_is_identity() {
    assert_eq!(Easing::Linear.transform(0.0), 0.0);
    assert_eq!(Easing::Linear.transform(0.25), 0.25);
    assert_eq!(Easing::Linear.transform(1.0), 1.0);
}

#[test]
fn endpoints_are_exact() {
    for easing in ALL {
        assert_eq!(easing.transform(0.0), 0.0, "start of {easing:?}");
        assert_eq!(easing.transform(1.0), 1.0, "end of {easing:?}");
    }
}

#[test]
fn curves_are_monotonic() {
    for easing in ALL {
        let mut previous = 0.0;
        for step in 1..=20 {
            let value = easing.transform(f64::from(step) / 20.0);
            assert!(
                value + 1e-4 >= previous,
                "{easing:?} went backwards at step {step}"
            );
            previous = value;
        }
    }
}

#[test]
fn ease_in_lags_and_ease_out_leads_linear() {
    assert!(Easing::EaseIn.transform(0.5) < 0.5);
    assert!(Easing::EaseOut.transform(0.5) > 0.5);
    assert!((Easing::EaseInOut.transform(0.5) - 0.5).abs() < 0.01);
}

#[test]
fn lerp_f64_hits_both_ends() {
    assert_eq!(10.0f64.lerp(&20.0, 0.0), 10.0);
    assert_eq!(10.0f64.lerp(&20.0, 0.5), 15.0);
    assert_eq!(10.0f64.lerp(&20.0, 1.0), 20.0);
    assert_eq!((-3.0f32).lerp(&5.0, 0.5), 1.0);
}

#[test]
fn lerp_f64_keeps_full_precision_for_large_spans() {
    let value = 1.0f64.lerp(&1_000_000_001.0, 1.0 / 3.0);
    assert!((value - 333_333_334.333_333_3).abs() < 1e-6, "got {value}");
}

#[test]
fn bezier_curves_agree_with_their_solved_parameter() {
    let curve = CubicBezier::new(0.4, 0.0, 0.2, 1.0);
    for step in 1..20 {
        let x = f64::from(step) / 20.0;
        let t = curve.solve_t(x);
        assert!((curve.x.at(t) - x).abs() < 1e-9, "x drifted at {x}");
    }
}

#[test]
fn default_is_linear() {
    assert_eq!(Easing::default(), Easing::Linear);
}
