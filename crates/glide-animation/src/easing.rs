/// Types that can be linearly interpolated.
///
/// The fraction is always `f64` so that `f64` values keep full precision.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f64) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f64) -> Self {
        self + (target - self) * fraction as f32
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f64) -> Self {
        self + (target - self) * fraction
    }
}

/// Easing curves applied to the linear progress of a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// No easing.
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material "standard" curve.
    FastOutSlowIn,
}

impl Easing {
    /// Map a linear fraction in [0, 1] onto the curve.
    ///
    /// Both endpoints map exactly onto themselves.
    pub fn transform(&self, fraction: f64) -> f64 {
        let curve = match self {
            Easing::Linear => return fraction.clamp(0.0, 1.0),
            Easing::EaseIn => CubicBezier::new(0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0),
            Easing::FastOutSlowIn => CubicBezier::new(0.4, 0.0, 0.2, 1.0),
        };
        curve.y_at_x(fraction)
    }
}

/// Polynomial coefficients of one axis of a unit cubic bezier
/// (endpoints pinned at 0 and 1).
#[derive(Clone, Copy)]
struct Axis {
    a: f64,
    b: f64,
    c: f64,
}

impl Axis {
    const fn new(p1: f64, p2: f64) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self {
            a: 1.0 - c - b,
            b,
            c,
        }
    }

    fn at(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn slope(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}

struct CubicBezier {
    x: Axis,
    y: Axis,
}

impl CubicBezier {
    const EPSILON: f64 = 1e-12;

    const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x: Axis::new(x1, x2),
            y: Axis::new(y1, y2),
        }
    }

    fn y_at_x(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        self.y.at(self.solve_t(x))
    }

    /// Curve parameter whose x equals `x`: Newton steps first, bisection if
    /// the slope flattens out before converging.
    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..8 {
            let error = self.x.at(t) - x;
            if error.abs() < Self::EPSILON {
                return t;
            }
            let slope = self.x.slope(t);
            if slope.abs() < Self::EPSILON {
                break;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0f64, 1.0f64);
        t = x;
        for _ in 0..52 {
            let error = self.x.at(t) - x;
            if error.abs() < Self::EPSILON {
                break;
            }
            if error > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }
}

#[cfg(test)]
#[path = "tests/easing_tests.rs"]
mod tests;
