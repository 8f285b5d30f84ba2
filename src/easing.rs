//! Easing curves for progress tweens.
//!
//! Every curve maps normalized time `t` in `[0, 1]` to a progress fraction with
//! `f(0) = 0` and `f(1) = 1`. Inputs outside the unit range are clamped.

use std::f32::consts::PI;

/// Shape of a tween over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Starts fast and slows down; `factor` controls how strongly.
    /// A factor of 1.0 gives the classic `1 - (1 - t)^2`.
    Decelerate(f32),
    /// Slow start and end, fast middle.
    AccelerateDecelerate,
}

impl Default for Easing {
    fn default() -> Self {
        Easing::decelerate()
    }
}

impl Easing {
    /// Decelerating curve with the default factor of 1.0.
    pub const fn decelerate() -> Self {
        Easing::Decelerate(1.0)
    }

    /// Evaluates the curve at `t`.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::Decelerate(factor) => {
                if factor == 1.0 {
                    1.0 - (1.0 - t) * (1.0 - t)
                } else {
                    1.0 - (1.0 - t).powf(2.0 * factor)
                }
            }
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::decelerate(),
            Easing::Decelerate(2.5),
            Easing::AccelerateDecelerate,
        ] {
            assert!(approx(easing.apply(0.0), 0.0), "{:?} at 0", easing);
            assert!(approx(easing.apply(1.0), 1.0), "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_decelerate_is_ahead_of_linear() {
        for step in 1..10 {
            let t = step as f32 / 10.0;
            assert!(Easing::decelerate().apply(t) > t);
        }
        assert!(approx(Easing::decelerate().apply(0.5), 0.75));
        assert!(approx(Easing::Decelerate(1.0).apply(0.5), 0.75));
    }

    #[test]
    fn test_monotonic() {
        let mut last = 0.0;
        for step in 0..=100 {
            let v = Easing::decelerate().apply(step as f32 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_clamps_input() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
        assert_eq!(Easing::Linear.apply(f32::NAN), 0.0);
    }

    #[test]
    fn test_default_is_decelerate() {
        assert_eq!(Easing::default(), Easing::decelerate());
    }
}
