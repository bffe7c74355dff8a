//! Easing curves for transition clocks.

use std::f32::consts::PI;

/// Easing curve applied to a clock's normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Quadratic ease in.
    Accelerate,
    /// Quadratic ease out. The default completion curve after a
    /// gesture ends.
    Decelerate,
    /// Cosine ease in and out. The default transition curve.
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    /// Maps linear progress `t` onto the curve. Input is clamped to
    /// `[0, 1]`; output stays in `[0, 1]` for every variant.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Accelerate => t * t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::AccelerateDecelerate => 0.5 - (PI * t).cos() / 2.0,
        }
    }
}
