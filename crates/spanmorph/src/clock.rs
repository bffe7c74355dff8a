//! Progress clock for timed transition runs.

use std::time::Duration;

use spanmorph_core::HostGrid;

use crate::easing::Easing;

/// Invoked once when a completion run ends, whether it finished on its
/// own or was forcibly wound down. Receives the host so it can mutate
/// the layout, as the gesture revert does.
pub type FinishCallback = Box<dyn FnOnce(&mut dyn HostGrid)>;

/// Interpolates progress between two endpoints over a fixed duration.
///
/// The clock never schedules anything itself; the host advances it by
/// feeding frame deltas through the controller's `tick`.
pub struct MorphClock {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
    on_finished: Option<FinishCallback>,
}

impl MorphClock {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
            easing,
            on_finished: None,
        }
    }

    pub fn with_callback(mut self, callback: FinishCallback) -> Self {
        self.on_finished = Some(callback);
        self
    }

    /// Advances by `dt` and returns the eased progress value.
    pub fn tick(&mut self, dt: Duration) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    /// Eased progress at the current elapsed time. A zero-duration
    /// clock sits at its target from the start.
    pub fn value(&self) -> f32 {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Progress endpoint the clock is heading toward.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Takes the finish callback for firing. The clock is spent once
    /// this returns.
    pub(crate) fn take_callback(&mut self) -> Option<FinishCallback> {
        self.on_finished.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_progression() {
        let mut clock =
            MorphClock::new(0.0, 1.0, Duration::from_millis(100), Easing::Linear);
        assert_eq!(clock.value(), 0.0);
        assert!(!clock.is_complete());

        assert_eq!(clock.tick(Duration::from_millis(25)), 0.25);
        assert_eq!(clock.tick(Duration::from_millis(25)), 0.5);
        assert!(!clock.is_complete());

        // Overshoot saturates at the target.
        assert_eq!(clock.tick(Duration::from_millis(200)), 1.0);
        assert!(clock.is_complete());
    }

    #[test]
    fn test_partial_range() {
        let mut clock =
            MorphClock::new(0.6, 0.0, Duration::from_millis(100), Easing::Linear);
        assert_eq!(clock.value(), 0.6);
        let halfway = clock.tick(Duration::from_millis(50));
        assert!((halfway - 0.3).abs() < 1e-6);
        assert_eq!(clock.target(), 0.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let clock = MorphClock::new(0.3, 1.0, Duration::ZERO, Easing::Linear);
        assert!(clock.is_complete());
        assert_eq!(clock.value(), 1.0);
    }

    #[test]
    fn test_take_callback_once() {
        let mut clock =
            MorphClock::new(0.0, 1.0, Duration::from_millis(10), Easing::Linear)
                .with_callback(Box::new(|_| {}));
        assert!(clock.take_callback().is_some());
        assert!(clock.take_callback().is_none());
    }
}
