//! Animation timing configuration.

use std::time::Duration;

use crate::easing::Easing;

/// Timing for driven transitions and gesture completion runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Duration of a full-distance transition. Completion runs after a
    /// gesture scale by the remaining distance.
    pub duration: Duration,
    /// Curve for driven transitions.
    pub easing: Easing,
    /// Curve for the completion run after a gesture ends.
    pub complete_easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(500),
            easing: Easing::AccelerateDecelerate,
            complete_easing: Easing::Decelerate,
        }
    }
}

impl AnimationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_complete_easing(mut self, easing: Easing) -> Self {
        self.complete_easing = easing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnimationConfig::default();
        assert_eq!(config.duration, Duration::from_millis(500));
        assert_eq!(config.easing, Easing::AccelerateDecelerate);
        assert_eq!(config.complete_easing, Easing::Decelerate);
    }

    #[test]
    fn test_builder_overrides() {
        let config = AnimationConfig::new()
            .with_duration(Duration::from_millis(200))
            .with_easing(Easing::Linear)
            .with_complete_easing(Easing::Accelerate);
        assert_eq!(config.duration, Duration::from_millis(200));
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.complete_easing, Easing::Accelerate);
    }
}
