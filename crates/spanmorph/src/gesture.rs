//! Pinch-to-scale driving of span transitions.
//!
//! A pinch maps accumulated scale onto transition progress. Zooming in
//! steps the span count down (fewer, larger cells) and grows progress
//! from the minimum scale; zooming out steps it up and grows progress
//! from the maximum, so both directions sweep 0 to 1. The target is
//! captured once per gesture, on the first update that moves.

/// Scale endpoints a full pinch sweeps.
const MIN_SCALE: f32 = 1.0;
const MAX_SCALE: f32 = 2.0;
/// Progress at or below which a finished gesture reverts rather than
/// commits.
const REVERT_THRESHOLD: f32 = 0.2;

/// What one scale update asks the owner to do.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinchUpdate {
    /// Span count to capture a transition toward. At most one per
    /// gesture.
    pub capture: Option<i32>,
    /// Progress mapped from the accumulated scale, once a transition is
    /// installed.
    pub progress: Option<f32>,
}

/// How a finished gesture resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinchOutcome {
    /// Run the remaining distance forward and keep the new span count.
    Commit,
    /// Run back to the start and restore the span count the gesture
    /// began from.
    Revert { span_count: i32 },
}

/// Accumulated state of one pinch gesture.
#[derive(Debug)]
pub struct PinchGestureHandler {
    scale: f32,
    captured: bool,
    min_to_max: bool,
    revert_span_count: Option<i32>,
}

impl Default for PinchGestureHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PinchGestureHandler {
    pub fn new() -> Self {
        Self {
            scale: MIN_SCALE,
            captured: false,
            min_to_max: false,
            revert_span_count: None,
        }
    }

    /// Whether a new gesture may start. Blocked while a transition
    /// clock is running.
    pub fn begin(&self, running: bool) -> bool {
        !running
    }

    /// Folds one scale update into the gesture.
    ///
    /// `transform` resolves the step target from the current span count
    /// and a direction sign; `initialized` reports whether the captured
    /// transition has been installed yet, which lags the capture
    /// request by a frame.
    pub fn update(
        &mut self,
        scale_factor: f32,
        current_span_count: i32,
        initialized: bool,
        transform: impl FnOnce(i32, i32) -> i32,
    ) -> PinchUpdate {
        let mut update = PinchUpdate::default();
        if !self.captured && scale_factor != 1.0 {
            // Zooming in enlarges cells, so the span count steps down.
            let sign = if scale_factor > 1.0 { -1 } else { 1 };
            let target = transform(current_span_count, sign);
            if target != current_span_count && target >= 1 {
                self.min_to_max = scale_factor > 1.0;
                self.scale = if self.min_to_max { MIN_SCALE } else { MAX_SCALE };
                self.revert_span_count = Some(current_span_count);
                update.capture = Some(target);
            }
            self.captured = true;
        }
        if initialized {
            self.scale = (self.scale * scale_factor).clamp(MIN_SCALE, MAX_SCALE);
            update.progress = Some(if self.min_to_max {
                (self.scale - MIN_SCALE) / (MAX_SCALE - MIN_SCALE)
            } else {
                (MAX_SCALE - self.scale) / (MAX_SCALE - MIN_SCALE)
            });
        }
        update
    }

    /// Ends the gesture at the given transition progress and resets for
    /// the next one. Barely moved gestures revert.
    pub fn end(&mut self, progress: f32) -> PinchOutcome {
        let outcome = match self.revert_span_count {
            Some(span_count)
                if (0.0..=REVERT_THRESHOLD).contains(&progress) =>
            {
                PinchOutcome::Revert { span_count }
            }
            _ => PinchOutcome::Commit,
        };
        *self = Self::new();
        outcome
    }
}
