//! Public control surface for span transitions.

use std::time::Duration;

use spanmorph_core::{
    CapturedImage, HostGrid, ImageId, ItemHolder, MorphPainter, NodeId,
};

use crate::easing::Easing;
use crate::gesture::{PinchGestureHandler, PinchOutcome};
use crate::runner::{CaptureProvider, MorphRunner};
use crate::surface::MorphSurface;

/// Drives animated span-count transitions against one host grid.
///
/// Create exactly one per grid view. The controller is headless: the
/// host owns the real view and calls the frame hooks
/// ([`on_layout_pass`](Self::on_layout_pass),
/// [`on_pre_draw`](Self::on_pre_draw), [`tick`](Self::tick),
/// [`draw`](Self::draw)) from its own layout and frame machinery,
/// lending the grid to each call.
pub struct SpanMorphController {
    surface: MorphSurface,
    pending: Option<MorphRunner>,
    gesture: PinchGestureHandler,
    gesture_enabled: bool,
    span_counts: Vec<i32>,
    capture_provider: CaptureProvider,
}

impl Default for SpanMorphController {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanMorphController {
    pub fn new() -> Self {
        Self {
            surface: MorphSurface::new(),
            pending: None,
            gesture: PinchGestureHandler::new(),
            gesture_enabled: false,
            span_counts: Vec::new(),
            capture_provider: Box::new(default_capture_provider),
        }
    }

    /// Whether a transition clock is running.
    pub fn is_running(&self) -> bool {
        self.surface.is_running()
    }

    /// Replaces how visible items are captured. The default rasterizes
    /// each item's node into a new engine-owned image.
    pub fn set_captured_result_provider<F>(&mut self, provider: F)
    where
        F: Fn(&mut dyn HostGrid, &ItemHolder) -> Option<CapturedImage> + 'static,
    {
        self.capture_provider = Box::new(provider);
    }

    /// Installs a per-frame image override, letting content that loaded
    /// after capture replace its stale snapshot mid-transition.
    pub fn set_drawing_image_provider<F>(&mut self, provider: F)
    where
        F: Fn(NodeId) -> Option<ImageId> + 'static,
    {
        self.surface.set_drawing_provider(Some(Box::new(provider)));
    }

    /// Duration of a full-distance transition.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.surface.config_mut().duration = duration;
    }

    /// Curve for driven transitions.
    pub fn set_animation_easing(&mut self, easing: Easing) {
        self.surface.config_mut().easing = easing;
    }

    /// Curve for the completion run after a gesture ends.
    pub fn set_complete_easing(&mut self, easing: Easing) {
        self.surface.config_mut().complete_easing = easing;
    }

    /// Enables or disables the pinch entry points.
    pub fn set_scale_gesture_enabled(&mut self, enabled: bool) {
        self.gesture_enabled = enabled;
    }

    /// Sets the span counts [`increase`](Self::increase),
    /// [`decrease`](Self::decrease), and pinches step through. The set
    /// should contain the grid's initial span count. Non-positive
    /// entries are dropped, the rest sorted and deduplicated.
    pub fn set_span_counts(&mut self, span_counts: &[i32]) {
        let mut counts: Vec<i32> = span_counts
            .iter()
            .copied()
            .filter(|&count| count > 0)
            .collect();
        counts.sort_unstable();
        counts.dedup();
        self.span_counts = counts;
    }

    /// Transitions from the current span count to `span_count`.
    /// Requests targeting the current count, or below 1, do nothing.
    pub fn go(&mut self, host: &mut dyn HostGrid, span_count: i32) {
        self.request(host, span_count, true);
    }

    /// Steps to the next larger span count in the configured sequence.
    pub fn increase(&mut self, host: &mut dyn HostGrid) {
        let target = step_span_count(&self.span_counts, host.span_count(), 1);
        self.go(host, target);
    }

    /// Steps to the next smaller span count in the configured sequence.
    pub fn decrease(&mut self, host: &mut dyn HostGrid) {
        let target = step_span_count(&self.span_counts, host.span_count(), -1);
        self.go(host, target);
    }

    /// Call when the host finishes a layout pass.
    pub fn on_layout_pass(&mut self, host: &mut dyn HostGrid) {
        if let Some(runner) = &mut self.pending {
            runner.on_layout_pass();
            host.request_frame();
        }
    }

    /// Call immediately before drawing each frame. Completes a pending
    /// transition's after capture once its layout pass is done.
    pub fn on_pre_draw(&mut self, host: &mut dyn HostGrid) {
        if self.pending.as_ref().is_some_and(MorphRunner::is_ready) {
            if let Some(runner) = self.pending.take() {
                runner.finish(host, &mut self.surface, &self.capture_provider);
            }
        }
    }

    /// Call once per frame with the elapsed time since the previous
    /// one.
    pub fn tick(&mut self, host: &mut dyn HostGrid, dt: Duration) {
        self.surface.tick(host, dt);
    }

    /// Call from the host's draw pass, after ordinary item painting.
    pub fn draw(&self, painter: &mut dyn MorphPainter) {
        self.surface.draw(painter);
    }

    /// Whether a pinch may start. A false return means the rest of the
    /// gesture should not be forwarded.
    pub fn pinch_begin(&self) -> bool {
        self.gesture_enabled && self.gesture.begin(self.surface.is_running())
    }

    /// Forwards one pinch scale factor.
    pub fn pinch_update(&mut self, host: &mut dyn HostGrid, scale_factor: f32) {
        if !self.gesture_enabled {
            return;
        }
        let update = self.gesture.update(
            scale_factor,
            host.span_count(),
            self.surface.is_initialized(),
            |current, sign| step_span_count(&self.span_counts, current, sign),
        );
        if let Some(target) = update.capture {
            self.capture(host, target);
        }
        if let Some(progress) = update.progress {
            self.surface.set_progress(host, progress);
        }
    }

    /// Ends the pinch: runs the transition out forward, or back to the
    /// start with the original span count restored when the gesture
    /// barely moved.
    pub fn pinch_end(&mut self, host: &mut dyn HostGrid) {
        if !self.gesture_enabled {
            return;
        }
        match self.gesture.end(self.surface.progress()) {
            PinchOutcome::Revert { span_count } => {
                self.surface.complete_to_start(
                    host,
                    Some(Box::new(move |host| {
                        host.set_span_count(span_count);
                        host.request_relayout();
                    })),
                );
            }
            PinchOutcome::Commit => self.surface.complete_to_end(host, None),
        }
    }

    /// Tears everything down: a pending capture and any installed
    /// transition are released back to the host.
    pub fn dispose(&mut self, host: &mut dyn HostGrid) {
        if let Some(runner) = self.pending.take() {
            runner.dispose(host);
        }
        self.surface.dispose(host);
    }

    /// Gesture-path transition start: capture now, drive by progress
    /// later.
    fn capture(&mut self, host: &mut dyn HostGrid, span_count: i32) {
        self.request(host, span_count, false);
    }

    fn request(&mut self, host: &mut dyn HostGrid, span_count: i32, start_now: bool) {
        let Some(runner) =
            MorphRunner::start(host, span_count, start_now, &self.capture_provider)
        else {
            return;
        };
        // A superseded pending capture releases its images first.
        if let Some(stale) = self.pending.take() {
            stale.dispose(host);
        }
        self.pending = Some(runner);
    }
}

/// Default capture: rasterize the item's node into a new engine-owned
/// image.
fn default_capture_provider(
    host: &mut dyn HostGrid,
    item: &ItemHolder,
) -> Option<CapturedImage> {
    host.capture_node_image(item.node).map(|image| CapturedImage {
        image,
        can_dispose: true,
    })
}

/// Next span count in `span_counts` from `current`, stepping by
/// `sign`. Counts outside the sequence step arithmetically; walking off
/// either end stays put.
fn step_span_count(span_counts: &[i32], current: i32, sign: i32) -> i32 {
    debug_assert!(sign == 1 || sign == -1);
    match span_counts.iter().position(|&count| count == current) {
        None => current + sign,
        Some(index) => {
            let stepped = index as i32 + sign;
            usize::try_from(stepped)
                .ok()
                .and_then(|index| span_counts.get(index))
                .copied()
                .unwrap_or(current)
        }
    }
}
