//! Compositor for in-flight span transitions.
//!
//! While a transition is installed, the end side's live nodes are
//! hidden and the surface alone renders that region: every frame it
//! interpolates each value pair's bounds at the current progress and
//! paints the captured image stretched into the result. Progress comes
//! either from an internal clock fed by host frame deltas, or directly
//! from a gesture.

use std::time::Duration;

use spanmorph_core::{
    HostGrid, ImageId, MorphInfo, MorphPainter, NodeId, Size, SpanValue,
};

use crate::clock::{FinishCallback, MorphClock};
use crate::config::AnimationConfig;

/// Progress value meaning "no transition installed".
const NO_PROGRESS: f32 = -1.0;

/// Per-pair image override consulted at draw time, so content that
/// finished loading after capture replaces its stale snapshot.
pub type DrawingImageProvider = Box<dyn Fn(NodeId) -> Option<ImageId>>;

/// How a forcibly wound-down clock behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FinishMode {
    /// The transition is over: reveal the end nodes and release both
    /// sides.
    Terminal,
    /// The installed state lives on; only the clock stops and its
    /// callback fires.
    Suppressed,
}

pub struct MorphSurface {
    start_info: Option<MorphInfo>,
    end_info: Option<MorphInfo>,
    progress: f32,
    viewport: Size,
    clock: Option<MorphClock>,
    config: AnimationConfig,
    drawing_provider: Option<DrawingImageProvider>,
}

impl Default for MorphSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MorphSurface {
    pub fn new() -> Self {
        Self {
            start_info: None,
            end_info: None,
            progress: NO_PROGRESS,
            viewport: Size::ZERO,
            clock: None,
            config: AnimationConfig::default(),
            drawing_provider: None,
        }
    }

    /// Whether a transition is installed, clock or not.
    pub fn is_initialized(&self) -> bool {
        self.start_info.is_some() && self.end_info.is_some()
    }

    /// Whether a clock is driving progress right now.
    pub fn is_running(&self) -> bool {
        self.clock.is_some()
    }

    /// Current progress; `-1.0` while nothing is installed.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AnimationConfig {
        &mut self.config
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn set_drawing_provider(&mut self, provider: Option<DrawingImageProvider>) {
        self.drawing_provider = provider;
    }

    /// Installs a reconciled pair, superseding anything in flight.
    ///
    /// A running transition is wound down terminally first; a stalled
    /// one (captured by a gesture that never moved) is revealed and
    /// released the same way. The new end side's nodes are hidden, and
    /// with `start_now` a full 0 to 1 clock starts.
    pub fn begin(
        &mut self,
        host: &mut dyn HostGrid,
        start_info: MorphInfo,
        end_info: MorphInfo,
        start_now: bool,
    ) {
        self.finish_clock(host, FinishMode::Terminal);
        self.clear_installed(host);

        debug_assert_eq!(
            start_info.len(),
            end_info.len(),
            "transition sides must pair one to one"
        );
        tracing::debug!(
            pairs = start_info.len(),
            start_now,
            "span transition installed"
        );
        self.start_info = Some(start_info);
        self.end_info = Some(end_info);
        self.set_end_nodes_visible(host, false);
        if start_now {
            self.clock = Some(MorphClock::new(
                0.0,
                1.0,
                self.config.duration,
                self.config.easing,
            ));
        }
        host.request_frame();
    }

    /// Drives progress directly, as a gesture does.
    ///
    /// The value is clamped to `[0, 1]`. Reaching 1 ends the
    /// transition on the spot: the end nodes are revealed and both
    /// sides released. Setting the value already shown does nothing.
    pub fn set_progress(&mut self, host: &mut dyn HostGrid, progress: f32) {
        self.finish_clock(host, FinishMode::Suppressed);
        let progress = progress.clamp(0.0, 1.0);
        if self.progress == progress {
            return;
        }
        if progress == 1.0 {
            self.clear_installed(host);
            host.request_frame();
        } else {
            self.progress = progress;
            host.request_frame();
        }
    }

    /// Runs the remaining distance back to the start state. `callback`
    /// fires once the run ends, however it ends.
    pub fn complete_to_start(
        &mut self,
        host: &mut dyn HostGrid,
        callback: Option<FinishCallback>,
    ) {
        self.complete(host, false, callback);
    }

    /// Runs the remaining distance to the end state.
    pub fn complete_to_end(
        &mut self,
        host: &mut dyn HostGrid,
        callback: Option<FinishCallback>,
    ) {
        self.complete(host, true, callback);
    }

    fn complete(
        &mut self,
        host: &mut dyn HostGrid,
        to_end: bool,
        callback: Option<FinishCallback>,
    ) {
        if !self.is_initialized() {
            return;
        }
        let from = self.progress.clamp(0.0, 1.0);
        self.finish_clock(host, FinishMode::Suppressed);

        let target = if to_end { 1.0 } else { 0.0 };
        // Completion covers only the remaining distance, at the same
        // speed a full run would.
        let duration = self.config.duration.mul_f32((target - from).abs());
        let mut clock =
            MorphClock::new(from, target, duration, self.config.complete_easing);
        if let Some(callback) = callback {
            clock = clock.with_callback(callback);
        }
        self.progress = from;
        self.clock = Some(clock);
        host.request_frame();
    }

    /// Advances the running clock by one frame delta.
    pub fn tick(&mut self, host: &mut dyn HostGrid, dt: Duration) {
        let Some(mut clock) = self.clock.take() else {
            return;
        };
        self.progress = clock.tick(dt);
        if clock.is_complete() {
            self.clear_installed(host);
            if let Some(callback) = clock.take_callback() {
                callback(host);
            }
        } else {
            self.clock = Some(clock);
        }
        host.request_frame();
    }

    /// Composites the current frame.
    ///
    /// The two sides pair index by index: reconciliation left them
    /// covering the same position range, and infos are ordered by
    /// layout position.
    pub fn draw(&self, painter: &mut dyn MorphPainter) {
        let (Some(start_info), Some(end_info)) =
            (&self.start_info, &self.end_info)
        else {
            return;
        };
        let progress = self.progress.clamp(0.0, 1.0);

        for (start, end) in start_info.values().iter().zip(end_info.values()) {
            let Some(image) = self.drawing_image(start, end) else {
                continue;
            };
            if !painter.is_image_valid(image) {
                continue;
            }
            let dst = start.bounds().lerp(end.bounds(), progress);
            if dst.outside(self.viewport) {
                continue;
            }
            painter.draw_image(image, dst);
        }
    }

    /// Tears the surface down: any transition ends terminally and every
    /// held image is released.
    pub fn dispose(&mut self, host: &mut dyn HostGrid) {
        self.finish_clock(host, FinishMode::Terminal);
        self.clear_installed(host);
    }

    /// Image to paint for one pair: the captured snapshot from either
    /// side, unless the drawing provider has something fresher for the
    /// pair's live node. Pairs that captured nothing draw nothing.
    fn drawing_image(&self, start: &SpanValue, end: &SpanValue) -> Option<ImageId> {
        let captured = start.image().or(end.image())?;
        let node = start.node().or(end.node());
        if let (Some(node), Some(provider)) = (node, &self.drawing_provider) {
            if let Some(image) = provider(node) {
                return Some(image);
            }
        }
        Some(captured)
    }

    /// Winds down the running clock, if any, jumping progress to its
    /// target and firing its callback last.
    fn finish_clock(&mut self, host: &mut dyn HostGrid, mode: FinishMode) {
        let Some(mut clock) = self.clock.take() else {
            return;
        };
        self.progress = clock.target();
        if mode == FinishMode::Terminal {
            self.clear_installed(host);
        }
        if let Some(callback) = clock.take_callback() {
            callback(host);
        }
    }

    /// Reveals the end nodes and releases both sides. Safe to call with
    /// nothing installed.
    fn clear_installed(&mut self, host: &mut dyn HostGrid) {
        self.set_end_nodes_visible(host, true);
        if let Some(mut info) = self.start_info.take() {
            info.dispose(host);
        }
        if let Some(mut info) = self.end_info.take() {
            info.dispose(host);
        }
        self.progress = NO_PROGRESS;
    }

    fn set_end_nodes_visible(&self, host: &mut dyn HostGrid, visible: bool) {
        let Some(info) = &self.end_info else {
            return;
        };
        for value in info.values() {
            if let Some(node) = value.node() {
                host.set_node_visible(node, visible);
            }
        }
    }
}
