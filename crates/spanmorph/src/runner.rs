//! Orchestration of one span-count transition.
//!
//! A transition stretches across host frames:
//!
//! 1. Capture every visible item, then apply the new span count.
//! 2. Wait for the host to finish the next layout pass. Item content
//!    that loads asynchronously typically resolves between layout and
//!    draw, so the after capture waits further for the pre-draw point.
//! 3. Capture again, reconcile both sides, and hand them to the
//!    surface. A failed reconciliation releases everything and lets the
//!    applied layout change stand.

use spanmorph_core::{
    match_animation_values, CapturedImage, GridOrientation, HostGrid,
    ItemHolder, MorphInfo, SpanValue, SpanValueSet,
};

use crate::surface::MorphSurface;

/// Pluggable capture strategy: how one visible item becomes an image.
/// Returning `None` leaves the item out of the transition.
pub type CaptureProvider =
    Box<dyn Fn(&mut dyn HostGrid, &ItemHolder) -> Option<CapturedImage>>;

/// Wait states between the layout mutation and the after capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WaitPhase {
    /// The layout pass for the new span count has not finished yet.
    Layout,
    /// Layout done; geometry and late-loaded content become final at
    /// the pre-draw point.
    PreDraw,
}

/// A transition pending between its two captures.
pub struct MorphRunner {
    start_values: SpanValueSet,
    start_span_count: i32,
    start_now: bool,
    phase: WaitPhase,
}

impl MorphRunner {
    /// Captures the before state and applies the span-count change.
    ///
    /// Returns `None` when there is nothing to run: the target count is
    /// the current one or invalid, or no items are visible, in which
    /// case the change applies without a transition.
    ///
    /// # Panics
    ///
    /// Panics on reversed or horizontal grids; only forward vertical
    /// layouts are supported.
    pub fn start(
        host: &mut dyn HostGrid,
        span_count: i32,
        start_now: bool,
        provider: &CaptureProvider,
    ) -> Option<MorphRunner> {
        if span_count == host.span_count() || span_count < 1 {
            return None;
        }
        let items = host.visible_items();
        if items.is_empty() {
            apply_span_count(host, span_count);
            return None;
        }
        ensure_supported(host);

        let start_span_count = host.span_count();
        let start_values =
            capture_start_values(host, &items, start_span_count, provider);
        tracing::debug!(
            captured = start_values.len(),
            from = start_span_count,
            to = span_count,
            "before capture complete"
        );

        apply_span_count(host, span_count);
        host.request_frame();
        Some(MorphRunner {
            start_values,
            start_span_count,
            start_now,
            phase: WaitPhase::Layout,
        })
    }

    /// Marks the post-mutation layout pass as finished.
    pub fn on_layout_pass(&mut self) {
        if self.phase == WaitPhase::Layout {
            self.phase = WaitPhase::PreDraw;
        }
    }

    /// Whether the runner has seen its layout pass and wants the next
    /// pre-draw.
    pub fn is_ready(&self) -> bool {
        self.phase == WaitPhase::PreDraw
    }

    /// Captures the after state at the pre-draw point, reconciles, and
    /// installs the result on `surface`.
    pub fn finish(
        mut self,
        host: &mut dyn HostGrid,
        surface: &mut MorphSurface,
        provider: &CaptureProvider,
    ) {
        // Re-read: the host may have clamped or changed the count again
        // since the request.
        let end_span_count = host.span_count();
        let items = host.visible_items();
        let mut end_values = capture_end_values(
            host,
            &items,
            end_span_count,
            &mut self.start_values,
            provider,
        );
        tracing::debug!(
            start = self.start_values.len(),
            end = end_values.len(),
            "after capture complete"
        );

        if let Err(error) = match_animation_values(
            &mut self.start_values,
            self.start_span_count,
            &mut end_values,
            end_span_count,
        ) {
            tracing::debug!(%error, "transition abandoned, layout change stands");
            self.start_values.dispose(host);
            end_values.dispose(host);
            return;
        }

        surface.set_viewport(host.viewport_size());
        surface.begin(
            host,
            MorphInfo::new(self.start_values),
            MorphInfo::new(end_values),
            self.start_now,
        );
    }

    /// Abandons the pending transition, releasing the before capture.
    pub fn dispose(mut self, host: &mut dyn HostGrid) {
        self.start_values.dispose(host);
    }
}

fn ensure_supported(host: &dyn HostGrid) {
    assert!(
        !host.reverse_layout(),
        "reversed grid layouts are not supported"
    );
    assert!(
        host.orientation() == GridOrientation::Vertical,
        "horizontal grid layouts are not supported"
    );
}

fn apply_span_count(host: &mut dyn HostGrid, span_count: i32) {
    host.set_span_count(span_count);
    host.request_relayout();
}

fn capture_start_values(
    host: &mut dyn HostGrid,
    items: &[ItemHolder],
    span_count: i32,
    provider: &CaptureProvider,
) -> SpanValueSet {
    let mut values = SpanValueSet::with_capacity(items.len());
    for item in items {
        let Some(captured) = provider(host, item) else {
            continue;
        };
        values.insert(build_value(host, item, span_count, captured));
    }
    values
}

fn capture_end_values(
    host: &mut dyn HostGrid,
    items: &[ItemHolder],
    span_count: i32,
    start_values: &mut SpanValueSet,
    provider: &CaptureProvider,
) -> SpanValueSet {
    let mut values = SpanValueSet::with_capacity(items.len());
    for item in items {
        // The before side provides for the after side: an item captured
        // on both keeps its one image, and the disposal rights move
        // with it.
        let captured = match start_values.reuse_image(item.layout_position) {
            Some(captured) => captured,
            None => match provider(host, item) {
                Some(captured) => captured,
                None => continue,
            },
        };
        let mut value = build_value(host, item, span_count, captured);
        value.attach_node(item.node);
        values.insert(value);
    }
    values
}

fn build_value(
    host: &dyn HostGrid,
    item: &ItemHolder,
    span_count: i32,
    captured: CapturedImage,
) -> SpanValue {
    let span_group_index = host.span_group_index(item.layout_position, span_count);
    SpanValue::captured(
        item.layout_position,
        item.bounds,
        item.span_size,
        item.span_index,
        span_group_index,
        item.item_kind,
        captured.image,
        captured.can_dispose,
    )
}
