//! Shared fixtures for unit tests.

use crate::geometry::{CellBounds, Size};
use crate::host::{GridOrientation, HostGrid, ItemHolder};
use crate::value::{ImageId, ItemKind, NodeId, SpanValue};

/// Single-span captured value with placeholder geometry.
pub fn captured(position: i32, image: ImageId, can_dispose: bool) -> SpanValue {
    SpanValue::captured(
        position,
        CellBounds::from_size(0.0, position as f32 * 100.0, 100.0, 100.0),
        1,
        0,
        position,
        ItemKind(0),
        image,
        can_dispose,
    )
}

/// Host that records every mutation the engine asks for.
#[derive(Default)]
pub struct RecordingHost {
    pub span_count: i32,
    pub released: Vec<ImageId>,
    pub visibility: Vec<(NodeId, bool)>,
    pub relayout_requests: usize,
    pub frame_requests: usize,
}

impl HostGrid for RecordingHost {
    fn span_count(&self) -> i32 {
        self.span_count
    }

    fn set_span_count(&mut self, span_count: i32) {
        self.span_count = span_count;
    }

    fn orientation(&self) -> GridOrientation {
        GridOrientation::Vertical
    }

    fn reverse_layout(&self) -> bool {
        false
    }

    fn viewport_size(&self) -> Size {
        Size::new(300.0, 300.0)
    }

    fn visible_items(&self) -> Vec<ItemHolder> {
        Vec::new()
    }

    fn span_group_index(&self, layout_position: i32, span_count: i32) -> i32 {
        layout_position / span_count.max(1)
    }

    fn request_relayout(&mut self) {
        self.relayout_requests += 1;
    }

    fn request_frame(&mut self) {
        self.frame_requests += 1;
    }

    fn set_node_visible(&mut self, node: NodeId, visible: bool) {
        self.visibility.push((node, visible));
    }

    fn capture_node_image(&mut self, node: NodeId) -> Option<ImageId> {
        Some(ImageId(node.0))
    }

    fn release_image(&mut self, image: ImageId) {
        self.released.push(image);
    }
}
