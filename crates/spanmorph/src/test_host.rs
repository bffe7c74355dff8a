//! Shared host and painter fixtures for unit tests.

use spanmorph_core::{
    CellBounds, GridOrientation, HostGrid, ImageId, ItemHolder, ItemKind,
    MorphInfo, MorphPainter, NodeId, Size, SpanValue, SpanValueSet,
};

#[derive(Default)]
pub struct MiniHost {
    pub span_count: i32,
    pub released: Vec<ImageId>,
    pub visibility: Vec<(NodeId, bool)>,
    pub relayout_requests: usize,
    pub frame_requests: usize,
}

impl HostGrid for MiniHost {
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

#[derive(Default)]
pub struct RecordingPainter {
    pub draws: Vec<(ImageId, CellBounds)>,
    pub invalid: Vec<ImageId>,
}

impl MorphPainter for RecordingPainter {
    fn draw_image(&mut self, image: ImageId, dst: CellBounds) {
        self.draws.push((image, dst));
    }

    fn is_image_valid(&self, image: ImageId) -> bool {
        !self.invalid.contains(&image)
    }
}

/// Captured value at a fixed row of 100px cells.
pub fn captured_at(
    position: i32,
    left: f32,
    top: f32,
    image: ImageId,
    can_dispose: bool,
) -> SpanValue {
    SpanValue::captured(
        position,
        CellBounds::from_size(left, top, 100.0, 100.0),
        1,
        0,
        position,
        ItemKind(0),
        image,
        can_dispose,
    )
}

/// Info over one side built from `(position, left, top, image)` rows,
/// with a node bound per value.
pub fn info_with_nodes(rows: &[(i32, f32, f32, u64)]) -> MorphInfo {
    let mut set = SpanValueSet::new();
    for &(position, left, top, image) in rows {
        let mut value =
            captured_at(position, left, top, ImageId(image), true);
        value.attach_node(NodeId(image));
        set.insert(value);
    }
    MorphInfo::new(set)
}

/// Info over one side built from `(position, left, top, image)` rows,
/// without nodes.
pub fn info_without_nodes(rows: &[(i32, f32, f32, u64)]) -> MorphInfo {
    let mut set = SpanValueSet::new();
    for &(position, left, top, image) in rows {
        set.insert(captured_at(position, left, top, ImageId(image), true));
    }
    MorphInfo::new(set)
}
