//! Host-facing seams.
//!
//! The engine is headless: it owns no views, no clock, and no canvas.
//! Everything it needs from the embedding UI toolkit comes through
//! [`HostGrid`], and everything it paints goes through
//! [`MorphPainter`]. Hosts keep ownership of both and lend them to the
//! engine per call.

use crate::geometry::{CellBounds, Size};
use crate::value::{ImageId, ItemKind, NodeId};

/// Scroll axis of the host grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridOrientation {
    Vertical,
    Horizontal,
}

/// One currently visible, resolvable item as the host lays it out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemHolder {
    /// Adapter position of the item in layout order.
    pub layout_position: i32,
    /// Live visual node backing the item.
    pub node: NodeId,
    /// Kind tag grouping items of the same intrinsic size.
    pub item_kind: ItemKind,
    /// Laid-out bounds in viewport pixel space.
    pub bounds: CellBounds,
    /// Columns the item occupies.
    pub span_size: i32,
    /// Column the item starts at.
    pub span_index: i32,
}

/// The grid view a transition runs against.
///
/// `request_relayout` and `request_frame` are cheap, coalescable
/// nudges; the host answers them by running its layout and frame
/// machinery and calling back into the controller's frame hooks.
pub trait HostGrid {
    /// Current span count of the grid's layout.
    fn span_count(&self) -> i32;

    /// Applies a new span count to the layout. Takes effect on the next
    /// layout pass.
    fn set_span_count(&mut self, span_count: i32);

    fn orientation(&self) -> GridOrientation;

    /// Whether the layout fills from the end.
    fn reverse_layout(&self) -> bool;

    fn viewport_size(&self) -> Size;

    /// Snapshot of the currently visible items, in layout order. Items
    /// without a resolvable node are omitted.
    fn visible_items(&self) -> Vec<ItemHolder>;

    /// Row group a position lands in under `span_count` columns.
    fn span_group_index(&self, layout_position: i32, span_count: i32) -> i32;

    /// Asks for a full layout pass, including fresh item decorations.
    fn request_relayout(&mut self);

    /// Asks for another frame so `tick` and `draw` keep coming.
    fn request_frame(&mut self);

    /// Shows or hides a live node without touching layout.
    fn set_node_visible(&mut self, node: NodeId, visible: bool);

    /// Rasterizes a node's current content into a new image owned by
    /// the caller. `None` when the node has nothing to rasterize.
    fn capture_node_image(&mut self, node: NodeId) -> Option<ImageId>;

    /// Releases an image previously handed to the engine with disposal
    /// rights.
    fn release_image(&mut self, image: ImageId);
}

/// Paint sink for composited transition frames.
pub trait MorphPainter {
    /// Draws `image` stretched into `dst`.
    fn draw_image(&mut self, image: ImageId, dst: CellBounds);

    /// Whether `image` is still drawable. Hosts with images that can be
    /// invalidated behind the engine's back override this.
    fn is_image_valid(&self, _image: ImageId) -> bool {
        true
    }
}
