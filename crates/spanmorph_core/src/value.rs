//! Per-item snapshot values.
//!
//! A [`SpanValue`] freezes one item's geometry, grid placement, and
//! visual payload on one side of a span-count transition. Captured
//! values come from live children before or after the change;
//! calculated values are synthesized during reconciliation for items
//! only one side could see, and carry no image.

use crate::geometry::CellBounds;

/// Non-owning handle to a live visual node in the host tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// Handle to an image in the host's image store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u64);

/// Opaque item-kind tag. Items of the same kind share an intrinsic
/// child size during reconciliation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemKind(pub i32);

/// Result of capturing one item's visual state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapturedImage {
    pub image: ImageId,
    /// Whether disposal rights come with the image. When false the
    /// image belongs to the host (a shared cache, for instance) and is
    /// never released by the transition.
    pub can_dispose: bool,
}

/// One item's frozen state on one side of a transition.
///
/// Values are immutable once built; the only post-capture mutation is
/// [`attach_node`](SpanValue::attach_node), which binds the live node a
/// captured end value stands in for.
#[derive(Debug)]
pub struct SpanValue {
    bounds: CellBounds,
    span_size: i32,
    span_index: i32,
    span_group_index: i32,
    image: Option<ImageId>,
    can_dispose: bool,
    item_kind: ItemKind,
    layout_position: i32,
    node: Option<NodeId>,
}

impl SpanValue {
    /// Value captured from a laid-out child.
    #[allow(clippy::too_many_arguments)]
    pub fn captured(
        layout_position: i32,
        bounds: CellBounds,
        span_size: i32,
        span_index: i32,
        span_group_index: i32,
        item_kind: ItemKind,
        image: ImageId,
        can_dispose: bool,
    ) -> Self {
        Self {
            bounds,
            span_size,
            span_index,
            span_group_index,
            image: Some(image),
            can_dispose,
            item_kind,
            layout_position,
            node: None,
        }
    }

    /// Value synthesized by reconciliation. Carries no image, owns
    /// nothing, and never binds a node.
    pub fn calculated(
        layout_position: i32,
        bounds: CellBounds,
        span_size: i32,
        span_index: i32,
        span_group_index: i32,
        item_kind: ItemKind,
    ) -> Self {
        Self {
            bounds,
            span_size,
            span_index,
            span_group_index,
            image: None,
            can_dispose: false,
            item_kind,
            layout_position,
            node: None,
        }
    }

    pub fn bounds(&self) -> CellBounds {
        self.bounds
    }

    pub fn width(&self) -> f32 {
        self.bounds.width()
    }

    pub fn height(&self) -> f32 {
        self.bounds.height()
    }

    pub fn span_size(&self) -> i32 {
        self.span_size
    }

    pub fn span_index(&self) -> i32 {
        self.span_index
    }

    pub fn span_group_index(&self) -> i32 {
        self.span_group_index
    }

    pub fn image(&self) -> Option<ImageId> {
        self.image
    }

    /// Whether this value holds disposal rights for its image.
    pub fn can_dispose(&self) -> bool {
        self.can_dispose
    }

    pub fn item_kind(&self) -> ItemKind {
        self.item_kind
    }

    pub fn layout_position(&self) -> i32 {
        self.layout_position
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// True for values synthesized by reconciliation rather than
    /// captured from a child.
    pub fn is_calculated(&self) -> bool {
        self.image.is_none() && self.node.is_none()
    }

    /// Binds the live node this value stands in for, at most once.
    ///
    /// # Panics
    ///
    /// Panics when called on a calculated value or called twice; both
    /// indicate a capture pipeline bug in the caller.
    pub fn attach_node(&mut self, node: NodeId) {
        assert!(
            !self.is_calculated(),
            "calculated values have no live node to bind"
        );
        assert!(self.node.is_none(), "node already bound");
        self.node = Some(node);
    }

    /// Copy of this value with disposal rights stripped, used when the
    /// rights move to the other side of the transition.
    pub(crate) fn without_dispose_rights(&self) -> SpanValue {
        SpanValue {
            bounds: self.bounds,
            span_size: self.span_size,
            span_index: self.span_index,
            span_group_index: self.span_group_index,
            image: self.image,
            can_dispose: false,
            item_kind: self.item_kind,
            layout_position: self.layout_position,
            node: self.node,
        }
    }
}
