//! Pixel-space geometry shared by capture, reconciliation, and drawing.

/// Cell bounds in the host view's pixel space, edge form.
///
/// Captured bounds come straight from the host's laid-out children.
/// Synthesized bounds are extrapolated by grid arithmetic and may lie
/// outside the viewport, including at negative coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl CellBounds {
    pub const ZERO: CellBounds = CellBounds::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Interpolates toward `other` at `t`.
    ///
    /// Position and size are lerped independently and the far edges
    /// derived, so a cell both moves and stretches linearly even when
    /// the two sizes differ.
    pub fn lerp(self, other: CellBounds, t: f32) -> CellBounds {
        let left = self.left + (other.left - self.left) * t;
        let top = self.top + (other.top - self.top) * t;
        let width = self.width() + (other.width() - self.width()) * t;
        let height = self.height() + (other.height() - self.height()) * t;
        CellBounds::from_size(left, top, width, height)
    }

    /// True when the cell lies entirely outside a viewport anchored at
    /// the origin.
    pub fn outside(&self, viewport: Size) -> bool {
        self.left > viewport.width
            || self.top > viewport.height
            || self.right < 0.0
            || self.bottom < 0.0
    }
}

/// Viewport dimensions reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
