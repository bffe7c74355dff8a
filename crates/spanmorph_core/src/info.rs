//! Ordered, draw-ready view over one side's reconciled values.

use crate::host::HostGrid;
use crate::value::SpanValue;
use crate::value_set::SpanValueSet;

/// One transition side, frozen for drawing.
///
/// Built by consuming a reconciled [`SpanValueSet`]; from then on the
/// values are ordered by ascending layout position and never change, so
/// two infos over the same range pair up index by index.
#[derive(Debug)]
pub struct MorphInfo {
    values: Vec<SpanValue>,
    min_layout_position: Option<i32>,
    max_layout_position: Option<i32>,
    disposed: bool,
}

impl MorphInfo {
    pub fn new(source: SpanValueSet) -> Self {
        let range = source.position_range();
        let mut values = source.into_values();
        values.sort_by_key(SpanValue::layout_position);
        Self {
            values,
            min_layout_position: range.map(|(min, _)| min),
            max_layout_position: range.map(|(_, max)| max),
            disposed: false,
        }
    }

    /// Values in ascending layout position order.
    pub fn values(&self) -> &[SpanValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min_layout_position(&self) -> Option<i32> {
        self.min_layout_position
    }

    pub fn max_layout_position(&self) -> Option<i32> {
        self.max_layout_position
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Releases every owned image back to the host. Subsequent calls
    /// are no-ops; the values stay readable but must not be drawn.
    pub fn dispose(&mut self, host: &mut dyn HostGrid) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for value in &self.values {
            if value.can_dispose() {
                if let Some(image) = value.image() {
                    host.release_image(image);
                }
            }
        }
    }
}
