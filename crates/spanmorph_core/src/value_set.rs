//! Sparse per-position value storage for one transition side.

use rustc_hash::FxHashMap;

use crate::host::HostGrid;
use crate::value::{CapturedImage, SpanValue};

/// The values captured (and later synthesized) for one side of a
/// transition, keyed by layout position.
///
/// A set owns the disposal rights its values carry. Rights leave the
/// set exactly once: either through [`reuse_image`](Self::reuse_image)
/// to the opposite side, or through [`dispose`](Self::dispose) back to
/// the host. A disposed set stays usable but is permanently empty.
#[derive(Debug, Default)]
pub struct SpanValueSet {
    values: Option<FxHashMap<i32, SpanValue>>,
}

impl SpanValueSet {
    pub fn new() -> Self {
        Self {
            values: Some(FxHashMap::default()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Some(FxHashMap::with_capacity_and_hasher(
                capacity,
                Default::default(),
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.values.as_ref().map_or(0, FxHashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_disposed(&self) -> bool {
        self.values.is_none()
    }

    /// Stores `value` under its layout position, replacing any previous
    /// value there. No-op on a disposed set.
    pub fn insert(&mut self, value: SpanValue) {
        if let Some(values) = &mut self.values {
            values.insert(value.layout_position(), value);
        }
    }

    pub fn get(&self, layout_position: i32) -> Option<&SpanValue> {
        self.values.as_ref()?.get(&layout_position)
    }

    /// Smallest and largest stored layout position.
    pub fn position_range(&self) -> Option<(i32, i32)> {
        let values = self.values.as_ref()?;
        let mut positions = values.keys();
        let first = *positions.next()?;
        let (min, max) = positions.fold((first, first), |(min, max), &p| {
            (min.min(p), max.max(p))
        });
        Some((min, max))
    }

    /// Hands the image captured at `layout_position` to the caller,
    /// transferring disposal rights with it.
    ///
    /// The remaining value keeps drawing the image but no longer
    /// releases it, so an image shared across both sides of a
    /// transition is still freed exactly once.
    pub fn reuse_image(&mut self, layout_position: i32) -> Option<CapturedImage> {
        let values = self.values.as_mut()?;
        let value = values.get(&layout_position)?;
        let image = value.image()?;
        let can_dispose = value.can_dispose();
        if can_dispose {
            let stripped = value.without_dispose_rights();
            values.insert(layout_position, stripped);
        }
        Some(CapturedImage { image, can_dispose })
    }

    /// Releases every owned image back to the host and empties the set.
    /// Subsequent calls are no-ops.
    pub fn dispose(&mut self, host: &mut dyn HostGrid) {
        let Some(values) = self.values.take() else {
            return;
        };
        for value in values.values() {
            if value.can_dispose() {
                if let Some(image) = value.image() {
                    host.release_image(image);
                }
            }
        }
    }

    /// Drains the set into a plain vector, unsorted. Empty when the set
    /// was disposed.
    pub(crate) fn into_values(self) -> Vec<SpanValue> {
        match self.values {
            Some(values) => values.into_values().collect(),
            None => Vec::new(),
        }
    }
}
