//! spanmorph_core - data model and reconciliation for animated grid
//! span-count transitions
//!
//! A span-count change reflows every visible cell at once. Animating it
//! takes a frozen before picture, a frozen after picture, and a way to
//! pair the two up even though each side saw different items. This
//! crate provides exactly that:
//!
//! - **Snapshot values**: [`SpanValue`] freezes one item's bounds, grid
//!   placement, and captured image; [`SpanValueSet`] stores one side's
//!   values by layout position and owns their image disposal rights.
//! - **Reconciliation**: [`match_animation_values`] fills the smaller
//!   side with synthesized cells until both sides cover the same
//!   position range.
//! - **Draw views**: [`MorphInfo`] freezes a reconciled set in layout
//!   order so the two sides pair index by index.
//! - **Host seams**: [`HostGrid`] and [`MorphPainter`] are the only
//!   surface the embedding toolkit implements; the engine itself owns
//!   no views, no clock, and no canvas.

pub mod error;
pub mod geometry;
pub mod host;
pub mod info;
pub mod matching;
pub mod value;
pub mod value_set;

#[cfg(test)]
pub(crate) mod test_util;

pub use error::MatchError;
pub use geometry::{CellBounds, Size};
pub use host::{GridOrientation, HostGrid, ItemHolder, MorphPainter};
pub use info::MorphInfo;
pub use matching::match_animation_values;
pub use value::{CapturedImage, ImageId, ItemKind, NodeId, SpanValue};
pub use value_set::SpanValueSet;
