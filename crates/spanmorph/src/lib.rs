//! spanmorph - animated span-count transitions for grid views
//!
//! Changing a grid's span count normally snaps every visible cell into
//! its new place in a single frame. spanmorph turns that snap into a
//! continuous transition: it freezes the grid before and after the
//! change, reconciles the two snapshots, and composites interpolated
//! frames between them while the real items stay hidden.
//!
//! # Features
//!
//! - **Driven transitions**: [`SpanMorphController::go`] (or
//!   `increase`/`decrease` over a configured span-count sequence) runs
//!   the full transition on an internal clock.
//! - **Pinch control**: with the scale gesture enabled, a pinch scrubs
//!   the same transition interactively and commits or reverts on
//!   release.
//! - **Headless**: the engine owns no views and no timer. Hosts
//!   implement [`HostGrid`] and [`MorphPainter`], then feed the
//!   controller's frame hooks from their own layout and draw machinery.
//! - **Image discipline**: captured snapshots are reference-handled
//!   through [`ImageId`] and released back to the host exactly once,
//!   even when both transition sides share one image.
//!
//! # Example
//!
//! ```ignore
//! let mut controller = SpanMorphController::new();
//! controller.set_span_counts(&[2, 3, 5]);
//!
//! // From input handling:
//! controller.go(&mut grid, 5);
//!
//! // From the host's frame machinery:
//! controller.on_layout_pass(&mut grid);
//! controller.on_pre_draw(&mut grid);
//! controller.tick(&mut grid, frame_dt);
//! controller.draw(&mut painter);
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod easing;
pub mod gesture;
pub mod runner;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_host;

pub use spanmorph_core::{
    match_animation_values, CapturedImage, CellBounds, GridOrientation,
    HostGrid, ImageId, ItemHolder, ItemKind, MatchError, MorphInfo,
    MorphPainter, NodeId, Size, SpanValue, SpanValueSet,
};

pub use clock::{FinishCallback, MorphClock};
pub use config::AnimationConfig;
pub use controller::SpanMorphController;
pub use easing::Easing;
pub use gesture::{PinchGestureHandler, PinchOutcome, PinchUpdate};
pub use runner::{CaptureProvider, MorphRunner};
pub use surface::{DrawingImageProvider, MorphSurface};
