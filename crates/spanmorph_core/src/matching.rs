//! Reconciliation of the two capture sets around a span-count change.
//!
//! Before and after captures rarely cover the same items: changing the
//! span count reflows the grid, so positions visible on one side may be
//! off-screen on the other. Reconciliation fills the smaller side with
//! calculated values until both sides cover the same position range and
//! pair up one to one.
//!
//! A fill pass runs in phases:
//!
//! 1. **Setup**: resolve both sides' position ranges, collect intrinsic
//!    child sizes per item kind from the filled side, and infer the
//!    inter-item spacing from captured neighbor pairs.
//! 2. **Fill**: walk outward from the filled side's captured range,
//!    synthesizing each missing cell from its already-placed neighbor
//!    by grid arithmetic.
//!
//! Filling can overshoot: the filled side ends up covering the union of
//! both ranges and may now be the larger one, in which case the roles
//! swap and the other side is filled the same way. The walks never
//! visit positions inside a side's own captured range, so a side with a
//! hole there stays smaller and the match fails.

use rustc_hash::FxHashMap;

use crate::error::{MatchError, Result};
use crate::geometry::CellBounds;
use crate::value::{ItemKind, SpanValue};
use crate::value_set::SpanValueSet;

/// Phases of one fill pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MatchPhase {
    Setup,
    Fill,
    Completed,
}

/// Working state threaded through one fill pass.
struct MatchContext {
    /// Span count of the side being filled; rows wrap against it.
    span_count: i32,
    /// Cursor walking below the filled side's captured range.
    first_position: i32,
    /// Cursor walking above the filled side's captured range.
    last_position: i32,
    /// The source side's position range, the fill target.
    min_position: i32,
    max_position: i32,
    /// Intrinsic child size per item kind; first captured value wins.
    child_sizes: FxHashMap<ItemKind, (f32, f32)>,
    /// Inter-item spacing, resolved during setup.
    spacing_x: Option<f32>,
    spacing_y: Option<f32>,
    phase: MatchPhase,
}

impl MatchContext {
    fn child_width(&self, kind: ItemKind, default: f32) -> f32 {
        self.child_sizes.get(&kind).map_or(default, |size| size.0)
    }

    fn child_height(&self, kind: ItemKind, default: f32) -> f32 {
        self.child_sizes.get(&kind).map_or(default, |size| size.1)
    }

    fn spacing_x(&self) -> f32 {
        self.spacing_x.unwrap_or(0.0)
    }

    fn spacing_y(&self) -> f32 {
        self.spacing_y.unwrap_or(0.0)
    }
}

/// Reconciles `start` and `end` so both sides pair up one to one.
///
/// The smaller side is filled with calculated values over the larger
/// side's range. When the fill leaves it larger instead, the roles swap
/// and the other side is filled the same way. Success always means both
/// sides hold the same number of values; a side that stays smaller
/// after its own fill has a hole inside its captured range, out of the
/// walks' reach, and the match fails.
///
/// On error both sets are left partially filled; callers are expected
/// to dispose them and let the applied layout change stand.
pub fn match_animation_values(
    start: &mut SpanValueSet,
    start_span_count: i32,
    end: &mut SpanValueSet,
    end_span_count: i32,
) -> Result<()> {
    if start.len() == end.len() {
        return Ok(());
    }
    let (mut target, mut target_span, mut source, mut source_span) =
        if start.len() < end.len() {
            (start, start_span_count, end, end_span_count)
        } else {
            (end, end_span_count, start, start_span_count)
        };
    loop {
        if let Err(err) = fill_values(target, target_span, source) {
            tracing::debug!(error = %err, "span value matching failed");
            return Err(err);
        }
        if target.len() == source.len() {
            return Ok(());
        }
        if target.len() < source.len() {
            let err = MatchError::IncompleteFill {
                target: target.len(),
                other: source.len(),
            };
            tracing::debug!(error = %err, "span value matching failed");
            return Err(err);
        }
        (target, source) = (source, target);
        (target_span, source_span) = (source_span, target_span);
    }
}

/// One directional pass: synthesizes values in `target` for every
/// position in `source`'s range that `target` lacks.
fn fill_values(
    target: &mut SpanValueSet,
    span_count: i32,
    source: &SpanValueSet,
) -> Result<()> {
    let mut ctx = setup_pass(target, span_count, source)?;
    fill_missing(&mut ctx, target, source)?;
    debug_assert_eq!(ctx.phase, MatchPhase::Completed);
    Ok(())
}

fn setup_pass(
    target: &SpanValueSet,
    span_count: i32,
    source: &SpanValueSet,
) -> Result<MatchContext> {
    let (target_min, target_max) =
        target.position_range().ok_or(MatchError::EmptyRange)?;
    let (source_min, source_max) =
        source.position_range().ok_or(MatchError::EmptyRange)?;

    let mut ctx = MatchContext {
        span_count,
        first_position: target_min - 1,
        last_position: target_max + 1,
        min_position: source_min,
        max_position: source_max,
        child_sizes: FxHashMap::default(),
        spacing_x: None,
        spacing_y: None,
        phase: MatchPhase::Setup,
    };

    collect_child_sizes(&mut ctx, target);
    infer_spacing(&mut ctx, target);
    infer_spacing(&mut ctx, source);

    if ctx.child_sizes.is_empty() {
        return Err(MatchError::NoSharedValues);
    }
    if ctx.spacing_x.is_none() || ctx.spacing_y.is_none() {
        return Err(MatchError::SpacingUnresolved);
    }
    ctx.phase = MatchPhase::Fill;
    Ok(ctx)
}

/// Records the intrinsic size of each item kind seen among `values`
/// inside the source range.
fn collect_child_sizes(ctx: &mut MatchContext, values: &SpanValueSet) {
    for position in ctx.min_position..=ctx.max_position {
        let Some(value) = values.get(position) else {
            continue;
        };
        if value.is_calculated() {
            continue;
        }
        ctx.child_sizes
            .entry(value.item_kind())
            .or_insert((value.width(), value.height()));
    }
}

/// Infers inter-item spacing from adjacent captured pairs: the
/// horizontal gap between two single-span neighbors in the same row
/// group, and the vertical gap between values in consecutive groups.
fn infer_spacing(ctx: &mut MatchContext, values: &SpanValueSet) {
    if ctx.spacing_x.is_some() && ctx.spacing_y.is_some() {
        return;
    }
    let mut prev: Option<&SpanValue> = None;
    for position in ctx.min_position..=ctx.max_position {
        let Some(value) = values.get(position) else {
            continue;
        };
        if value.is_calculated() {
            continue;
        }
        if let Some(prev) = prev {
            if ctx.spacing_x.is_none()
                && prev.span_size() == 1
                && value.span_size() == 1
                && prev.span_group_index() == value.span_group_index()
            {
                ctx.spacing_x = Some(value.bounds().left - prev.bounds().right);
            }
            if ctx.spacing_y.is_none()
                && value.span_group_index() - prev.span_group_index() == 1
            {
                ctx.spacing_y = Some(value.bounds().top - prev.bounds().bottom);
            }
        }
        if ctx.spacing_x.is_some() && ctx.spacing_y.is_some() {
            break;
        }
        prev = Some(value);
    }
}

fn fill_missing(
    ctx: &mut MatchContext,
    target: &mut SpanValueSet,
    source: &SpanValueSet,
) -> Result<()> {
    debug_assert_eq!(ctx.phase, MatchPhase::Fill);

    // Walk below the captured range. Each synthesized cell is placed
    // relative to its neighbor at position + 1, which is always present
    // by the time it is needed.
    while ctx.first_position >= ctx.min_position {
        let position = ctx.first_position;
        ctx.first_position -= 1;
        if target.get(position).is_some() {
            continue;
        }
        let counterpart = source
            .get(position)
            .ok_or(MatchError::MissingCounterpart { position })?;
        let neighbor = target
            .get(position + 1)
            .ok_or(MatchError::MissingCounterpart { position: position + 1 })?;

        let kind = counterpart.item_kind();
        let child_width = ctx.child_width(kind, counterpart.width());
        let child_height = ctx.child_height(kind, counterpart.height());
        let span_size = counterpart.span_size();

        let neighbor_bounds = neighbor.bounds();
        let (span_index, span_group_index, left, top) =
            if span_size <= neighbor.span_index() {
                // Room to the neighbor's left in the same row group.
                (
                    neighbor.span_index() - span_size,
                    neighbor.span_group_index(),
                    neighbor_bounds.left - neighbor.width() - ctx.spacing_x(),
                    neighbor_bounds.top,
                )
            } else {
                // Flush right in a new row group above.
                let span_index = ctx.span_count - span_size;
                (
                    span_index,
                    neighbor.span_group_index() - 1,
                    span_index as f32 * (ctx.spacing_x() + child_width),
                    neighbor_bounds.top - neighbor.height() - ctx.spacing_y(),
                )
            };

        target.insert(SpanValue::calculated(
            position,
            CellBounds::from_size(left, top, child_width, child_height),
            span_size,
            span_index,
            span_group_index,
            kind,
        ));
    }

    // Walk above the captured range, against the neighbor at
    // position - 1.
    while ctx.last_position <= ctx.max_position {
        let position = ctx.last_position;
        ctx.last_position += 1;
        if target.get(position).is_some() {
            continue;
        }
        let counterpart = source
            .get(position)
            .ok_or(MatchError::MissingCounterpart { position })?;
        let neighbor = target
            .get(position - 1)
            .ok_or(MatchError::MissingCounterpart { position: position - 1 })?;

        let kind = counterpart.item_kind();
        let child_width = ctx.child_width(kind, counterpart.width());
        let child_height = ctx.child_height(kind, counterpart.height());
        let span_size = counterpart.span_size();

        let neighbor_bounds = neighbor.bounds();
        let occupied = neighbor.span_index() + neighbor.span_size();
        let (span_index, span_group_index, left, top) =
            if occupied + span_size <= ctx.span_count {
                // Continues the neighbor's row group.
                (
                    neighbor.span_index() + span_size,
                    neighbor.span_group_index(),
                    neighbor_bounds.left + neighbor.width() + ctx.spacing_x(),
                    neighbor_bounds.top,
                )
            } else {
                // Wraps to the first column of a new row group below.
                (
                    0,
                    neighbor.span_group_index() + 1,
                    0.0,
                    neighbor_bounds.top + neighbor.height() + ctx.spacing_y(),
                )
            };

        target.insert(SpanValue::calculated(
            position,
            CellBounds::from_size(left, top, child_width, child_height),
            span_size,
            span_index,
            span_group_index,
            kind,
        ));
    }

    ctx.phase = MatchPhase::Completed;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ImageId, ItemKind};
    use std::ops::RangeInclusive;

    /// Uniform single-span grid capture: `cell_width` x `cell_height`
    /// cells separated by `gap`, wrapped at `span_count` columns.
    fn grid_values(
        positions: RangeInclusive<i32>,
        span_count: i32,
        cell_width: f32,
        cell_height: f32,
        gap: f32,
    ) -> SpanValueSet {
        let mut set = SpanValueSet::new();
        for position in positions {
            let column = position.rem_euclid(span_count);
            let row = position.div_euclid(span_count);
            let bounds = CellBounds::from_size(
                column as f32 * (cell_width + gap),
                row as f32 * (cell_height + gap),
                cell_width,
                cell_height,
            );
            set.insert(SpanValue::captured(
                position,
                bounds,
                1,
                column,
                row,
                ItemKind(0),
                ImageId(1000 + position as u64),
                true,
            ));
        }
        set
    }

    fn assert_cell(
        set: &SpanValueSet,
        position: i32,
        left: f32,
        top: f32,
        span_index: i32,
        span_group_index: i32,
    ) {
        let value = set.get(position).unwrap_or_else(|| {
            panic!("no value at position {position}")
        });
        assert!(value.is_calculated(), "position {position} not synthesized");
        assert_eq!(value.bounds().left, left, "left at {position}");
        assert_eq!(value.bounds().top, top, "top at {position}");
        assert_eq!(value.span_index(), span_index, "span index at {position}");
        assert_eq!(
            value.span_group_index(),
            span_group_index,
            "group at {position}"
        );
    }

    #[test]
    fn test_fill_ascending_wraps_rows() {
        // Three columns of 100px cells with 10px gaps; the other side
        // saw positions 3..=8 after reflowing to two columns.
        let mut start = grid_values(3..=5, 3, 100.0, 100.0, 10.0);
        let mut end = grid_values(3..=8, 2, 155.0, 100.0, 10.0);

        match_animation_values(&mut start, 3, &mut end, 2).unwrap();

        assert_eq!(start.len(), 6);
        assert_eq!(end.len(), 6);
        assert_eq!(start.position_range(), Some((3, 8)));

        assert_cell(&start, 6, 0.0, 220.0, 0, 2);
        assert_cell(&start, 7, 110.0, 220.0, 1, 2);
        assert_cell(&start, 8, 220.0, 220.0, 2, 2);

        // Synthesized cells take the filled side's intrinsic size, not
        // the counterpart's.
        assert_eq!(start.get(6).unwrap().width(), 100.0);
        assert_eq!(start.get(6).unwrap().height(), 100.0);
    }

    #[test]
    fn test_fill_descending_then_swaps_roles() {
        // The smaller side scrolled further down: filling it downward
        // overshoots the other side's range, so the roles swap and the
        // other side gains the tail position.
        let mut start = grid_values(4..=9, 2, 155.0, 100.0, 10.0);
        let mut end = grid_values(0..=8, 3, 100.0, 100.0, 10.0);

        match_animation_values(&mut start, 2, &mut end, 3).unwrap();

        assert_eq!(start.len(), 10);
        assert_eq!(end.len(), 10);

        assert_cell(&start, 3, 165.0, 110.0, 1, 1);
        assert_cell(&start, 2, 0.0, 110.0, 0, 1);
        assert_cell(&start, 1, 165.0, 0.0, 1, 0);
        assert_cell(&start, 0, 0.0, 0.0, 0, 0);

        // The swap filled position 9 into the other side.
        assert_cell(&end, 9, 0.0, 330.0, 0, 3);
    }

    #[test]
    fn test_equal_sizes_left_untouched() {
        let mut start = grid_values(0..=5, 3, 100.0, 100.0, 10.0);
        let mut end = grid_values(0..=5, 2, 155.0, 100.0, 10.0);

        match_animation_values(&mut start, 3, &mut end, 2).unwrap();

        assert_eq!(start.len(), 6);
        assert_eq!(end.len(), 6);
        assert!(start.get(0).unwrap().image().is_some());
    }

    #[test]
    fn test_matching_twice_is_stable() {
        let mut start = grid_values(3..=5, 3, 100.0, 100.0, 10.0);
        let mut end = grid_values(3..=8, 2, 155.0, 100.0, 10.0);

        match_animation_values(&mut start, 3, &mut end, 2).unwrap();
        match_animation_values(&mut start, 3, &mut end, 2).unwrap();

        assert_eq!(start.len(), 6);
        assert_eq!(end.len(), 6);
    }

    #[test]
    fn test_empty_side_fails() {
        let mut start = SpanValueSet::new();
        let mut end = grid_values(0..=3, 2, 155.0, 100.0, 10.0);

        let err = match_animation_values(&mut start, 3, &mut end, 2);
        assert_eq!(err, Err(MatchError::EmptyRange));
    }

    #[test]
    fn test_disjoint_ranges_fail() {
        // No filled-side value inside the source range means no
        // intrinsic size to synthesize from.
        let mut start = grid_values(10..=11, 3, 100.0, 100.0, 10.0);
        let mut end = grid_values(0..=4, 2, 155.0, 100.0, 10.0);

        let err = match_animation_values(&mut start, 3, &mut end, 2);
        assert_eq!(err, Err(MatchError::NoSharedValues));
    }

    #[test]
    fn test_single_row_on_both_sides_fails() {
        // Neither side spans two row groups, so the vertical gap is
        // unknowable.
        let mut start = grid_values(0..=1, 3, 100.0, 100.0, 10.0);
        let mut end = grid_values(0..=2, 6, 50.0, 100.0, 10.0);

        let err = match_animation_values(&mut start, 3, &mut end, 6);
        assert_eq!(err, Err(MatchError::SpacingUnresolved));
    }

    #[test]
    fn test_spacing_inferred_from_either_side() {
        // The filled side shows a single row; the other side has the
        // row break needed for vertical spacing.
        let mut start = grid_values(0..=2, 3, 100.0, 100.0, 10.0);
        let mut end = grid_values(0..=5, 2, 155.0, 100.0, 10.0);

        match_animation_values(&mut start, 3, &mut end, 2).unwrap();
        assert_eq!(start.len(), 6);
        assert_cell(&start, 3, 0.0, 110.0, 0, 1);
    }

    #[test]
    fn test_hole_in_source_fails() {
        let mut start = grid_values(5..=5, 2, 155.0, 100.0, 10.0);
        let end = grid_values(0..=5, 3, 100.0, 100.0, 10.0);
        // Position 3 vanished from the end side.
        let mut holed = SpanValueSet::new();
        for position in [0, 1, 2, 4, 5] {
            let value = end.get(position).unwrap();
            holed.insert(SpanValue::captured(
                position,
                value.bounds(),
                value.span_size(),
                value.span_index(),
                value.span_group_index(),
                value.item_kind(),
                value.image().unwrap(),
                false,
            ));
        }

        let err = match_animation_values(&mut start, 2, &mut holed, 3);
        assert_eq!(err, Err(MatchError::MissingCounterpart { position: 3 }));
    }

    #[test]
    fn test_hole_in_filled_side_fails() {
        // The capture skipped position 5, so the smaller side has a gap
        // inside its own range that the outward walks never visit. Both
        // sides must not pass as matched while their sizes differ.
        let donor = grid_values(3..=8, 2, 155.0, 100.0, 10.0);
        let mut start = SpanValueSet::new();
        for position in [3, 4, 6, 7, 8] {
            let value = donor.get(position).unwrap();
            start.insert(SpanValue::captured(
                position,
                value.bounds(),
                value.span_size(),
                value.span_index(),
                value.span_group_index(),
                value.item_kind(),
                value.image().unwrap(),
                false,
            ));
        }
        let mut end = grid_values(3..=8, 3, 100.0, 100.0, 10.0);

        let err = match_animation_values(&mut start, 2, &mut end, 3);
        assert_eq!(
            err,
            Err(MatchError::IncompleteFill { target: 5, other: 6 })
        );
        assert_eq!(start.len(), 5);
    }
}
