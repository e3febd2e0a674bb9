//! Placement validation and peg-grid snapping.
//!
//! Items anchor their footprint corner to the corner of a peg hole. A
//! placement is valid when the footprint stays inside the wall's effective
//! bounds and does not overlap any other item on the wall.

use crate::furniture::{FurnitureSpec, InstanceId, PlacedItem};
use crate::grid::{PEG_HOLE_SIZE, PegGrid, WallSpec, compute_grid};
use kurbo::{Point, Rect};

/// Smallest edge tolerance granted to an item, in inches.
pub const MIN_EDGE_TOLERANCE: f64 = 0.5;

/// Largest edge tolerance granted to an item, in inches.
pub const MAX_EDGE_TOLERANCE: f64 = 2.0;

/// Outcome of a placement that always produces a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Anchor corner of the item, in wall-local inches.
    pub position: Point,
    /// The position overlaps another item or leaves the wall.
    pub overlapping: bool,
}

/// The rectangle spanned by the peg holes, from the outer edge of the first
/// hole to the outer edge of the last one. `None` when the grid is empty.
pub fn effective_bounds(grid: &PegGrid) -> Option<Rect> {
    let (first_x, last_x) = (grid.xs.first()?, grid.xs.last()?);
    let (first_y, last_y) = (grid.ys.first()?, grid.ys.last()?);
    Some(Rect::new(
        first_x - PEG_HOLE_SIZE.width / 2.0,
        first_y - PEG_HOLE_SIZE.height / 2.0,
        last_x + PEG_HOLE_SIZE.width / 2.0,
        last_y + PEG_HOLE_SIZE.height / 2.0,
    ))
}

/// Extra room granted around the effective bounds for an item of the given
/// width. Items much narrower than the grid get the full tolerance, items
/// close to the grid width get the minimum.
pub fn edge_tolerance(bounds: Rect, item_width: f64) -> f64 {
    ((bounds.width() - item_width) / 4.0).clamp(MIN_EDGE_TOLERANCE, MAX_EDGE_TOLERANCE)
}

/// Region an item of the given width must stay inside.
pub fn placement_bounds(grid: &PegGrid, item_width: f64) -> Option<Rect> {
    let bounds = effective_bounds(grid)?;
    let tolerance = edge_tolerance(bounds, item_width);
    Some(bounds.inflate(tolerance, tolerance))
}

/// Separating-axis test. Rectangles that only share an edge do not overlap.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    !(a.x1 <= b.x0 || b.x1 <= a.x0 || a.y1 <= b.y0 || b.y1 <= a.y0)
}

fn contains_rect(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.x1 <= outer.x1 && inner.y0 >= outer.y0 && inner.y1 <= outer.y1
}

/// Check a footprint against precomputed bounds and the other items.
fn fits(
    spec: &FurnitureSpec,
    origin: Point,
    bounds: Option<Rect>,
    others: &[PlacedItem],
    skip: Option<&InstanceId>,
) -> bool {
    let Some(bounds) = bounds else {
        return false;
    };
    let rect = spec.rect_at(origin);
    if !contains_rect(bounds, rect) {
        return false;
    }
    others
        .iter()
        .filter(|other| Some(&other.instance_id) != skip)
        .all(|other| !rects_overlap(rect, other.rect()))
}

/// Whether `candidate` is in bounds and clear of every other item.
///
/// Entries of `others` sharing the candidate's instance id are ignored, so
/// the full item list can be passed while dragging.
pub fn is_valid(candidate: &PlacedItem, wall: &WallSpec, others: &[PlacedItem]) -> bool {
    let grid = compute_grid(wall);
    let bounds = placement_bounds(&grid, candidate.spec.width_inches());
    fits(
        &candidate.spec,
        candidate.origin(),
        bounds,
        others,
        Some(&candidate.instance_id),
    )
}

/// Every grid-aligned anchor where the item's span fits, ascending by
/// column and then by row.
pub fn anchors<'a>(
    spec: &FurnitureSpec,
    grid: &'a PegGrid,
) -> impl Iterator<Item = Point> + use<'a> {
    let columns = grid
        .xs
        .len()
        .saturating_sub(spec.peg_span.horizontal.saturating_sub(1) as usize);
    let rows = grid
        .ys
        .len()
        .saturating_sub(spec.peg_span.vertical.saturating_sub(1) as usize);

    grid.xs[..columns].iter().flat_map(move |&x| {
        grid.ys[..rows].iter().map(move |&y| {
            Point::new(
                x - PEG_HOLE_SIZE.width / 2.0,
                y - PEG_HOLE_SIZE.height / 2.0,
            )
        })
    })
}

/// Find the valid anchor closest to `target` (wall-local inches).
///
/// `others` must not contain the item being placed. Ties go to the anchor
/// found first. Returns `None` when no anchor is valid.
pub fn solve_position(
    spec: &FurnitureSpec,
    target: Point,
    wall: &WallSpec,
    others: &[PlacedItem],
) -> Option<Point> {
    let grid = compute_grid(wall);
    let bounds = placement_bounds(&grid, spec.width_inches());

    let mut best: Option<(Point, f64)> = None;
    for anchor in anchors(spec, &grid) {
        if !fits(spec, anchor, bounds, others, None) {
            continue;
        }
        let distance = anchor.distance(target);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((anchor, distance));
        }
    }
    best.map(|(anchor, _)| anchor)
}

/// Deterministic position used when nothing valid is left: the top-right
/// most in-bounds anchor, ignoring other items.
pub fn fallback_position(spec: &FurnitureSpec, wall: &WallSpec) -> Point {
    let grid = compute_grid(wall);
    let bounds = placement_bounds(&grid, spec.width_inches());
    let candidates: Vec<Point> = anchors(spec, &grid).collect();

    candidates
        .iter()
        .rev()
        .find(|&&anchor| fits(spec, anchor, bounds, &[], None))
        .or(candidates.last())
        .copied()
        .unwrap_or(Point::ZERO)
}

/// Snap to the closest valid anchor, falling back to a flagged overlapping
/// position when the wall is full or too small.
pub fn place(
    spec: &FurnitureSpec,
    target: Point,
    wall: &WallSpec,
    others: &[PlacedItem],
) -> Placement {
    if let Some(position) = solve_position(spec, target, wall, others) {
        return Placement {
            position,
            overlapping: false,
        };
    }

    let position = fallback_position(spec, wall);
    let grid = compute_grid(wall);
    let bounds = placement_bounds(&grid, spec.width_inches());
    log::debug!(
        "No valid anchor for {} on {}\" x {}\" wall, falling back to ({}, {})",
        spec.name,
        wall.width_inches,
        wall.height_inches,
        position.x,
        position.y
    );
    Placement {
        position,
        overlapping: !fits(spec, position, bounds, others, None),
    }
}

/// First valid anchor scanning rows bottom to top, each row left to right.
/// Used as the default target for newly added items.
pub fn first_open_anchor(
    spec: &FurnitureSpec,
    wall: &WallSpec,
    others: &[PlacedItem],
) -> Option<Point> {
    let grid = compute_grid(wall);
    let bounds = placement_bounds(&grid, spec.width_inches());
    let mut candidates: Vec<Point> = anchors(spec, &grid).collect();
    candidates.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
    candidates
        .into_iter()
        .find(|&anchor| fits(spec, anchor, bounds, others, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::furniture::PegSpan;
    use crate::furniture::test_support::{placed, spec};

    fn wall_56x52() -> WallSpec {
        WallSpec::new(56.0, 52.0).unwrap()
    }

    #[test]
    fn test_effective_bounds() {
        let grid = compute_grid(&WallSpec::from_hole_counts(2, 2));
        assert_eq!(grid.xs, vec![-4.0, 4.0]);
        assert_eq!(grid.ys, vec![5.0, 11.0]);
        assert_eq!(
            effective_bounds(&grid),
            Some(Rect::new(-4.5, 3.5, 4.5, 12.5))
        );
        assert_eq!(effective_bounds(&PegGrid::default()), None);
    }

    #[test]
    fn test_edge_tolerance_clamped() {
        let bounds = Rect::new(0.0, 0.0, 41.0, 10.0);
        assert_eq!(edge_tolerance(bounds, 1.0), MAX_EDGE_TOLERANCE);
        assert_eq!(edge_tolerance(bounds, 37.0), 1.0);
        assert_eq!(edge_tolerance(bounds, 60.0), MIN_EDGE_TOLERANCE);
    }

    #[test]
    fn test_rects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rects_overlap(a, Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert!(rects_overlap(a, Rect::new(2.0, 2.0, 3.0, 3.0)));
        // Shared edges are fine
        assert!(!rects_overlap(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!rects_overlap(a, Rect::new(0.0, 10.0, 10.0, 20.0)));
        assert!(!rects_overlap(a, Rect::new(-20.0, -20.0, -10.0, -10.0)));
    }

    #[test]
    fn test_anchor_enumeration_respects_span() {
        let grid = compute_grid(&wall_56x52());
        assert_eq!(grid.xs.len(), 6);
        assert_eq!(grid.ys.len(), 8);
        assert_eq!(anchors(&spec(PegSpan::new(1, 1), 4.0), &grid).count(), 48);
        assert_eq!(anchors(&spec(PegSpan::new(2, 2), 10.0), &grid).count(), 5 * 7);
        assert_eq!(anchors(&spec(PegSpan::new(9, 1), 10.0), &grid).count(), 0);

        let first = anchors(&spec(PegSpan::new(1, 1), 4.0), &grid).next().unwrap();
        assert_eq!(first, Point::new(grid.xs[0] - 0.5, grid.ys[0] - 1.5));
    }

    #[test]
    fn test_own_position_is_valid_against_self() {
        let wall = wall_56x52();
        let cubby = spec(PegSpan::new(2, 2), 10.0);
        let position = solve_position(&cubby, Point::new(0.0, 20.0), &wall, &[]).unwrap();
        let item = placed("a", cubby, position.x, position.y);
        assert!(is_valid(&item, &wall, std::slice::from_ref(&item)));
    }

    #[test]
    fn test_single_hole_item_snaps_near_centre() {
        let wall = wall_56x52();
        let hook = spec(PegSpan::new(1, 1), 8.0);
        let target = Point::new(0.0, wall.height_inches / 2.0);

        let position = solve_position(&hook, target, &wall, &[]).unwrap();
        let grid = compute_grid(&wall);
        assert!(anchors(&hook, &grid).any(|anchor| anchor == position));
        assert_eq!(position, Point::new(3.5, 27.5));
        assert!(is_valid(&placed("hook", hook, position.x, position.y), &wall, &[]));
    }

    #[test]
    fn test_overlapping_requests_get_distinct_anchors() {
        let wall = wall_56x52();
        let cubby = spec(PegSpan::new(2, 2), 10.0);
        let target = Point::new(-4.5, 15.5);

        let first = solve_position(&cubby, target, &wall, &[]).unwrap();
        let first_item = placed("a", cubby.clone(), first.x, first.y);
        let second =
            solve_position(&cubby, target, &wall, std::slice::from_ref(&first_item)).unwrap();
        let second_item = placed("b", cubby, second.x, second.y);

        assert_ne!(first, second);
        assert!(!rects_overlap(first_item.rect(), second_item.rect()));
        assert!(is_valid(&second_item, &wall, &[first_item]));
    }

    #[test]
    fn test_far_target_clamps_into_bounds() {
        let wall = wall_56x52();
        let cubby = spec(PegSpan::new(2, 1), 10.0);
        let bounds = placement_bounds(&compute_grid(&wall), cubby.width_inches()).unwrap();

        for target in [
            Point::new(wall.width_inches * 10.0, wall.height_inches * 10.0),
            Point::new(-wall.width_inches * 10.0, -wall.height_inches * 10.0),
        ] {
            let position = solve_position(&cubby, target, &wall, &[]).unwrap();
            let item = placed("a", cubby.clone(), position.x, position.y);
            assert!(contains_rect(bounds, item.rect()));
            assert!(is_valid(&item, &wall, &[]));
        }
    }

    #[test]
    fn test_ties_go_to_first_anchor() {
        let wall = wall_56x52();
        let hook = spec(PegSpan::new(1, 1), 4.0);
        // Halfway between the anchors at x = -4.5 and x = 3.5
        let position = solve_position(&hook, Point::new(-0.5, 27.5), &wall, &[]).unwrap();
        assert_eq!(position, Point::new(-4.5, 27.5));
    }

    #[test]
    fn test_is_valid_rejects_out_of_bounds() {
        let wall = wall_56x52();
        let cubby = spec(PegSpan::new(2, 2), 10.0);
        assert!(!is_valid(&placed("a", cubby.clone(), 40.0, 10.0), &wall, &[]));
        assert!(!is_valid(&placed("a", cubby.clone(), 0.0, -10.0), &wall, &[]));
        assert!(!is_valid(&placed("a", cubby, 0.0, 45.0), &wall, &[]));
    }

    #[test]
    fn test_is_valid_rejects_overlap_with_other_item() {
        let wall = wall_56x52();
        let cubby = spec(PegSpan::new(2, 2), 10.0);
        let other = placed("other", cubby.clone(), -4.5, 15.5);
        let overlapping = placed("a", cubby.clone(), 3.5, 15.5);
        assert!(!is_valid(&overlapping, &wall, std::slice::from_ref(&other)));
        assert!(is_valid(&placed("a", cubby, 11.5, 15.5), &wall, &[other]));
    }

    #[test]
    fn test_wide_items_cannot_use_last_columns() {
        let wall = wall_56x52();
        let grid = compute_grid(&wall);
        let table = spec(PegSpan::new(4, 1), 10.0);
        let position = solve_position(&table, Point::new(100.0, 10.0), &wall, &[]).unwrap();
        // The last anchor column would overhang the grid by 3" (> 2" tolerance)
        assert!(position.x < grid.xs[2] - 0.5);
    }

    #[test]
    fn test_full_wall_falls_back_with_overlap() {
        let wall = WallSpec::from_hole_counts(2, 2);
        let hook = spec(PegSpan::new(1, 1), 4.0);

        let mut items = Vec::new();
        for n in 0..4 {
            let placement = place(&hook, Point::ZERO, &wall, &items);
            assert!(!placement.overlapping);
            let Point { x, y } = placement.position;
            items.push(placed(&format!("hook-{n}"), hook.clone(), x, y));
        }

        assert_eq!(solve_position(&hook, Point::ZERO, &wall, &items), None);
        let placement = place(&hook, Point::ZERO, &wall, &items);
        assert!(placement.overlapping);
        assert_eq!(placement.position, Point::new(3.5, 9.5));
        assert_eq!(fallback_position(&hook, &wall), Point::new(3.5, 9.5));
    }

    #[test]
    fn test_degenerate_wall_never_snaps() {
        let wall = WallSpec {
            width_inches: 4.0,
            height_inches: 4.0,
        };
        let hook = spec(PegSpan::new(1, 1), 4.0);
        assert_eq!(solve_position(&hook, Point::ZERO, &wall, &[]), None);
        assert_eq!(first_open_anchor(&hook, &wall, &[]), None);
        assert!(!is_valid(&placed("a", hook.clone(), 0.0, 0.0), &wall, &[]));

        let placement = place(&hook, Point::new(1.0, 1.0), &wall, &[]);
        assert_eq!(placement.position, Point::ZERO);
        assert!(placement.overlapping);
    }

    #[test]
    fn test_first_open_anchor_scans_bottom_row_first() {
        let wall = wall_56x52();
        let cubby = spec(PegSpan::new(2, 2), 10.0);
        let grid = compute_grid(&wall);

        let first = first_open_anchor(&cubby, &wall, &[]).unwrap();
        assert_eq!(first, Point::new(grid.xs[0] - 0.5, grid.ys[0] - 1.5));

        let taken = placed("a", cubby.clone(), first.x, first.y);
        let next = first_open_anchor(&cubby, &wall, &[taken]).unwrap();
        assert_eq!(next.y, first.y);
        assert_eq!(next, Point::new(grid.xs[2] - 0.5, grid.ys[0] - 1.5));
    }
}
