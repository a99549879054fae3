//! View projection: the visible, ordered point list.
//!
//! The projection holds no state. It is recomputed from the raw collection,
//! the active filter, the active sort, and a reference instant every time the
//! board needs it.

use crate::domain::{filter, sort, FilterKind, Point, SortKind};
use chrono::{DateTime, Utc};

/// Filters `points` with `filter_kind`, then orders them with `sort_kind`.
///
/// Sorting is stable, so ties keep store order. A sort kind with no comparator
/// (a display-only column) returns the filtered list in store order.
///
/// # Example
///
/// ```rust
/// use tripline::app::projection::visible_points;
/// use tripline::domain::{FilterKind, SortKind};
///
/// let visible = visible_points(&[], FilterKind::Everything, SortKind::Price, chrono::Utc::now());
/// assert!(visible.is_empty());
/// ```
#[must_use]
pub fn visible_points(
    points: &[Point],
    filter_kind: FilterKind,
    sort_kind: SortKind,
    now: DateTime<Utc>,
) -> Vec<Point> {
    let mut visible = filter::apply(filter_kind, points, now);

    match sort::comparator(sort_kind) {
        Some(compare) => visible.sort_by(compare),
        None => tracing::debug!(%sort_kind, "no comparator for sort, keeping store order"),
    }

    tracing::trace!(
        total = points.len(),
        visible = visible.len(),
        %filter_kind,
        %sort_kind,
        "projection computed"
    );
    visible
}
