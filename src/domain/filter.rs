//! Filter engine: maps a [`FilterKind`] and a point collection to a subset.
//!
//! Filtering is relative to a reference instant supplied by the caller, so the
//! same inputs always produce the same output.

use super::kinds::FilterKind;
use super::point::Point;
use chrono::{DateTime, Utc};

/// Returns whether `point` passes `kind` at instant `now`.
///
/// - `Future`: starts after `now`
/// - `Present`: started at or before `now` and ends at or after it
/// - `Past`: ended before `now`
#[must_use]
pub fn matches(kind: FilterKind, point: &Point, now: DateTime<Utc>) -> bool {
    match kind {
        FilterKind::Everything => true,
        FilterKind::Future => point.date_from > now,
        FilterKind::Present => point.date_from <= now && point.date_to >= now,
        FilterKind::Past => point.date_to < now,
    }
}

/// Applies `kind` to `points`, preserving input order.
#[must_use]
pub fn apply(kind: FilterKind, points: &[Point], now: DateTime<Utc>) -> Vec<Point> {
    points
        .iter()
        .filter(|point| matches(kind, point, now))
        .cloned()
        .collect()
}
