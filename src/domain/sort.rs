//! Sort engine: comparators for the orderings the board supports.

use super::kinds::SortKind;
use super::point::Point;
use std::cmp::Ordering;

/// A point comparator.
pub type Comparator = fn(&Point, &Point) -> Ordering;

/// Earliest start first.
#[must_use]
pub fn by_day(a: &Point, b: &Point) -> Ordering {
    a.date_from.cmp(&b.date_from)
}

/// Longest stay first.
#[must_use]
pub fn by_time(a: &Point, b: &Point) -> Ordering {
    b.duration().cmp(&a.duration())
}

/// Cheapest first.
#[must_use]
pub fn by_price(a: &Point, b: &Point) -> Ordering {
    a.base_price.cmp(&b.base_price)
}

/// Looks up the comparator for `kind`.
///
/// Returns `None` for display-only columns; callers keep the input order then.
#[must_use]
pub fn comparator(kind: SortKind) -> Option<Comparator> {
    match kind {
        SortKind::Day => Some(by_day),
        SortKind::Time => Some(by_time),
        SortKind::Price => Some(by_price),
        SortKind::Event | SortKind::Offers => None,
    }
}
