//! View model types representing the rendered board.
//!
//! A [`BoardViewModel`] is an immutable snapshot computed by
//! [`Board::view_model`](crate::app::Board::view_model). It contains only
//! display-ready data; the host decides how to draw it.
//!
//! # Example
//!
//! ```rust
//! use tripline::app::blocker::Indicator;
//! use tripline::ui::viewmodel::{BoardViewModel, BodyView};
//!
//! let vm = BoardViewModel {
//!     trip_info: None,
//!     sort_bar: None,
//!     body: BodyView::Loading,
//!     draft: None,
//!     progress: Indicator::Hidden,
//! };
//! assert!(vm.rows().is_empty());
//! ```

use crate::app::blocker::Indicator;
use crate::app::modes::{DraftState, HandleState};
use crate::app::registry::PointHandle;
use crate::domain::{
    find_destination, selected_offers, Destination, FilterKind, OfferCatalog, PointId, PointType,
    SortKind,
};
use chrono::{DateTime, TimeDelta, Utc};

/// Complete board snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardViewModel {
    /// Route, dates, and cost of the visible points. `None` when nothing is listed.
    pub trip_info: Option<TripInfo>,

    /// Sort columns. `None` while loading and once detached.
    pub sort_bar: Option<SortBar>,

    pub body: BodyView,

    /// State of the creation form, when open.
    pub draft: Option<DraftState>,

    /// Whether a progress indicator should cover the board.
    pub progress: Indicator,
}

impl BoardViewModel {
    /// Listed rows, empty unless the body is a list.
    #[must_use]
    pub fn rows(&self) -> &[PointRow] {
        match &self.body {
            BodyView::Points(rows) => rows,
            BodyView::Loading | BodyView::Detached | BodyView::Empty(_) => &[],
        }
    }
}

/// Main area of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    Loading,
    /// The board was torn down.
    Detached,
    Empty(EmptyState),
    Points(Vec<PointRow>),
}

/// Placeholder shown when the active filter leaves nothing visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub filter: FilterKind,
    pub message: String,
}

impl EmptyState {
    #[must_use]
    pub fn for_filter(filter: FilterKind) -> Self {
        Self {
            filter,
            message: filter.empty_message().to_string(),
        }
    }
}

/// One sort bar column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortColumn {
    pub kind: SortKind,
    pub is_active: bool,
    pub is_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortBar {
    pub columns: Vec<SortColumn>,
}

impl SortBar {
    #[must_use]
    pub fn new(active: SortKind) -> Self {
        Self {
            columns: SortKind::ALL
                .into_iter()
                .map(|kind| SortColumn {
                    kind,
                    is_active: kind == active,
                    is_enabled: kind.is_selectable(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<SortKind> {
        self.columns.iter().find(|column| column.is_active).map(|column| column.kind)
    }
}

/// A selected offer as shown on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferLine {
    pub title: String,
    pub price: u32,
}

/// Display data for one point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointRow {
    pub id: PointId,
    pub kind: PointType,
    /// Destination name, empty if the destination is unknown.
    pub destination: String,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub duration: TimeDelta,
    pub base_price: u32,
    pub offers: Vec<OfferLine>,
    pub is_favorite: bool,
    pub state: HandleState,
}

impl PointRow {
    /// Resolves a handle's point against the reference data.
    #[must_use]
    pub fn build(handle: &PointHandle, destinations: &[Destination], catalogs: &[OfferCatalog]) -> Self {
        let point = handle.point();
        let destination = find_destination(destinations, &point.destination).map_or_else(
            || {
                tracing::warn!(point_id = %point.id, destination = %point.destination, "unknown destination");
                String::new()
            },
            |destination| destination.name.clone(),
        );

        Self {
            id: point.id.clone(),
            kind: point.kind,
            destination,
            date_from: point.date_from,
            date_to: point.date_to,
            duration: point.duration(),
            base_price: point.base_price,
            offers: selected_offers(catalogs, point)
                .into_iter()
                .map(|offer| OfferLine {
                    title: offer.title.clone(),
                    price: offer.price,
                })
                .collect(),
            is_favorite: point.is_favorite,
            state: handle.state(),
        }
    }

    /// Base price plus the selected offers.
    #[must_use]
    pub fn total_price(&self) -> u64 {
        u64::from(self.base_price) + self.offers.iter().map(|offer| u64::from(offer.price)).sum::<u64>()
    }
}

/// Trip summary shown above the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripInfo {
    /// Destination names in list order.
    pub route: Vec<String>,
    pub starts: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    pub total_cost: u64,
}

impl TripInfo {
    /// Summarizes listed rows. Returns `None` for an empty list.
    #[must_use]
    pub fn summarize(rows: &[PointRow]) -> Option<Self> {
        let starts = rows.iter().map(|row| row.date_from).min()?;
        let ends = rows.iter().map(|row| row.date_to).max()?;

        Some(Self {
            route: rows.iter().map(|row| row.destination.clone()).collect(),
            starts,
            ends,
            total_cost: rows.iter().map(PointRow::total_price).sum(),
        })
    }

    /// Route title; more than three stops collapse to first and last.
    #[must_use]
    pub fn title(&self) -> String {
        match self.route.as_slice() {
            [first, _, _, _, ..] => {
                let last = self.route.last().map_or("", String::as_str);
                format!("{first} - ... - {last}")
            }
            stops => stops.join(" - "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(destination: &str, day: u32, base: u32, offers: &[u32]) -> PointRow {
        let from = Utc.with_ymd_and_hms(2026, 7, day, 9, 0, 0).unwrap();
        PointRow {
            id: PointId::new(destination),
            kind: PointType::Drive,
            destination: destination.to_string(),
            date_from: from,
            date_to: from + TimeDelta::hours(2),
            duration: TimeDelta::hours(2),
            base_price: base,
            offers: offers
                .iter()
                .map(|price| OfferLine { title: "x".into(), price: *price })
                .collect(),
            is_favorite: false,
            state: HandleState::Viewing,
        }
    }

    #[test]
    fn trip_info_sums_base_and_offer_prices() {
        let rows = vec![row("Amsterdam", 3, 100, &[20, 5]), row("Geneva", 1, 50, &[])];
        let info = TripInfo::summarize(&rows).unwrap();
        assert_eq!(info.total_cost, 175);
        assert_eq!(info.starts, rows[1].date_from);
        assert_eq!(info.ends, rows[0].date_to);
        assert_eq!(info.title(), "Amsterdam - Geneva");
    }

    #[test]
    fn long_routes_collapse() {
        let rows: Vec<_> = ["A", "B", "C", "D"].iter().map(|d| row(d, 1, 0, &[])).collect();
        assert_eq!(TripInfo::summarize(&rows).unwrap().title(), "A - ... - D");
        assert!(TripInfo::summarize(&[]).is_none());
    }

    #[test]
    fn sort_bar_marks_active_and_disabled_columns() {
        let bar = SortBar::new(SortKind::Price);
        assert_eq!(bar.active(), Some(SortKind::Price));
        let disabled: Vec<_> = bar.columns.iter().filter(|c| !c.is_enabled).map(|c| c.kind).collect();
        assert_eq!(disabled, vec![SortKind::Event, SortKind::Offers]);
    }
}
