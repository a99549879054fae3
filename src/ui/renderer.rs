//! Plain-text rendering of a [`BoardViewModel`].
//!
//! The renderer draws the board as lines of text, top to bottom:
//!
//! 1. **Trip info**: route title, date span, total cost
//! 2. **Sort bar**: every column; the active one in brackets, display-only ones in parentheses
//! 3. **Body**: loading message, empty-state placeholder, or one line per point
//! 4. **Overlays**: the creation draft and the progress indicator, when shown
//!
//! # Example
//!
//! ```rust
//! use tripline::app::blocker::Indicator;
//! use tripline::ui::render_text;
//! use tripline::ui::viewmodel::{BoardViewModel, BodyView};
//!
//! let vm = BoardViewModel {
//!     trip_info: None,
//!     sort_bar: None,
//!     body: BodyView::Loading,
//!     draft: None,
//!     progress: Indicator::Hidden,
//! };
//! assert_eq!(render_text(&vm), "Loading...\n");
//! ```

use crate::app::blocker::Indicator;
use crate::app::modes::{DraftState, HandleState};
use crate::ui::viewmodel::{BoardViewModel, BodyView, PointRow, SortBar, TripInfo};
use chrono::TimeDelta;
use std::fmt::Write;

/// Renders the board as text, one trailing newline per line.
#[must_use]
pub fn render_text(vm: &BoardViewModel) -> String {
    let mut out = String::new();

    if let Some(info) = &vm.trip_info {
        render_trip_info(&mut out, info);
    }
    if let Some(bar) = &vm.sort_bar {
        render_sort_bar(&mut out, bar);
    }

    match &vm.body {
        BodyView::Loading => out.push_str("Loading...\n"),
        BodyView::Detached => {}
        BodyView::Empty(empty) => {
            let _ = writeln!(out, "{}", empty.message);
        }
        BodyView::Points(rows) => {
            for row in rows {
                render_row(&mut out, row);
            }
        }
    }

    if let Some(draft) = vm.draft {
        let _ = writeln!(out, "[new event: {}]", draft_label(draft));
    }
    if vm.progress == Indicator::Visible {
        out.push_str("[working...]\n");
    }

    out
}

fn render_trip_info(out: &mut String, info: &TripInfo) {
    let _ = writeln!(out, "{}", info.title());
    let _ = writeln!(
        out,
        "{} - {}  Total: {}",
        info.starts.format("%b %d"),
        info.ends.format("%b %d"),
        info.total_cost
    );
}

fn render_sort_bar(out: &mut String, bar: &SortBar) {
    let columns: Vec<String> = bar
        .columns
        .iter()
        .map(|column| {
            let label = column.kind.key();
            if column.is_active {
                format!("[{label}]")
            } else if column.is_enabled {
                label.to_string()
            } else {
                format!("({label})")
            }
        })
        .collect();
    let _ = writeln!(out, "{}", columns.join(" "));
}

fn render_row(out: &mut String, row: &PointRow) {
    let star = if row.is_favorite { '*' } else { ' ' };
    let _ = write!(
        out,
        "{star} {} {}-{} ({}) {} {}  {}",
        row.date_from.format("%m/%d"),
        row.date_from.format("%H:%M"),
        row.date_to.format("%H:%M"),
        format_duration(row.duration),
        row.kind.label(),
        row.destination,
        row.base_price
    );
    for offer in &row.offers {
        let _ = write!(out, " +{} {}", offer.title, offer.price);
    }
    if let Some(label) = state_label(row.state) {
        let _ = write!(out, " [{label}]");
    }
    out.push('\n');
}

/// `MMm`, `HHh MMm`, or `DDd HHh MMm` depending on length.
#[must_use]
pub fn format_duration(duration: TimeDelta) -> String {
    let minutes = duration.num_minutes().max(0);
    let (days, hours, mins) = (minutes / (24 * 60), minutes / 60 % 24, minutes % 60);

    if days > 0 {
        format!("{days:02}d {hours:02}h {mins:02}m")
    } else if hours > 0 {
        format!("{hours:02}h {mins:02}m")
    } else {
        format!("{mins:02}m")
    }
}

const fn state_label(state: HandleState) -> Option<&'static str> {
    match state {
        HandleState::Viewing => None,
        HandleState::Editing => Some("editing"),
        HandleState::Saving => Some("saving..."),
        HandleState::Deleting => Some("deleting..."),
        HandleState::Aborting => Some("failed"),
    }
}

const fn draft_label(state: DraftState) -> &'static str {
    match state {
        DraftState::Editing => "editing",
        DraftState::Saving => "saving...",
        DraftState::Aborting => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterKind, PointId, PointType, SortKind};
    use crate::ui::viewmodel::{EmptyState, OfferLine};
    use chrono::{TimeZone, Utc};

    fn vm(body: BodyView) -> BoardViewModel {
        BoardViewModel {
            trip_info: None,
            sort_bar: Some(SortBar::new(SortKind::Day)),
            body,
            draft: None,
            progress: Indicator::Hidden,
        }
    }

    #[test]
    fn durations_pick_the_shortest_form() {
        assert_eq!(format_duration(TimeDelta::minutes(5)), "05m");
        assert_eq!(format_duration(TimeDelta::minutes(125)), "02h 05m");
        assert_eq!(format_duration(TimeDelta::minutes(3 * 1440 + 61)), "03d 01h 01m");
        assert_eq!(format_duration(TimeDelta::minutes(-4)), "00m");
    }

    #[test]
    fn detached_board_renders_nothing() {
        let view = BoardViewModel {
            sort_bar: None,
            ..vm(BodyView::Detached)
        };
        assert_eq!(render_text(&view), "");
    }

    #[test]
    fn empty_body_shows_filter_message_under_sort_bar() {
        let text = render_text(&vm(BodyView::Empty(EmptyState::for_filter(FilterKind::Past))));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[day] (event) time price (offers)");
        assert_eq!(lines[1], FilterKind::Past.empty_message());
    }

    #[test]
    fn rows_show_offers_and_in_flight_state() {
        let from = Utc.with_ymd_and_hms(2026, 3, 18, 10, 30, 0).unwrap();
        let row = PointRow {
            id: PointId::new("p1"),
            kind: PointType::Flight,
            destination: "Chamonix".into(),
            date_from: from,
            date_to: from + TimeDelta::minutes(90),
            duration: TimeDelta::minutes(90),
            base_price: 160,
            offers: vec![OfferLine { title: "Add luggage".into(), price: 30 }],
            is_favorite: true,
            state: HandleState::Saving,
        };
        let mut view = vm(BodyView::Points(vec![row]));
        view.progress = Indicator::Visible;

        let text = render_text(&view);
        assert!(text.contains("* 03/18 10:30-12:00 (01h 30m)"));
        assert!(text.contains("Chamonix  160 +Add luggage 30 [saving...]"));
        assert!(text.ends_with("[working...]\n"));
    }
}
