//! Filter, sort, and update-type enumerations.
//!
//! These small enums select behaviour rather than carry data: a [`FilterKind`]
//! selects a predicate, a [`SortKind`] selects a comparator, and an
//! [`UpdateType`] tells the board how much of its presentation a store change
//! invalidates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which points the board shows, relative to the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    Everything,
    Future,
    Present,
    Past,
}

impl FilterKind {
    pub const ALL: [Self; 4] = [Self::Everything, Self::Future, Self::Present, Self::Past];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Everything => "everything",
            Self::Future => "future",
            Self::Present => "present",
            Self::Past => "past",
        }
    }

    /// Placeholder text shown when this filter leaves nothing visible.
    #[must_use]
    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::Everything => "Click New Event to create your first point",
            Self::Future => "There are no future events now",
            Self::Present => "There are no present events now",
            Self::Past => "There are no past events now",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown filter '{s}'"))
    }
}

/// Ordering of the visible list.
///
/// The sort bar shows five columns. `Event` and `Offers` are display-only
/// columns with no comparator; selecting one leaves the filtered list in store
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    #[default]
    Day,
    Event,
    Time,
    Price,
    Offers,
}

impl SortKind {
    /// Sort bar columns, left to right.
    pub const ALL: [Self; 5] = [Self::Day, Self::Event, Self::Time, Self::Price, Self::Offers];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Event => "event",
            Self::Time => "time",
            Self::Price => "price",
            Self::Offers => "offers",
        }
    }

    /// Whether the sort bar lets the user pick this column.
    #[must_use]
    pub const fn is_selectable(self) -> bool {
        matches!(self, Self::Day | Self::Time | Self::Price)
    }
}

impl fmt::Display for SortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sort '{s}'"))
    }
}

/// Blast radius of a store change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateType {
    /// Initial load finished.
    Init,
    /// Exactly one point changed in place; the visible set is unchanged.
    Patch,
    /// The visible set may have changed; filter and sort are kept.
    Minor,
    /// The filter changed; the sort resets to its default before rebuilding.
    Major,
}
