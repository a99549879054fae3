//! User-intent actions dispatched against the store.
//!
//! The board turns presentation intents (submit an edit, toggle a favourite,
//! delete a row, submit the creation form) into a [`UserAction`] plus an
//! [`UpdateType`](crate::domain::UpdateType), and dispatches it inside a
//! blocking window. The dispatch reports a [`DispatchOutcome`]; failures never
//! surface as errors past the board.

use crate::domain::{NewPoint, Point, PointId};

/// A mutation requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Replace an existing point.
    Update(Point),
    /// Create a point from the draft form.
    Add(NewPoint),
    /// Remove an existing point.
    Delete(Point),
}

impl UserAction {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Update(_) => "update_point",
            Self::Add(_) => "add_point",
            Self::Delete(_) => "delete_point",
        }
    }

    pub(crate) fn target(&self) -> ActionTarget {
        match self {
            Self::Update(point) | Self::Delete(point) => ActionTarget::Point(point.id.clone()),
            Self::Add(_) => ActionTarget::Draft,
        }
    }
}

/// Which presentation object an action marks while in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ActionTarget {
    Point(PointId),
    Draft,
}

/// How a dispatched action settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The store confirmed the change and notified.
    Committed,
    /// The store rejected the change; the target is marked aborting.
    Aborted,
}
