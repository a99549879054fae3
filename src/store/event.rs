//! Store notifications.
//!
//! Both the points model and the filter model notify with a [`ModelEvent`]:
//! an [`UpdateType`] describing how much presentation state the change
//! invalidates, plus the payload that changed.

use crate::domain::{FilterKind, Point, UpdateType};

/// What changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    /// The initial load settled (successfully or not).
    Loaded,
    /// A point was added, updated, or deleted.
    Point(Point),
    /// The active filter changed.
    Filter(FilterKind),
}

/// A store notification tagged with its blast radius.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEvent {
    pub update_type: UpdateType,
    pub payload: EventPayload,
}

impl ModelEvent {
    #[must_use]
    pub const fn loaded() -> Self {
        Self {
            update_type: UpdateType::Init,
            payload: EventPayload::Loaded,
        }
    }

    #[must_use]
    pub const fn point(update_type: UpdateType, point: Point) -> Self {
        Self {
            update_type,
            payload: EventPayload::Point(point),
        }
    }

    #[must_use]
    pub const fn filter(update_type: UpdateType, filter: FilterKind) -> Self {
        Self {
            update_type,
            payload: EventPayload::Filter(filter),
        }
    }

    /// The point carried by this event, if any.
    #[must_use]
    pub const fn point_payload(&self) -> Option<&Point> {
        match &self.payload {
            EventPayload::Point(point) => Some(point),
            EventPayload::Loaded | EventPayload::Filter(_) => None,
        }
    }
}
