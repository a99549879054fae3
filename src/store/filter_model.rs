//! Holder of the active filter.

use crate::domain::{FilterKind, UpdateType};
use crate::store::event::ModelEvent;
use crate::store::observer::{Observable, Subscription};
use parking_lot::RwLock;

/// The active [`FilterKind`] and its observers.
///
/// Every `set_filter` call notifies, even when the filter is unchanged; the
/// board relies on this to reset its sort when a new point is created.
#[derive(Debug, Default)]
pub struct FilterModel {
    filter: RwLock<FilterKind>,
    events: Observable<ModelEvent>,
}

impl FilterModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filter(&self) -> FilterKind {
        *self.filter.read()
    }

    pub fn set_filter(&self, update_type: UpdateType, filter: FilterKind) {
        *self.filter.write() = filter;
        tracing::debug!(%filter, ?update_type, "filter changed");
        self.events.notify(&ModelEvent::filter(update_type, filter));
    }

    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn add_observer<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&ModelEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(observer)
    }
}
