//! The points model: authoritative collection plus reference data.
//!
//! [`PointsModel`] owns the point collection, destinations, and offer catalogs.
//! Every mutation goes through the [`PointsApi`]; the local collection changes
//! only after the API confirms, and observers are notified only then. Failed
//! mutations leave the collection untouched and are reported to the caller as
//! an `Err`, with no notification.
//!
//! Notifications are delivered after the model's own lock is released, so an
//! observer may read the model from inside its callback.

use crate::domain::error::{Result, TriplineError};
use crate::domain::{Destination, NewPoint, OfferCatalog, Point, UpdateType};
use crate::store::api::PointsApi;
use crate::store::event::ModelEvent;
use crate::store::observer::{Observable, Subscription};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
struct ModelData {
    points: Vec<Point>,
    destinations: Vec<Destination>,
    offers: Vec<OfferCatalog>,
}

/// Authoritative point store.
pub struct PointsModel {
    api: Arc<dyn PointsApi>,
    data: RwLock<ModelData>,
    events: Observable<ModelEvent>,
}

impl PointsModel {
    #[must_use]
    pub fn new(api: Arc<dyn PointsApi>) -> Self {
        Self {
            api,
            data: RwLock::new(ModelData::default()),
            events: Observable::new(),
        }
    }

    /// Loads points and reference data, then notifies [`UpdateType::Init`].
    ///
    /// A failed load leaves every collection empty; the Init notification is
    /// sent either way so the board can leave its loading state.
    pub async fn init(&self) {
        let loaded = async {
            let points = self.api.points().await?;
            let destinations = self.api.destinations().await?;
            let offers = self.api.offers().await?;
            Ok::<_, TriplineError>(ModelData {
                points,
                destinations,
                offers,
            })
        }
        .await;

        match loaded {
            Ok(data) => {
                tracing::debug!(
                    points = data.points.len(),
                    destinations = data.destinations.len(),
                    offer_catalogs = data.offers.len(),
                    "points model loaded"
                );
                *self.data.write() = data;
            }
            Err(e) => {
                tracing::warn!(error = %e, "initial load failed, starting empty");
                *self.data.write() = ModelData::default();
            }
        }

        self.events.notify(&ModelEvent::loaded());
    }

    /// Snapshot of the current point collection, in store order.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        self.data.read().points.clone()
    }

    #[must_use]
    pub fn destinations(&self) -> Vec<Destination> {
        self.data.read().destinations.clone()
    }

    #[must_use]
    pub fn offers_by_type(&self) -> Vec<OfferCatalog> {
        self.data.read().offers.clone()
    }

    /// Registers an observer of store changes.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn add_observer<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&ModelEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(observer)
    }

    /// Replaces a point and notifies with `update_type`.
    ///
    /// # Errors
    ///
    /// Returns [`TriplineError::PointNotFound`] if the point is not in the
    /// collection (no API call is made), or the API's error.
    pub async fn update_point(&self, update_type: UpdateType, point: Point) -> Result<()> {
        if !self.contains(&point) {
            return Err(TriplineError::PointNotFound(point.id));
        }

        let updated = self.api.update_point(point).await.map_err(|e| {
            tracing::warn!(error = %e, "update rejected by api");
            e
        })?;

        {
            let mut data = self.data.write();
            let slot = data
                .points
                .iter_mut()
                .find(|existing| existing.id == updated.id)
                .ok_or_else(|| TriplineError::PointNotFound(updated.id.clone()))?;
            *slot = updated.clone();
        }

        tracing::debug!(point_id = %updated.id, ?update_type, "point updated");
        self.events.notify(&ModelEvent::point(update_type, updated));
        Ok(())
    }

    /// Persists a new point, prepends it, and notifies with `update_type`.
    ///
    /// # Errors
    ///
    /// Returns the API's error.
    pub async fn add_point(&self, update_type: UpdateType, point: NewPoint) -> Result<()> {
        let added = self.api.add_point(point).await.map_err(|e| {
            tracing::warn!(error = %e, "add rejected by api");
            e
        })?;

        self.data.write().points.insert(0, added.clone());

        tracing::debug!(point_id = %added.id, ?update_type, "point added");
        self.events.notify(&ModelEvent::point(update_type, added));
        Ok(())
    }

    /// Removes a point and notifies with `update_type`.
    ///
    /// # Errors
    ///
    /// Returns [`TriplineError::PointNotFound`] if the point is not in the
    /// collection (no API call is made), or the API's error.
    pub async fn delete_point(&self, update_type: UpdateType, point: Point) -> Result<()> {
        if !self.contains(&point) {
            return Err(TriplineError::PointNotFound(point.id));
        }

        self.api.delete_point(point.id.clone()).await.map_err(|e| {
            tracing::warn!(error = %e, "delete rejected by api");
            e
        })?;

        self.data.write().points.retain(|existing| existing.id != point.id);

        tracing::debug!(point_id = %point.id, ?update_type, "point deleted");
        self.events.notify(&ModelEvent::point(update_type, point));
        Ok(())
    }

    fn contains(&self, point: &Point) -> bool {
        self.data.read().points.iter().any(|existing| existing.id == point.id)
    }
}

impl std::fmt::Debug for PointsModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointsModel")
            .field("data", &*self.data.read())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
