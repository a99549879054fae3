//! JSON file-backed data source.
//!
//! This module provides a simple, human-readable [`PointsApi`] implementation.
//! The whole document lives in memory and is written back with an atomic
//! write-to-temp + rename after every mutation, so the file is never left
//! half-written.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "destinations": [{ "id": "d-1", "name": "Geneva", "description": "", "pictures": [] }],
//!   "offers": [{ "type": "taxi", "offers": [{ "id": "o-1", "title": "Upgrade", "price": 50 }] }],
//!   "points": [{
//!     "id": "p-1", "type": "taxi", "destination": "d-1",
//!     "date_from": "2026-03-01T10:00:00Z", "date_to": "2026-03-01T11:00:00Z",
//!     "base_price": 20, "offers": ["o-1"], "is_favorite": false
//!   }]
//! }
//! ```

use crate::domain::error::{Result, TriplineError};
use crate::domain::{Destination, NewPoint, OfferCatalog, Point, PointId};
use crate::store::api::PointsApi;
use futures_util::future::{self, BoxFuture, FutureExt};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TripDocument {
    /// Format version for future migrations.
    version: u32,

    #[serde(default)]
    destinations: Vec<Destination>,

    #[serde(default)]
    offers: Vec<OfferCatalog>,

    #[serde(default)]
    points: Vec<Point>,
}

impl Default for TripDocument {
    fn default() -> Self {
        Self {
            version: 1,
            destinations: Vec::new(),
            offers: Vec::new(),
            points: Vec::new(),
        }
    }
}

/// JSON file data source.
///
/// Internally synchronized; safe to share behind an `Arc`.
pub struct JsonPointsApi {
    file_path: PathBuf,
    document: Mutex<TripDocument>,
}

impl JsonPointsApi {
    /// Opens a data file, creating an empty document if it does not exist.
    ///
    /// Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening trip data file");

        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let document = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty document");
            TripDocument::default()
        };

        tracing::debug!(
            points = document.points.len(),
            destinations = document.destinations.len(),
            offer_catalogs = document.offers.len(),
            "trip data loaded"
        );

        Ok(Self {
            file_path,
            document: Mutex::new(document),
        })
    }

    /// Seeds reference data, replacing whatever the file held, and saves.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn seed(&self, destinations: Vec<Destination>, offers: Vec<OfferCatalog>, points: Vec<Point>) -> Result<()> {
        self.commit(|document| {
            document.destinations = destinations;
            document.offers = offers;
            document.points = points;
            Ok(())
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<TripDocument> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| TriplineError::Storage(format!("failed to parse JSON: {e}")))
    }

    fn save_to_file(path: &Path, document: &TripDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| TriplineError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;

        tracing::debug!(path = ?path, "trip data saved");
        Ok(())
    }

    /// Applies `edit` to a copy of the document and keeps it only once saved.
    fn commit<T>(&self, edit: impl FnOnce(&mut TripDocument) -> Result<T>) -> Result<T> {
        let mut document = self.document.lock();
        let mut next = document.clone();
        let value = edit(&mut next)?;
        Self::save_to_file(&self.file_path, &next)?;
        *document = next;
        Ok(value)
    }

    fn update_sync(&self, point: Point) -> Result<Point> {
        let _span = tracing::debug_span!("json_update_point", point_id = %point.id).entered();

        self.commit(|document| {
            let slot = document
                .points
                .iter_mut()
                .find(|existing| existing.id == point.id)
                .ok_or_else(|| TriplineError::Api(format!("point not found: {}", point.id)))?;
            *slot = point.clone();
            Ok(point)
        })
    }

    fn add_sync(&self, new_point: NewPoint) -> Result<Point> {
        let point = new_point.with_id(PointId::generate());
        let _span = tracing::debug_span!("json_add_point", point_id = %point.id).entered();

        self.commit(|document| {
            document.points.insert(0, point.clone());
            Ok(point)
        })
    }

    fn delete_sync(&self, id: &PointId) -> Result<()> {
        let _span = tracing::debug_span!("json_delete_point", point_id = %id).entered();

        self.commit(|document| {
            let before = document.points.len();
            document.points.retain(|point| &point.id != id);
            if document.points.len() == before {
                return Err(TriplineError::Api(format!("point not found: {id}")));
            }
            Ok(())
        })
    }
}

impl PointsApi for JsonPointsApi {
    fn points(&self) -> BoxFuture<'_, Result<Vec<Point>>> {
        future::ready(Ok(self.document.lock().points.clone())).boxed()
    }

    fn destinations(&self) -> BoxFuture<'_, Result<Vec<Destination>>> {
        future::ready(Ok(self.document.lock().destinations.clone())).boxed()
    }

    fn offers(&self) -> BoxFuture<'_, Result<Vec<OfferCatalog>>> {
        future::ready(Ok(self.document.lock().offers.clone())).boxed()
    }

    fn update_point(&self, point: Point) -> BoxFuture<'_, Result<Point>> {
        future::ready(self.update_sync(point)).boxed()
    }

    fn add_point(&self, point: NewPoint) -> BoxFuture<'_, Result<Point>> {
        future::ready(self.add_sync(point)).boxed()
    }

    fn delete_point(&self, id: PointId) -> BoxFuture<'_, Result<()>> {
        future::ready(self.delete_sync(&id)).boxed()
    }
}

impl std::fmt::Debug for JsonPointsApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonPointsApi")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PointType;
    use chrono::{TimeZone, Utc};
    use futures::executor::block_on;

    fn draft(price: u32) -> NewPoint {
        NewPoint {
            kind: PointType::Flight,
            destination: "d-1".into(),
            date_from: Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap(),
            date_to: Utc.with_ymd_and_hms(2026, 6, 1, 11, 0, 0).unwrap(),
            base_price: price,
            offers: vec![],
            is_favorite: false,
        }
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let api = JsonPointsApi::open(dir.path().join("nested/trip.json")).unwrap();
        assert!(block_on(api.points()).unwrap().is_empty());
        assert!(!api.path().exists());
    }

    #[test]
    fn mutations_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.json");

        let api = JsonPointsApi::open(&path).unwrap();
        let added = block_on(api.add_point(draft(100))).unwrap();
        let mut changed = added.clone();
        changed.base_price = 140;
        block_on(api.update_point(changed)).unwrap();
        let second = block_on(api.add_point(draft(5))).unwrap();
        block_on(api.delete_point(second.id)).unwrap();
        drop(api);

        let reopened = JsonPointsApi::open(&path).unwrap();
        let points = block_on(reopened.points()).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].id, added.id);
        assert_eq!(points[0].base_price, 140);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let api = JsonPointsApi::open(dir.path().join("trip.json")).unwrap();
        let ghost = draft(1).with_id(PointId::new("ghost"));

        assert!(matches!(block_on(api.update_point(ghost)), Err(TriplineError::Api(_))));
        assert!(matches!(
            block_on(api.delete_point(PointId::new("ghost"))),
            Err(TriplineError::Api(_))
        ));
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonPointsApi::open(&path), Err(TriplineError::Storage(_))));
    }
}
