//! Data-access abstraction.
//!
//! This module defines the [`PointsApi`] trait that the points model talks to.
//! Implementations own transport and persistence; the model only sees settled
//! outcomes. Every method returns a boxed future so implementations may be
//! remote, file-backed, or in-memory without changing the model.
//!
//! # Implementations
//!
//! - [`JsonPointsApi`](super::JsonPointsApi): JSON data file with atomic writes

use crate::domain::error::Result;
use crate::domain::{Destination, NewPoint, OfferCatalog, Point, PointId};
use futures_util::future::BoxFuture;

/// Remote source of points and reference data.
///
/// Mutating methods return the server's view of the record, which the model
/// stores verbatim.
pub trait PointsApi: Send + Sync {
    /// Fetches every point.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read.
    fn points(&self) -> BoxFuture<'_, Result<Vec<Point>>>;

    /// Fetches destination reference data.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read.
    fn destinations(&self) -> BoxFuture<'_, Result<Vec<Destination>>>;

    /// Fetches offer catalogs, one per point type.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read.
    fn offers(&self) -> BoxFuture<'_, Result<Vec<OfferCatalog>>>;

    /// Replaces a point, returning the stored version.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is unknown or the write fails.
    fn update_point(&self, point: Point) -> BoxFuture<'_, Result<Point>>;

    /// Persists a new point, returning it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn add_point(&self, point: NewPoint) -> BoxFuture<'_, Result<Point>>;

    /// Removes a point.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is unknown or the write fails.
    fn delete_point(&self, id: PointId) -> BoxFuture<'_, Result<()>>;
}
