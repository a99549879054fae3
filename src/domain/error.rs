//! Error types for the trip board.
//!
//! This module defines the centralized error type [`TriplineError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.

use super::point::PointId;
use thiserror::Error;

/// The main error type for board, store, and configuration operations.
///
/// Mutation failures never escape the board's dispatch boundary; they are
/// converted to an aborting presentation state there. The remaining variants
/// surface from the store, the data-access layer, and configuration loading.
///
/// # Examples
///
/// ```
/// use tripline::domain::{PointId, TriplineError};
///
/// fn lookup(id: &PointId) -> Result<(), TriplineError> {
///     Err(TriplineError::PointNotFound(id.clone()))
/// }
///
/// assert!(lookup(&PointId::new("p-1")).is_err());
/// ```
#[derive(Debug, Error)]
pub enum TriplineError {
    /// Reading or writing the backing data file failed.
    ///
    /// The string contains a description of what went wrong (parse failure,
    /// serialization failure).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The data-access collaborator rejected or failed a request.
    #[error("API error: {0}")]
    Api(String),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A mutation referenced a point the store does not hold.
    #[error("Point not found: {0}")]
    PointNotFound(PointId),

    /// A single-point notification referenced a point with no presentation handle.
    ///
    /// Indicates the store and the board disagree about the visible set. Fatal
    /// to the notification that carried it, never to the process.
    #[error("No presentation handle for point {0}")]
    StaleReference(PointId),

    /// A presentation handle was registered twice for the same point.
    #[error("Presentation handle already registered for point {0}")]
    DuplicateHandle(PointId),
}

/// A specialized `Result` type for trip board operations.
pub type Result<T> = std::result::Result<T, TriplineError>;
