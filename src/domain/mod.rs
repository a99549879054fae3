//! Domain layer for the trip board.
//!
//! This module contains the data model (points and their reference data), the
//! selector enums, and the pure filter and sort engines. Nothing here knows
//! about observers, blocking windows, or presentation state.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`point`]: Points, destinations, and offer catalogs
//! - [`kinds`]: `FilterKind`, `SortKind`, `UpdateType`
//! - [`filter`]: Filter predicates
//! - [`sort`]: Comparators

pub mod error;
pub mod filter;
pub mod kinds;
pub mod point;
pub mod sort;

pub use error::{Result, TriplineError};
pub use kinds::{FilterKind, SortKind, UpdateType};
pub use point::{
    find_destination, selected_offers, Destination, NewPoint, Offer, OfferCatalog, Picture, Point,
    PointId, PointType,
};
