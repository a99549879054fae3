//! Item store: the points model, the filter model, and their data source.
//!
//! The board never mutates points directly. It calls the async operations of
//! [`PointsModel`], which forward to a [`PointsApi`] and notify observers with a
//! [`ModelEvent`] once a change is confirmed.
//!
//! # Modules
//!
//! - `api`: Data-access trait
//! - `json`: JSON file implementation of the data-access trait
//! - `model`: Authoritative point collection with observers
//! - `filter_model`: Active filter with observers
//! - `event`: Notification type shared by both models
//! - `observer`: Generic synchronous subject with RAII subscriptions

pub mod api;
pub mod event;
pub mod filter_model;
pub mod json;
pub mod model;
pub mod observer;

pub use api::PointsApi;
pub use event::{EventPayload, ModelEvent};
pub use filter_model::FilterModel;
pub use json::JsonPointsApi;
pub use model::PointsModel;
pub use observer::{Observable, Subscription};
