//! Board view models and their text rendering.
//!
//! # Architecture
//!
//! ```text
//! Board → view_model → BoardViewModel → render_text → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready snapshot types (rows, trip info, sort bar)
//! - [`renderer`]: Plain-text renderer used by the command line

pub mod renderer;
pub mod viewmodel;

pub use renderer::{format_duration, render_text};
pub use viewmodel::{
    BoardViewModel, BodyView, EmptyState, OfferLine, PointRow, SortBar, SortColumn, TripInfo,
};
