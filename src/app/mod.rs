//! Presentation coordination between user intents and the store.
//!
//! This layer sits between the host (main.rs, or any embedding UI) and the
//! store. It owns everything transient about what the user sees: which points
//! are listed and in what order, which one is being edited, whether the
//! creation draft is open, and whether a progress indicator should show.
//!
//! # Architecture
//!
//! ```text
//! Host intent → Board::dispatch → PointsModel → notify
//!                    │                             │
//!              BlockingWindow              Board::handle_model_event
//!                                                  │
//!                                  projection → PresentationRegistry
//! ```
//!
//! # Modules
//!
//! - [`actions`]: User actions and how a dispatch settled
//! - [`blocker`]: Serializing window with the progress indicator thresholds
//! - [`board`]: The coordinator tying intents, models, and presentation together
//! - [`clock`]: Monotonic and wall time sources
//! - [`draft`]: Creation form overlay
//! - [`keys`]: Host key input
//! - [`modes`]: Presentation state machine types
//! - [`projection`]: Filter-then-sort over the store's points
//! - [`registry`]: Per-point presentation handles

pub mod actions;
pub mod blocker;
pub mod board;
pub mod clock;
pub mod draft;
pub mod keys;
pub mod modes;
pub mod projection;
pub mod registry;

pub use actions::{DispatchOutcome, UserAction};
pub use blocker::{BlockGuard, BlockingWindow, Indicator, TimeLimits};
pub use board::{Board, BoardBody};
pub use clock::{Clock, ManualClock, SystemClock};
pub use draft::DraftOverlay;
pub use keys::{KeyEvents, KeyInput};
pub use modes::{Activity, DraftState, HandleState, Mode};
pub use projection::visible_points;
pub use registry::{PointHandle, PresentationRegistry};
