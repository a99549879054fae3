//! Tripline: coordination core for an optimistic, observer-driven trip list.
//!
//! Tripline keeps a filtered, sorted list of trip points in step with an
//! authoritative store:
//! - Filter and sort projection over the store's raw collection
//! - Serialized dispatch of user mutations with a timed progress indicator
//! - Reconciliation of store notifications at three granularities (patch one
//!   row, rebuild the list, rebuild and reset the sort)
//! - Per-point presentation lifecycle with a single active editor
//! - A creation draft that closes on the Escape key

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Command line (main.rs)                             │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Board: dispatch + reconciliation                 │
//! │  - Blocking window, projection, registry, draft     │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────┐         ┌───────────────────────┐
//! │ UI Layer (ui/)        │         │ Store Layer (store/)  │
//! │ - BoardViewModel      │         │ - PointsModel         │
//! │ - Text renderer       │         │ - FilterModel         │
//! │                       │         │ - JSON data file      │
//! └───────────────────────┘         └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Points, destinations, offers                     │
//! │  - Filter and sort engines, error types             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Board coordination, blocking window, presentation registry
//! - [`domain`]: Core domain types and the pure filter/sort engines
//! - [`store`]: Observable models and the data-access trait
//! - [`ui`]: View models and text rendering
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! ```toml
//! lower_limit_ms = 350
//! upper_limit_ms = 1000
//! data_file = "trip.json"
//! trace_level = "debug"
//! log_file = "/tmp/tripline.log"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tripline::app::{KeyEvents, SystemClock};
//! use tripline::store::JsonPointsApi;
//! use tripline::{launch, Config};
//!
//! # fn main() -> tripline::Result<()> {
//! let config = Config::load("tripline.toml")?;
//! let api = Arc::new(JsonPointsApi::open("trip.json")?);
//! let board = futures::executor::block_on(launch(
//!     &config,
//!     api,
//!     KeyEvents::new(),
//!     Arc::new(SystemClock),
//! ));
//! print!("{}", tripline::ui::render_text(&board.view_model()));
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod store;

pub mod ui;

pub mod observability;

pub use app::{Board, DispatchOutcome, UserAction};
pub use domain::{Point, PointId, Result, TriplineError};

use app::blocker::{DEFAULT_LOWER_LIMIT_MS, DEFAULT_UPPER_LIMIT_MS};
use app::{Clock, KeyEvents, TimeLimits};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use store::{FilterModel, PointsApi, PointsModel};

/// Runtime configuration, read from TOML and overridable with `key=value` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How long a dispatch may block before the progress indicator shows.
    ///
    /// Default: 350
    pub lower_limit_ms: u64,

    /// How long, from block start, a shown indicator stays visible at least.
    ///
    /// Default: 1000
    pub upper_limit_ms: u64,

    /// JSON data file used by the command line.
    pub data_file: Option<PathBuf>,

    /// Tracing level.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Rotating JSON log file. Logs go to stderr when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lower_limit_ms: DEFAULT_LOWER_LIMIT_MS,
            upper_limit_ms: DEFAULT_UPPER_LIMIT_MS,
            data_file: None,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TriplineError::Config`] for malformed TOML, unknown keys, or
    /// invalid limits.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tripline::Config;
    ///
    /// let config = Config::from_toml_str("lower_limit_ms = 200").unwrap();
    /// assert_eq!(config.lower_limit_ms, 200);
    /// assert_eq!(config.upper_limit_ms, 1000);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| TriplineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`TriplineError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Applies `key=value` overrides, then re-validates.
    ///
    /// # Errors
    ///
    /// Returns [`TriplineError::Config`] for unknown keys, unparsable numbers,
    /// or invalid limits. Earlier keys may already be applied when a later
    /// one fails.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use tripline::Config;
    ///
    /// let mut config = Config::default();
    /// let overrides = BTreeMap::from([("trace_level".to_string(), "debug".to_string())]);
    /// config.apply_overrides(&overrides).unwrap();
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// ```
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) -> Result<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "lower_limit_ms" => self.lower_limit_ms = parse_millis(key, value)?,
                "upper_limit_ms" => self.upper_limit_ms = parse_millis(key, value)?,
                "data_file" => self.data_file = Some(PathBuf::from(value)),
                "trace_level" => self.trace_level = Some(value.clone()),
                "log_file" => self.log_file = Some(PathBuf::from(value)),
                other => {
                    return Err(TriplineError::Config(format!("unknown config key `{other}`")));
                }
            }
        }
        self.validate()
    }

    /// # Errors
    ///
    /// Returns [`TriplineError::Config`] if `lower_limit_ms > upper_limit_ms`.
    pub fn validate(&self) -> Result<()> {
        if self.lower_limit_ms > self.upper_limit_ms {
            return Err(TriplineError::Config(format!(
                "lower_limit_ms ({}) exceeds upper_limit_ms ({})",
                self.lower_limit_ms, self.upper_limit_ms
            )));
        }
        Ok(())
    }

    #[must_use]
    pub const fn time_limits(&self) -> TimeLimits {
        TimeLimits {
            lower: Duration::from_millis(self.lower_limit_ms),
            upper: Duration::from_millis(self.upper_limit_ms),
        }
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| TriplineError::Config(format!("{key}: `{value}` is not a number of milliseconds ({e})")))
}

/// Wires a board to a fresh points model over `api`, then runs the first load.
///
/// The returned board has left the loading state, whether or not the load
/// succeeded.
pub async fn launch(
    config: &Config,
    api: Arc<dyn PointsApi>,
    keys: KeyEvents,
    clock: Arc<dyn Clock>,
) -> Arc<Board> {
    tracing::debug!(?config, "launching board");

    let points = Arc::new(PointsModel::new(api));
    let board = Board::new(
        Arc::clone(&points),
        Arc::new(FilterModel::new()),
        keys,
        clock,
        config.time_limits(),
    );
    points.init().await;
    board
}
