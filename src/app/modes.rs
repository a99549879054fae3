//! Presentation state types for point handles and the draft overlay.
//!
//! A point handle is in one of two modes (viewing or editing) and, orthogonally,
//! may carry a transient activity while an action is in flight or after it
//! failed. The combined, externally visible state is a [`HandleState`].
//!
//! # State Machine
//!
//! ```text
//!            open editor                submit / delete
//! Viewing ───────────────▶ Editing ───────────────────▶ Saving / Deleting
//!    ▲                        │                                │
//!    └──── reset view ────────┘         failure                ▼
//!    ▲                                ◀──────────────────── Aborting
//!    └──────────────── reset view / re-init ──────────────────┘
//! ```
//!
//! A successful action is followed by a store notification that re-initializes
//! or replaces the handle, which clears the activity.

/// Whether a handle shows its summary row or its edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Viewing,
    Editing,
}

/// Transient activity layered on top of the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    /// An update is in flight.
    Saving,
    /// A delete is in flight.
    Deleting,
    /// The last action failed; the optimistic change must be undone and the
    /// user may retry or cancel.
    Aborting,
}

/// Externally visible state of a point handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    Viewing,
    Editing,
    Saving,
    Deleting,
    Aborting,
}

impl HandleState {
    /// Combines a mode and an activity; any activity other than idle wins.
    #[must_use]
    pub const fn from_parts(mode: Mode, activity: Activity) -> Self {
        match (activity, mode) {
            (Activity::Saving, _) => Self::Saving,
            (Activity::Deleting, _) => Self::Deleting,
            (Activity::Aborting, _) => Self::Aborting,
            (Activity::Idle, Mode::Viewing) => Self::Viewing,
            (Activity::Idle, Mode::Editing) => Self::Editing,
        }
    }
}

/// State of the creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    /// Open and accepting input.
    Editing,
    /// Submitted; the add is in flight.
    Saving,
    /// The add failed; the form stays open for a retry or a cancel.
    Aborting,
}
