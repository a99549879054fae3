//! The creation form overlay.
//!
//! The draft is not a registry entry: it edits a point that does not exist yet.
//! It owns the cancel-key subscription for as long as it is open, so every way
//! of closing it (submit success, explicit cancel, cancel key, board teardown)
//! unregisters the listener.

use super::modes::DraftState;
use crate::store::Subscription;

#[derive(Debug)]
pub struct DraftOverlay {
    state: DraftState,
    cancel_key: Subscription,
}

impl DraftOverlay {
    pub(crate) fn open(cancel_key: Subscription) -> Self {
        Self {
            state: DraftState::Editing,
            cancel_key,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DraftState {
        self.state
    }

    pub fn set_saving(&mut self) {
        self.state = DraftState::Saving;
    }

    pub fn set_aborting(&mut self) {
        self.state = DraftState::Aborting;
    }

    /// Closes the overlay, unregistering the cancel-key listener.
    pub fn close(self) {
        tracing::debug!(state = ?self.state, "draft closed");
        self.cancel_key.cancel();
    }
}
