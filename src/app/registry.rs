//! Item presentation registry.
//!
//! One [`PointHandle`] per visible point, keyed by point id. The registry is
//! cleared and refilled on every rebuild; single-point notifications patch one
//! handle in place.
//!
//! # Single writer
//!
//! At most one handle is in editing mode. Opening an editor first broadcasts a
//! reset to every other handle, synchronously, then switches the target.

use super::modes::{Activity, HandleState, Mode};
use crate::domain::error::{Result, TriplineError};
use crate::domain::{Point, PointId};
use std::collections::HashMap;

/// Presentation lifecycle of one point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointHandle {
    point: Point,
    mode: Mode,
    activity: Activity,
}

impl PointHandle {
    fn new(point: Point) -> Self {
        Self {
            point,
            mode: Mode::Viewing,
            activity: Activity::Idle,
        }
    }

    /// Replaces the content and returns to a fresh viewing state.
    pub fn init(&mut self, point: Point) {
        self.point = point;
        self.mode = Mode::Viewing;
        self.activity = Activity::Idle;
    }

    #[must_use]
    pub const fn point(&self) -> &Point {
        &self.point
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn activity(&self) -> Activity {
        self.activity
    }

    #[must_use]
    pub const fn state(&self) -> HandleState {
        HandleState::from_parts(self.mode, self.activity)
    }

    /// Closes the editor and drops any failure marker.
    ///
    /// Leaves in-flight activities alone: a saving or deleting handle stays so
    /// until its action settles.
    pub fn reset_view(&mut self) {
        self.mode = Mode::Viewing;
        if self.activity == Activity::Aborting {
            self.activity = Activity::Idle;
        }
    }

    pub fn set_saving(&mut self) {
        self.activity = Activity::Saving;
    }

    pub fn set_deleting(&mut self) {
        self.activity = Activity::Deleting;
    }

    pub fn set_aborting(&mut self) {
        self.activity = Activity::Aborting;
    }

    fn destroy(&mut self) {
        self.mode = Mode::Viewing;
        self.activity = Activity::Idle;
    }
}

/// Map from point id to its presentation handle.
#[derive(Debug, Default)]
pub struct PresentationRegistry {
    handles: HashMap<PointId, PointHandle>,
}

impl PresentationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and registers a handle for `point`.
    ///
    /// # Errors
    ///
    /// Returns [`TriplineError::DuplicateHandle`] if the id is already registered.
    pub fn create(&mut self, point: Point) -> Result<&mut PointHandle> {
        use std::collections::hash_map::Entry;

        match self.handles.entry(point.id.clone()) {
            Entry::Occupied(_) => Err(TriplineError::DuplicateHandle(point.id)),
            Entry::Vacant(slot) => Ok(slot.insert(PointHandle::new(point))),
        }
    }

    /// # Errors
    ///
    /// Returns [`TriplineError::StaleReference`] if no handle exists for `id`.
    pub fn get(&self, id: &PointId) -> Result<&PointHandle> {
        self.handles
            .get(id)
            .ok_or_else(|| TriplineError::StaleReference(id.clone()))
    }

    /// # Errors
    ///
    /// Returns [`TriplineError::StaleReference`] if no handle exists for `id`.
    pub fn get_mut(&mut self, id: &PointId) -> Result<&mut PointHandle> {
        self.handles
            .get_mut(id)
            .ok_or_else(|| TriplineError::StaleReference(id.clone()))
    }

    #[must_use]
    pub fn contains(&self, id: &PointId) -> bool {
        self.handles.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Registered ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &PointId> {
        self.handles.keys()
    }

    /// Releases every handle's transient state, then empties the registry.
    ///
    /// Returns how many handles were destroyed.
    pub fn destroy_all(&mut self) -> usize {
        let count = self.handles.len();
        for handle in self.handles.values_mut() {
            handle.destroy();
        }
        self.handles.clear();
        count
    }

    /// Resets every handle to viewing.
    pub fn reset_all(&mut self) {
        for handle in self.handles.values_mut() {
            handle.reset_view();
        }
    }

    /// Puts `id` into editing after resetting every other handle.
    ///
    /// # Errors
    ///
    /// Returns [`TriplineError::StaleReference`] if no handle exists for `id`;
    /// nothing is reset in that case.
    pub fn start_editing(&mut self, id: &PointId) -> Result<()> {
        if !self.handles.contains_key(id) {
            return Err(TriplineError::StaleReference(id.clone()));
        }

        for (other_id, handle) in &mut self.handles {
            if other_id != id {
                handle.reset_view();
            }
        }
        self.get_mut(id)?.mode = Mode::Editing;
        Ok(())
    }

    /// The handle currently in editing mode, if any.
    #[must_use]
    pub fn editing(&self) -> Option<&PointId> {
        self.handles
            .iter()
            .find(|(_, handle)| handle.mode == Mode::Editing)
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PointType;
    use chrono::Utc;

    fn point(id: &str) -> Point {
        let now = Utc::now();
        Point {
            id: PointId::new(id),
            kind: PointType::Ship,
            destination: "d".into(),
            date_from: now,
            date_to: now,
            base_price: 1,
            offers: vec![],
            is_favorite: false,
        }
    }

    fn registry(ids: &[&str]) -> PresentationRegistry {
        let mut registry = PresentationRegistry::new();
        for id in ids {
            registry.create(point(id)).unwrap();
        }
        registry
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = registry(&["a"]);
        assert!(matches!(registry.create(point("a")), Err(TriplineError::DuplicateHandle(_))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_of_unknown_id_is_stale() {
        let registry = registry(&["a"]);
        assert!(matches!(
            registry.get(&PointId::new("b")),
            Err(TriplineError::StaleReference(id)) if id.as_str() == "b"
        ));
    }

    #[test]
    fn at_most_one_handle_edits() {
        let mut registry = registry(&["a", "b", "c"]);
        registry.start_editing(&PointId::new("a")).unwrap();
        registry.start_editing(&PointId::new("b")).unwrap();

        assert_eq!(registry.editing(), Some(&PointId::new("b")));
        assert_eq!(registry.get(&PointId::new("a")).unwrap().state(), HandleState::Viewing);
        assert_eq!(registry.handles.values().filter(|h| h.mode == Mode::Editing).count(), 1);
    }

    #[test]
    fn editing_unknown_id_touches_nothing() {
        let mut registry = registry(&["a"]);
        registry.start_editing(&PointId::new("a")).unwrap();
        assert!(registry.start_editing(&PointId::new("zzz")).is_err());
        assert_eq!(registry.editing(), Some(&PointId::new("a")));
    }

    #[test]
    fn reset_view_clears_failure_but_not_in_flight_work() {
        let mut registry = registry(&["a", "b"]);
        registry.get_mut(&PointId::new("a")).unwrap().set_aborting();
        registry.get_mut(&PointId::new("b")).unwrap().set_deleting();

        registry.reset_all();

        assert_eq!(registry.get(&PointId::new("a")).unwrap().state(), HandleState::Viewing);
        assert_eq!(registry.get(&PointId::new("b")).unwrap().state(), HandleState::Deleting);
    }

    #[test]
    fn init_replaces_content_and_state() {
        let mut registry = registry(&["a"]);
        let id = PointId::new("a");
        registry.start_editing(&id).unwrap();
        registry.get_mut(&id).unwrap().set_saving();

        let mut fresh = point("a");
        fresh.is_favorite = true;
        registry.get_mut(&id).unwrap().init(fresh.clone());

        let handle = registry.get(&id).unwrap();
        assert_eq!(handle.point(), &fresh);
        assert_eq!(handle.state(), HandleState::Viewing);
    }

    #[test]
    fn destroy_all_empties_registry() {
        let mut registry = registry(&["a", "b"]);
        registry.start_editing(&PointId::new("a")).unwrap();
        assert_eq!(registry.destroy_all(), 2);
        assert!(registry.is_empty());
        assert!(registry.editing().is_none());
    }
}
