//! Board coordination: intent dispatch and store reconciliation.
//!
//! [`Board`] is the single place where presentation meets the store. It owns
//! the item presentation registry, the creation draft, the current sort, and
//! the blocking window that serializes every mutation.
//!
//! # Architecture
//!
//! ```text
//! intent → dispatch (blocking window) → PointsModel op ─┐
//!                                                        │ notify
//!   registry / body ← handle_model_event ←───────────────┘
//! ```
//!
//! Mutations flow one way. A dispatch marks its target (saving, deleting, or
//! the draft as saving), awaits the store, and on failure marks the target
//! aborting. A successful store op notifies; the board reacts to that
//! notification, never to the dispatch result.
//!
//! # Reconciliation
//!
//! - **Patch**: re-initialize the one handle whose id matches the payload
//! - **Minor**: destroy every handle and rebuild the list, keeping the sort
//! - **Major**: like Minor, but the sort goes back to [`SortKind::Day`]
//! - **Init**: leave the loading state, reload reference data, rebuild
//!
//! After every rebuild the registry's key set equals the set of visible ids.
//!
//! # Locking
//!
//! Board state sits behind a `parking_lot` mutex that is never held across an
//! await point or while a model is notifying. Model reads happen before the
//! lock is taken.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tripline::app::{Board, KeyEvents, SystemClock, TimeLimits};
//! use tripline::store::{FilterModel, JsonPointsApi, PointsModel};
//!
//! # async fn run() -> tripline::domain::Result<()> {
//! let api = Arc::new(JsonPointsApi::open("trip.json")?);
//! let points = Arc::new(PointsModel::new(api));
//! let board = Board::new(
//!     Arc::clone(&points),
//!     Arc::new(FilterModel::new()),
//!     KeyEvents::new(),
//!     Arc::new(SystemClock),
//!     TimeLimits::default(),
//! );
//! points.init().await;
//! assert!(!board.is_loading());
//! # Ok(())
//! # }
//! ```

use super::actions::{ActionTarget, DispatchOutcome, UserAction};
use super::blocker::{BlockingWindow, Indicator, TimeLimits};
use super::clock::Clock;
use super::draft::DraftOverlay;
use super::keys::{KeyEvents, KeyInput};
use super::modes::{DraftState, HandleState};
use super::projection::visible_points;
use super::registry::PresentationRegistry;
use crate::domain::error::Result;
use crate::domain::{
    Destination, FilterKind, NewPoint, OfferCatalog, Point, PointId, SortKind, UpdateType,
};
use crate::store::{FilterModel, ModelEvent, PointsModel, Subscription};
use crate::ui::viewmodel::{BodyView, BoardViewModel, EmptyState, PointRow, SortBar, TripInfo};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::{Arc, Weak};
use tracing::Instrument;

/// What the main area of the board currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardBody {
    /// Waiting for the first Init notification.
    Loading,
    /// Nothing survives the filter; the placeholder is tagged with it.
    Empty { filter: FilterKind },
    /// Visible point ids in display order.
    Points { order: Vec<PointId> },
    /// Torn down; nothing is shown and nothing is rebuilt.
    Detached,
}

#[derive(Debug)]
struct BoardState {
    is_loading: bool,
    sort: SortKind,
    filter: FilterKind,
    destinations: Vec<Destination>,
    offers: Vec<OfferCatalog>,
    registry: PresentationRegistry,
    body: BoardBody,
    draft: Option<DraftOverlay>,
}

impl BoardState {
    fn new(filter: FilterKind) -> Self {
        Self {
            is_loading: true,
            sort: SortKind::default(),
            filter,
            destinations: Vec::new(),
            offers: Vec::new(),
            registry: PresentationRegistry::new(),
            body: BoardBody::Loading,
            draft: None,
        }
    }
}

/// Coordinates user intents with the points and filter models.
///
/// Always lives in an [`Arc`]: store and key listeners hold a weak reference
/// back to it, so dropping the last `Arc` detaches the board.
pub struct Board {
    points: Arc<PointsModel>,
    filters: Arc<FilterModel>,
    keys: KeyEvents,
    clock: Arc<dyn Clock>,
    blocker: BlockingWindow,
    state: Mutex<BoardState>,
    subscriptions: Mutex<Vec<Subscription>>,
    this: Weak<Board>,
}

impl Board {
    /// Builds a board in the loading state and subscribes it to both models.
    pub fn new(
        points: Arc<PointsModel>,
        filters: Arc<FilterModel>,
        keys: KeyEvents,
        clock: Arc<dyn Clock>,
        limits: TimeLimits,
    ) -> Arc<Self> {
        let initial_filter = filters.filter();
        let board = Arc::new_cyclic(|this| Self {
            points,
            filters,
            keys,
            blocker: BlockingWindow::new(limits, Arc::clone(&clock)),
            clock,
            state: Mutex::new(BoardState::new(initial_filter)),
            subscriptions: Mutex::new(Vec::new()),
            this: this.clone(),
        });
        board.attach();
        board
    }

    fn attach(&self) {
        let on_points = {
            let board = self.this.clone();
            self.points.add_observer(move |event| Self::forward(&board, event))
        };
        let on_filter = {
            let board = self.this.clone();
            self.filters.add_observer(move |event| Self::forward(&board, event))
        };
        self.subscriptions.lock().extend([on_points, on_filter]);
    }

    fn forward(board: &Weak<Self>, event: &ModelEvent) {
        let Some(board) = board.upgrade() else {
            return;
        };
        if let Err(e) = board.handle_model_event(event) {
            tracing::error!(error = %e, update_type = ?event.update_type, "store notification rejected");
        }
    }

    /// Reconciles presentation with a store notification.
    ///
    /// # Errors
    ///
    /// Returns [`TriplineError::StaleReference`](crate::domain::TriplineError::StaleReference)
    /// when a Patch names a point that has no handle. Nothing changes in that case.
    pub fn handle_model_event(&self, event: &ModelEvent) -> Result<()> {
        let _span = tracing::debug_span!("model_event", update_type = ?event.update_type).entered();

        match event.update_type {
            UpdateType::Patch => {
                let Some(point) = event.point_payload() else {
                    tracing::warn!("patch without a point payload, rebuilding instead");
                    self.rebuild(false);
                    return Ok(());
                };
                self.state.lock().registry.get_mut(&point.id)?.init(point.clone());
                tracing::debug!(point_id = %point.id, "handle patched");
            }
            UpdateType::Minor => self.rebuild(false),
            UpdateType::Major => self.rebuild(true),
            UpdateType::Init => {
                self.state.lock().is_loading = false;
                self.init();
            }
        }
        Ok(())
    }

    /// Reloads reference data from the points model and rebuilds the list.
    pub fn init(&self) {
        let destinations = self.points.destinations();
        let offers = self.points.offers_by_type();
        {
            let mut state = self.state.lock();
            state.destinations = destinations;
            state.offers = offers;
        }
        self.rebuild(false);
    }

    fn rebuild(&self, reset_sort: bool) {
        let raw = self.points.points();
        let filter = self.filters.filter();
        let now = self.clock.wall_now();

        let mut state = self.state.lock();
        if state.body == BoardBody::Detached {
            tracing::debug!("rebuild skipped on a detached board");
            return;
        }
        let destroyed = state.registry.destroy_all();
        if reset_sort {
            state.sort = SortKind::Day;
        }
        state.filter = filter;

        if state.is_loading {
            state.body = BoardBody::Loading;
            return;
        }

        let visible = visible_points(&raw, filter, state.sort, now);
        if visible.is_empty() {
            state.body = BoardBody::Empty { filter };
        } else {
            let mut order = Vec::with_capacity(visible.len());
            for point in visible {
                let id = point.id.clone();
                match state.registry.create(point) {
                    Ok(_) => order.push(id),
                    Err(e) => tracing::error!(error = %e, "skipping repeated point id"),
                }
            }
            state.body = BoardBody::Points { order };
        }

        tracing::debug!(
            destroyed,
            created = state.registry.len(),
            sort = %state.sort,
            %filter,
            "board rebuilt"
        );
    }

    /// Runs `action` against the points model inside the blocking window.
    ///
    /// Only one dispatch holds the window at a time; later ones wait for it.
    /// The window is released on every path, including failure.
    pub async fn dispatch(&self, action: UserAction, update_type: UpdateType) -> DispatchOutcome {
        let span = tracing::debug_span!("dispatch", action = action.name(), ?update_type);

        async move {
            let _window = self.blocker.block().await;
            let target = action.target();
            self.mark_in_flight(&action);

            let result = match action {
                UserAction::Update(point) => self.points.update_point(update_type, point).await,
                UserAction::Add(point) => self.points.add_point(update_type, point).await,
                UserAction::Delete(point) => self.points.delete_point(update_type, point).await,
            };

            match result {
                Ok(()) => DispatchOutcome::Committed,
                Err(e) => {
                    tracing::warn!(error = %e, "action failed");
                    self.mark_aborting(&target);
                    DispatchOutcome::Aborted
                }
            }
        }
        .instrument(span)
        .await
    }

    fn mark_in_flight(&self, action: &UserAction) {
        let mut state = self.state.lock();
        match action {
            UserAction::Update(point) => match state.registry.get_mut(&point.id) {
                Ok(handle) => handle.set_saving(),
                Err(e) => tracing::warn!(error = %e, "update dispatched without a handle"),
            },
            UserAction::Delete(point) => match state.registry.get_mut(&point.id) {
                Ok(handle) => handle.set_deleting(),
                Err(e) => tracing::warn!(error = %e, "delete dispatched without a handle"),
            },
            UserAction::Add(_) => match state.draft.as_mut() {
                Some(draft) => draft.set_saving(),
                None => tracing::warn!("add dispatched without an open draft"),
            },
        }
    }

    fn mark_aborting(&self, target: &ActionTarget) {
        let mut state = self.state.lock();
        match target {
            ActionTarget::Point(id) => match state.registry.get_mut(id) {
                Ok(handle) => handle.set_aborting(),
                Err(e) => tracing::warn!(error = %e, "handle gone before its failure could be shown"),
            },
            ActionTarget::Draft => match state.draft.as_mut() {
                Some(draft) => draft.set_aborting(),
                None => tracing::warn!("draft closed before its failure could be shown"),
            },
        }
    }

    /// Opens the editor for `id`, closing any other.
    ///
    /// # Errors
    ///
    /// Returns `StaleReference` if `id` has no handle.
    pub fn open_editor(&self, id: &PointId) -> Result<()> {
        self.state.lock().registry.start_editing(id)
    }

    /// # Errors
    ///
    /// Returns `StaleReference` if `id` has no handle.
    pub fn close_editor(&self, id: &PointId) -> Result<()> {
        self.state.lock().registry.get_mut(id)?.reset_view();
        Ok(())
    }

    /// Flips the favourite flag of a listed point.
    ///
    /// # Errors
    ///
    /// Returns `StaleReference` if `id` has no handle; nothing is dispatched.
    pub async fn toggle_favorite(&self, id: &PointId) -> Result<DispatchOutcome> {
        let point = self.handle_point(id)?.toggled_favorite();
        Ok(self.dispatch(UserAction::Update(point), UpdateType::Patch).await)
    }

    /// Saves an edited point.
    pub async fn submit_edit(&self, point: Point) -> DispatchOutcome {
        self.dispatch(UserAction::Update(point), UpdateType::Minor).await
    }

    /// # Errors
    ///
    /// Returns `StaleReference` if `id` has no handle; nothing is dispatched.
    pub async fn delete_point(&self, id: &PointId) -> Result<DispatchOutcome> {
        let point = self.handle_point(id)?;
        Ok(self.dispatch(UserAction::Delete(point), UpdateType::Minor).await)
    }

    /// Switches the sort and rebuilds.
    ///
    /// Returns `false` without rebuilding if `sort` is already active or is a
    /// display-only column (see [`SortKind::is_selectable`]).
    pub fn change_sort(&self, sort: SortKind) -> bool {
        if !sort.is_selectable() {
            tracing::debug!(%sort, "sort column is display-only");
            return false;
        }
        {
            let mut state = self.state.lock();
            if state.sort == sort {
                return false;
            }
            state.sort = sort;
        }
        self.rebuild(false);
        true
    }

    /// Asks the filter model for `filter`; the board follows its Major notification.
    pub fn change_filter(&self, filter: FilterKind) {
        self.filters.set_filter(UpdateType::Major, filter);
    }

    /// Shows every point in day order and opens the creation draft.
    ///
    /// Every open editor is closed first. Calling this while a draft is
    /// already open keeps that draft.
    pub fn create_point(&self) {
        self.state.lock().sort = SortKind::Day;
        self.filters.set_filter(UpdateType::Major, FilterKind::Everything);

        let mut state = self.state.lock();
        state.registry.reset_all();
        if state.draft.is_some() {
            tracing::debug!("draft already open");
            return;
        }

        let board = self.this.clone();
        let cancel_key = self.keys.subscribe(move |key: &KeyInput| {
            if !key.is_cancel() {
                return;
            }
            if let Some(board) = board.upgrade() {
                board.cancel_draft();
            }
        });
        state.draft = Some(DraftOverlay::open(cancel_key));
        tracing::debug!("draft opened");
    }

    /// Saves the draft; closes it when the store accepts the new point.
    pub async fn submit_draft(&self, point: NewPoint) -> DispatchOutcome {
        let outcome = self.dispatch(UserAction::Add(point), UpdateType::Minor).await;
        if outcome == DispatchOutcome::Committed {
            self.cancel_draft();
        }
        outcome
    }

    /// Closes the draft if one is open. Returns whether one was.
    pub fn cancel_draft(&self) -> bool {
        let draft = self.state.lock().draft.take();
        draft.map(DraftOverlay::close).is_some()
    }

    /// Detaches from both models, destroys every handle, and closes the draft.
    pub fn teardown(&self) {
        let subscriptions = std::mem::take(&mut *self.subscriptions.lock());
        drop(subscriptions);

        let (destroyed, draft) = {
            let mut state = self.state.lock();
            let destroyed = state.registry.destroy_all();
            state.body = BoardBody::Detached;
            (destroyed, state.draft.take())
        };
        if let Some(draft) = draft {
            draft.close();
        }
        tracing::debug!(destroyed, "board torn down");
    }

    #[must_use]
    pub fn current_sort(&self) -> SortKind {
        self.state.lock().sort
    }

    /// Filter used by the last rebuild.
    #[must_use]
    pub fn current_filter(&self) -> FilterKind {
        self.state.lock().filter
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    #[must_use]
    pub fn body(&self) -> BoardBody {
        self.state.lock().body.clone()
    }

    #[must_use]
    pub fn handle_state(&self, id: &PointId) -> Option<HandleState> {
        self.state.lock().registry.get(id).ok().map(|handle| handle.state())
    }

    /// The point as its handle currently shows it.
    ///
    /// # Errors
    ///
    /// Returns `StaleReference` if `id` has no handle.
    pub fn handle_point(&self, id: &PointId) -> Result<Point> {
        Ok(self.state.lock().registry.get(id)?.point().clone())
    }

    #[must_use]
    pub fn registered_ids(&self) -> BTreeSet<PointId> {
        self.state.lock().registry.ids().cloned().collect()
    }

    #[must_use]
    pub fn editing(&self) -> Option<PointId> {
        self.state.lock().registry.editing().cloned()
    }

    #[must_use]
    pub fn draft_state(&self) -> Option<DraftState> {
        self.state.lock().draft.as_ref().map(DraftOverlay::state)
    }

    /// The current projection of the store under the active filter and sort.
    #[must_use]
    pub fn visible_points(&self) -> Vec<Point> {
        let raw = self.points.points();
        let filter = self.filters.filter();
        let sort = self.current_sort();
        visible_points(&raw, filter, sort, self.clock.wall_now())
    }

    #[must_use]
    pub const fn blocker(&self) -> &BlockingWindow {
        &self.blocker
    }

    #[must_use]
    pub fn progress_indicator(&self) -> Indicator {
        self.blocker.indicator()
    }

    #[must_use]
    pub const fn points_model(&self) -> &Arc<PointsModel> {
        &self.points
    }

    #[must_use]
    pub const fn filter_model(&self) -> &Arc<FilterModel> {
        &self.filters
    }

    #[must_use]
    pub const fn key_events(&self) -> &KeyEvents {
        &self.keys
    }

    /// Snapshot of everything the host needs to draw the board.
    #[must_use]
    pub fn view_model(&self) -> BoardViewModel {
        let progress = self.blocker.indicator();
        let state = self.state.lock();

        let body = match &state.body {
            BoardBody::Loading => BodyView::Loading,
            BoardBody::Detached => BodyView::Detached,
            BoardBody::Empty { filter } => BodyView::Empty(EmptyState::for_filter(*filter)),
            BoardBody::Points { order } => BodyView::Points(
                order
                    .iter()
                    .filter_map(|id| state.registry.get(id).ok())
                    .map(|handle| PointRow::build(handle, &state.destinations, &state.offers))
                    .collect(),
            ),
        };
        let sort_bar = (!state.is_loading && state.body != BoardBody::Detached)
            .then(|| SortBar::new(state.sort));
        let trip_info = match &body {
            BodyView::Points(rows) => TripInfo::summarize(rows),
            BodyView::Loading | BodyView::Detached | BodyView::Empty(_) => None,
        };

        BoardViewModel {
            trip_info,
            sort_bar,
            body,
            draft: state.draft.as_ref().map(DraftOverlay::state),
            progress,
        }
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Board")
            .field("is_loading", &state.is_loading)
            .field("sort", &state.sort)
            .field("filter", &state.filter)
            .field("handles", &state.registry.len())
            .field("draft", &state.draft.as_ref().map(DraftOverlay::state))
            .field("blocker", &self.blocker)
            .finish_non_exhaustive()
    }
}
