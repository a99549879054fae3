#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use futures_util::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tripline::app::{Board, KeyEvents, ManualClock, TimeLimits};
use tripline::domain::{
    Destination, NewPoint, Offer, OfferCatalog, Point, PointId, PointType, Result, TriplineError,
};
use tripline::store::{FilterModel, PointsApi, PointsModel};

/// Returns `Pending` once, waking itself, so joined futures interleave.
#[derive(Default)]
pub struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// In-memory api with failure injection and an operation log.
///
/// Every mutation logs `start <op>`, yields once, then logs `end <op>`.
#[derive(Default)]
pub struct FakeApi {
    points: Mutex<Vec<Point>>,
    destinations: Vec<Destination>,
    offers: Vec<OfferCatalog>,
    failing: Mutex<HashSet<&'static str>>,
    log: Mutex<Vec<String>>,
    next_id: Mutex<u32>,
}

impl FakeApi {
    pub fn with_points(points: Vec<Point>) -> Self {
        Self {
            points: Mutex::new(points),
            destinations: destinations(),
            offers: offers(),
            ..Self::default()
        }
    }

    /// Makes `op` (`points`, `update_point`, `add_point`, `delete_point`) fail until healed.
    pub fn fail(&self, op: &'static str) {
        self.failing.lock().insert(op);
    }

    pub fn heal(&self) {
        self.failing.lock().clear();
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    pub fn stored(&self) -> Vec<Point> {
        self.points.lock().clone()
    }

    fn check(&self, op: &'static str) -> Result<()> {
        if self.failing.lock().contains(op) {
            Err(TriplineError::Api(format!("{op} failed")))
        } else {
            Ok(())
        }
    }

    fn mutate<T, F>(&self, op: &'static str, apply: F) -> BoxFuture<'_, Result<T>>
    where
        T: Send + 'static,
        F: FnOnce(&Self) -> Result<T> + Send + 'static,
    {
        async move {
            self.log.lock().push(format!("start {op}"));
            YieldOnce::default().await;
            let result = self.check(op).and_then(|()| apply(self));
            self.log.lock().push(format!("end {op}"));
            result
        }
        .boxed()
    }
}

impl PointsApi for FakeApi {
    fn points(&self) -> BoxFuture<'_, Result<Vec<Point>>> {
        let result = self.check("points").map(|()| self.stored());
        async move { result }.boxed()
    }

    fn destinations(&self) -> BoxFuture<'_, Result<Vec<Destination>>> {
        let destinations = self.destinations.clone();
        async move { Ok(destinations) }.boxed()
    }

    fn offers(&self) -> BoxFuture<'_, Result<Vec<OfferCatalog>>> {
        let offers = self.offers.clone();
        async move { Ok(offers) }.boxed()
    }

    fn update_point(&self, point: Point) -> BoxFuture<'_, Result<Point>> {
        self.mutate("update_point", move |api| {
            let mut points = api.points.lock();
            let slot = points
                .iter_mut()
                .find(|existing| existing.id == point.id)
                .ok_or_else(|| TriplineError::Api(format!("unknown {}", point.id)))?;
            *slot = point.clone();
            Ok(point)
        })
    }

    fn add_point(&self, point: NewPoint) -> BoxFuture<'_, Result<Point>> {
        self.mutate("add_point", move |api| {
            let id = {
                let mut next = api.next_id.lock();
                *next += 1;
                PointId::new(format!("new-{}", *next))
            };
            let added = point.with_id(id);
            api.points.lock().insert(0, added.clone());
            Ok(added)
        })
    }

    fn delete_point(&self, id: PointId) -> BoxFuture<'_, Result<()>> {
        self.mutate("delete_point", move |api| {
            api.points.lock().retain(|existing| existing.id != id);
            Ok(())
        })
    }
}

pub fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
}

/// A point starting `start_days` from [`origin`] and lasting `hours`.
pub fn point(id: &str, start_days: i64, hours: i64, price: u32) -> Point {
    let date_from = origin() + TimeDelta::days(start_days);
    Point {
        id: PointId::new(id),
        kind: PointType::Flight,
        destination: "ams".into(),
        date_from,
        date_to: date_from + TimeDelta::hours(hours),
        base_price: price,
        offers: vec![],
        is_favorite: false,
    }
}

pub fn new_point(price: u32) -> NewPoint {
    NewPoint {
        kind: PointType::Taxi,
        destination: "gva".into(),
        date_from: origin() + TimeDelta::days(1),
        date_to: origin() + TimeDelta::days(1) + TimeDelta::hours(1),
        base_price: price,
        offers: vec!["taxi-comfort".into()],
        is_favorite: false,
    }
}

pub fn destinations() -> Vec<Destination> {
    vec![
        Destination {
            id: "ams".into(),
            name: "Amsterdam".into(),
            description: "Canals".into(),
            pictures: vec![],
        },
        Destination {
            id: "gva".into(),
            name: "Geneva".into(),
            description: "Lake".into(),
            pictures: vec![],
        },
    ]
}

pub fn offers() -> Vec<OfferCatalog> {
    vec![OfferCatalog {
        kind: PointType::Taxi,
        offers: vec![Offer {
            id: "taxi-comfort".into(),
            title: "Comfort class".into(),
            price: 40,
        }],
    }]
}

/// Three points: past (a), present (b), future (c), with distinct prices.
pub fn sample_points() -> Vec<Point> {
    vec![point("c", 3, 5, 50), point("a", -3, 1, 10), point("b", 0, 2, 30)]
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub points: Arc<PointsModel>,
    pub filters: Arc<FilterModel>,
    pub keys: KeyEvents,
    pub clock: Arc<ManualClock>,
    pub board: Arc<Board>,
}

impl Harness {
    /// A board over `points`, still in its loading state.
    pub fn new(points: Vec<Point>) -> Self {
        let api = Arc::new(FakeApi::with_points(points));
        let model = Arc::new(PointsModel::new(api.clone()));
        let filters = Arc::new(FilterModel::new());
        let keys = KeyEvents::new();
        let clock = Arc::new(ManualClock::new(origin()));
        let board = Board::new(
            Arc::clone(&model),
            Arc::clone(&filters),
            keys.clone(),
            clock.clone(),
            TimeLimits::default(),
        );
        Self {
            api,
            points: model,
            filters,
            keys,
            clock,
            board,
        }
    }

    /// A board that has received its Init notification.
    pub fn loaded(points: Vec<Point>) -> Self {
        let harness = Self::new(points);
        futures::executor::block_on(harness.points.init());
        harness
    }

    pub fn visible_ids(&self) -> Vec<String> {
        self.board
            .visible_points()
            .into_iter()
            .map(|point| point.id.to_string())
            .collect()
    }

    pub fn registered(&self) -> Vec<String> {
        self.board
            .registered_ids()
            .into_iter()
            .map(|id| id.to_string())
            .collect()
    }
}

pub fn id(raw: &str) -> PointId {
    PointId::new(raw)
}
