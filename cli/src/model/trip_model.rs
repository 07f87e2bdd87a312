use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};
use tripboard_core::{Catalog, Destinations, NewPoint, Point, PointId, UpdateType};

use super::filter_model::FilterModel;
use super::observers::{ObserverId, Observers};
use crate::gateway::{Gateway, GatewayError};

#[derive(Debug, Error)]
pub enum TripError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// The local collection and the server disagree about which points exist
    #[error("point {0} is not in the local collection")]
    UnknownPoint(PointId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelPayload {
    Point(Point),
    Deleted { id: PointId },
    Init { is_error: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEvent {
    pub update_type: UpdateType,
    pub payload: ModelPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

/// Owns the point collection and mediates every mutation through the gateway.
///
/// Mutations are confirm-then-apply: the local collection only changes after
/// the server accepted the request, and observers are notified afterwards.
pub struct TripModel {
    gateway: Box<dyn Gateway>,
    filter: Rc<FilterModel>,
    points: RefCell<Vec<Point>>,
    catalog: RefCell<Rc<Catalog>>,
    load_state: Cell<LoadState>,
    observers: Observers<ModelEvent>,
}

impl TripModel {
    pub fn new(gateway: impl Gateway + 'static, filter: Rc<FilterModel>) -> Self {
        Self {
            gateway: Box::new(gateway),
            filter,
            points: RefCell::new(Vec::new()),
            catalog: RefCell::new(Rc::new(Catalog::default())),
            load_state: Cell::new(LoadState::Loading),
            observers: Observers::default(),
        }
    }

    /// Load destinations, offers and points concurrently.
    ///
    /// Any failure leaves all three empty and is reported through the INIT event.
    pub async fn init(&self) {
        let (destinations, offers, points) = tokio::join!(
            self.gateway.list_destinations(),
            self.gateway.list_offer_catalog(),
            self.gateway.list_points()
        );

        let is_error = match (destinations, offers, points) {
            (Ok(destinations), Ok(offers), Ok(points)) => {
                info!(
                    "Loaded {} points, {} destinations",
                    points.len(),
                    destinations.len()
                );
                *self.catalog.borrow_mut() =
                    Rc::new(Catalog::new(Destinations::new(destinations), offers));
                *self.points.borrow_mut() = dedupe(points);
                self.load_state.set(LoadState::Ready);
                false
            }
            (destinations, offers, points) => {
                for error in [destinations.err(), offers.err(), points.err()]
                    .into_iter()
                    .flatten()
                {
                    warn!("Initial load failed: {}", error);
                }
                *self.catalog.borrow_mut() = Rc::new(Catalog::default());
                self.points.borrow_mut().clear();
                self.load_state.set(LoadState::Failed);
                true
            }
        };

        self.observers.notify(&ModelEvent {
            update_type: UpdateType::Init,
            payload: ModelPayload::Init { is_error },
        });
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state.get()
    }

    pub fn catalog(&self) -> Rc<Catalog> {
        Rc::clone(&self.catalog.borrow())
    }

    /// Points matching the current filter, evaluated against the current time
    pub fn visible_points(&self) -> Vec<Point> {
        self.visible_points_at(Utc::now())
    }

    pub fn visible_points_at(&self, now: DateTime<Utc>) -> Vec<Point> {
        self.filter.filter().apply(&self.points.borrow(), now)
    }

    pub fn all_points(&self) -> Vec<Point> {
        self.points.borrow().clone()
    }

    pub fn point(&self, id: &PointId) -> Option<Point> {
        self.points.borrow().iter().find(|p| &p.id == id).cloned()
    }

    pub async fn update_point(
        &self,
        update_type: UpdateType,
        point: Point,
    ) -> Result<Point, TripError> {
        self.ensure_known(&point.id)?;

        let updated = self.gateway.update_point(&point).await?;
        debug!("Point {} updated", updated.id);

        {
            let mut points = self.points.borrow_mut();
            let index = points
                .iter()
                .position(|p| p.id == point.id)
                .ok_or_else(|| TripError::UnknownPoint(point.id.clone()))?;
            points[index] = updated.clone();
        }

        self.notify(update_type, ModelPayload::Point(updated.clone()));
        Ok(updated)
    }

    pub async fn add_point(
        &self,
        update_type: UpdateType,
        point: NewPoint,
    ) -> Result<Point, TripError> {
        let created = self.gateway.create_point(&point).await?;
        debug!("Point {} created", created.id);

        {
            let mut points = self.points.borrow_mut();
            if points.iter().any(|p| p.id == created.id) {
                warn!("Server reused id {}; replacing the stale entry", created.id);
                points.retain(|p| p.id != created.id);
            }
            points.insert(0, created.clone());
        }

        self.notify(update_type, ModelPayload::Point(created.clone()));
        Ok(created)
    }

    pub async fn delete_point(&self, update_type: UpdateType, id: &PointId) -> Result<(), TripError> {
        self.ensure_known(id)?;

        self.gateway.delete_point(id).await?;
        debug!("Point {} deleted", id);

        {
            let mut points = self.points.borrow_mut();
            let before = points.len();
            points.retain(|p| &p.id != id);
            if points.len() == before {
                return Err(TripError::UnknownPoint(id.clone()));
            }
        }

        self.notify(update_type, ModelPayload::Deleted { id: id.clone() });
        Ok(())
    }

    pub fn add_observer(&self, observer: impl Fn(&ModelEvent) + 'static) -> ObserverId {
        self.observers.add(observer)
    }

    pub fn remove_observer(&self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    fn ensure_known(&self, id: &PointId) -> Result<(), TripError> {
        if self.points.borrow().iter().any(|p| &p.id == id) {
            Ok(())
        } else {
            warn!("Point {} is unknown locally", id);
            Err(TripError::UnknownPoint(id.clone()))
        }
    }

    fn notify(&self, update_type: UpdateType, payload: ModelPayload) {
        self.observers.notify(&ModelEvent {
            update_type,
            payload,
        });
    }
}

/// Keep the first occurrence of every id
fn dedupe(points: Vec<Point>) -> Vec<Point> {
    let mut unique: Vec<Point> = Vec::with_capacity(points.len());
    for point in points {
        if unique.iter().any(|p| p.id == point.id) {
            warn!("Dropping duplicate point {}", point.id);
        } else {
            unique.push(point);
        }
    }
    unique
}
