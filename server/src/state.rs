use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;
use tripboard_core::{Destination, Destinations, EventType, Offer, Point, PointId};
use ulid::Ulid;

use crate::{
    errors::{RestError, RestResult},
    model::point::PointDto,
};

/// Everything the API serves, kept in memory
#[derive(Debug, Default)]
pub struct Store {
    points: Vec<Point>,
    destinations: Destinations,
    offers: Vec<(EventType, Vec<Offer>)>,
}

impl Store {
    pub fn new(
        points: Vec<Point>,
        destinations: Vec<Destination>,
        offers: Vec<(EventType, Vec<Offer>)>,
    ) -> Self {
        Self {
            points,
            destinations: Destinations::new(destinations),
            offers,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn destinations(&self) -> &Destinations {
        &self.destinations
    }

    pub fn offers(&self) -> &[(EventType, Vec<Offer>)] {
        &self.offers
    }

    fn offers_for(&self, event_type: EventType) -> &[Offer] {
        self.offers
            .iter()
            .find(|(kind, _)| *kind == event_type)
            .map(|(_, offers)| offers.as_slice())
            .unwrap_or(&[])
    }

    /// Reject points referring to things the catalog does not know
    fn check_references(&self, point: &Point) -> RestResult<()> {
        if !self.destinations.contains(&point.destination_id) {
            return Err(RestError::BadRequest(format!(
                "unknown destination '{}'",
                point.destination_id
            )));
        }

        let available = self.offers_for(point.event_type);
        if let Some(offer) = point
            .offers
            .iter()
            .find(|id| !available.iter().any(|o| &o.id == *id))
        {
            return Err(RestError::BadRequest(format!(
                "offer '{}' is not available for {}",
                offer,
                point.event_type.wire_name()
            )));
        }

        Ok(())
    }

    pub fn create_point(&mut self, dto: PointDto) -> RestResult<Point> {
        let point = dto.into_point(Ulid::new().to_string())?;
        self.check_references(&point)?;

        debug!("Creating point {}", point.id);
        self.points.push(point.clone());
        Ok(point)
    }

    pub fn update_point(&mut self, id: &str, dto: PointDto) -> RestResult<Point> {
        let point = dto.into_point(id.to_string())?;
        self.check_references(&point)?;

        let stored = self
            .points
            .iter_mut()
            .find(|p| p.id.as_str() == id)
            .ok_or_else(|| RestError::NotFound(format!("Point {}", id)))?;

        debug!("Updating point {}", id);
        *stored = point.clone();
        Ok(point)
    }

    pub fn delete_point(&mut self, id: &str) -> RestResult<PointId> {
        let index = self
            .points
            .iter()
            .position(|p| p.id.as_str() == id)
            .ok_or_else(|| RestError::NotFound(format!("Point {}", id)))?;

        debug!("Deleting point {}", id);
        Ok(self.points.remove(index).id)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn store(&self) -> RestResult<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|e| RestError::Internal(format!("Store lock poisoned: {}", e)))
    }
}
