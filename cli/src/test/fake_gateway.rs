use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tripboard_core::{
    Destination, DestinationId, EventType, NewPoint, Offer, OfferCatalog, OfferId, Point, PointId,
};

use crate::gateway::{Gateway, GatewayError};

#[derive(Default)]
pub struct FakeState {
    pub points: Vec<Point>,
    pub destinations: Vec<Destination>,
    pub offers: OfferCatalog,
    pub fail_load: bool,
    /// Fail every create/update/delete while set
    pub fail_mutations: bool,
    /// Simulated round trip of mutations
    pub latency: Option<Duration>,
    pub calls: Vec<String>,
    next_id: u32,
}

/// In-memory gateway; clones share state so tests can inspect and steer it
#[derive(Clone, Default)]
pub struct FakeGateway(pub Rc<RefCell<FakeState>>);

impl FakeGateway {
    pub fn new(points: Vec<Point>) -> Self {
        let gateway = Self::default();
        {
            let mut state = gateway.0.borrow_mut();
            state.points = points;
            state.destinations = destinations();
            state.offers = offers();
        }
        gateway
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.borrow().calls.clone()
    }

    pub fn mutation_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("list"))
            .collect()
    }

    pub fn set_fail_mutations(&self, fail: bool) {
        self.0.borrow_mut().fail_mutations = fail;
    }

    pub fn stored(&self, id: &str) -> Option<Point> {
        self.0
            .borrow()
            .points
            .iter()
            .find(|p| p.id.as_str() == id)
            .cloned()
    }

    fn record(&self, call: String) {
        self.0.borrow_mut().calls.push(call);
    }

    async fn mutation(&self, method: &str, path: String) -> Result<(), GatewayError> {
        self.record(format!("{} {}", method, path));

        let latency = self.0.borrow().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.0.borrow().fail_mutations {
            return Err(GatewayError::Status {
                method: method.to_string(),
                path,
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl Gateway for FakeGateway {
    async fn list_points(&self) -> Result<Vec<Point>, GatewayError> {
        self.record("list points".to_string());
        let state = self.0.borrow();
        if state.fail_load {
            return Err(GatewayError::Status {
                method: "GET".to_string(),
                path: "points".to_string(),
                status: 503,
            });
        }
        Ok(state.points.clone())
    }

    async fn list_destinations(&self) -> Result<Vec<Destination>, GatewayError> {
        self.record("list destinations".to_string());
        Ok(self.0.borrow().destinations.clone())
    }

    async fn list_offer_catalog(&self) -> Result<OfferCatalog, GatewayError> {
        self.record("list offers".to_string());
        Ok(self.0.borrow().offers.clone())
    }

    async fn create_point(&self, point: &NewPoint) -> Result<Point, GatewayError> {
        self.mutation("POST", "points".to_string()).await?;

        let mut state = self.0.borrow_mut();
        state.next_id += 1;
        let created = point
            .clone()
            .with_id(PointId::new(format!("srv-{}", state.next_id)));
        state.points.push(created.clone());
        Ok(created)
    }

    async fn update_point(&self, point: &Point) -> Result<Point, GatewayError> {
        let path = format!("points/{}", point.id);
        self.mutation("PUT", path.clone()).await?;

        let mut state = self.0.borrow_mut();
        match state.points.iter_mut().find(|p| p.id == point.id) {
            Some(stored) => {
                *stored = point.clone();
                Ok(point.clone())
            }
            None => Err(GatewayError::Status {
                method: "PUT".to_string(),
                path,
                status: 404,
            }),
        }
    }

    async fn delete_point(&self, id: &PointId) -> Result<(), GatewayError> {
        let path = format!("points/{}", id);
        self.mutation("DELETE", path.clone()).await?;

        let mut state = self.0.borrow_mut();
        let before = state.points.len();
        state.points.retain(|p| &p.id != id);
        if state.points.len() == before {
            return Err(GatewayError::Status {
                method: "DELETE".to_string(),
                path,
                status: 404,
            });
        }
        Ok(())
    }
}

pub fn destinations() -> Vec<Destination> {
    [("gva", "Geneva"), ("par", "Paris"), ("ams", "Amsterdam")]
        .into_iter()
        .map(|(id, name)| Destination {
            id: DestinationId::from(id),
            name: name.to_string(),
            description: format!("{} is a lovely city", name),
            pictures: vec![],
        })
        .collect()
}

pub fn offers() -> OfferCatalog {
    let offer = |id: &str, title: &str, price| Offer {
        id: OfferId::from(id),
        title: title.to_string(),
        price,
    };

    OfferCatalog::from_groups(vec![
        (
            "flight",
            vec![offer("luggage", "Add luggage", 30), offer("comfort", "Comfort class", 100)],
        ),
        ("taxi", vec![offer("upgrade", "Upgrade to business", 50)]),
    ])
}

pub fn point(id: &str, destination: &str, from: DateTime<Utc>, hours: i64, price: u32) -> Point {
    Point {
        id: PointId::from(id),
        event_type: EventType::Flight,
        destination_id: DestinationId::from(destination),
        date_from: from,
        date_to: from + chrono::Duration::hours(hours),
        base_price: price,
        offers: vec![],
        is_favorite: false,
    }
}

pub fn ts(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}
