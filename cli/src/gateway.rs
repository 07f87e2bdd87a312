use async_trait::async_trait;
use thiserror::Error;
use tripboard_core::{CoreError, Destination, NewPoint, OfferCatalog, Point, PointId};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {path} is not valid JSON: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {path} returned {status}")]
    Status {
        method: String,
        path: String,
        status: u16,
    },
    #[error("server sent an invalid point: {0}")]
    Invalid(#[from] CoreError),
}

/// Remote CRUD operations the trip model depends on.
///
/// Results are already adapted to domain types.
#[async_trait(?Send)]
pub trait Gateway {
    async fn list_points(&self) -> Result<Vec<Point>, GatewayError>;

    async fn list_destinations(&self) -> Result<Vec<Destination>, GatewayError>;

    async fn list_offer_catalog(&self) -> Result<OfferCatalog, GatewayError>;

    /// Returns the stored point with its server-assigned id
    async fn create_point(&self, point: &NewPoint) -> Result<Point, GatewayError>;

    async fn update_point(&self, point: &Point) -> Result<Point, GatewayError>;

    async fn delete_point(&self, id: &PointId) -> Result<(), GatewayError>;
}
