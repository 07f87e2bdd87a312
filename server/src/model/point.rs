use serde::{Deserialize, Serialize};
use tripboard_core::{Point, ServerPoint};

/// Point as exchanged over the REST API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PointDto {
    /// Server-assigned ULID, absent in creation requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub base_price: u32,
    /// ISO-8601 instant
    pub date_from: String,
    /// ISO-8601 instant, not before `date_from`
    pub date_to: String,
    /// Destination id
    pub destination: String,
    #[serde(default)]
    pub is_favorite: bool,
    /// Offer ids valid for `type`
    #[serde(default)]
    pub offers: Vec<String>,
    /// Event type, case-insensitive on input and lower-case on output
    #[serde(rename = "type")]
    pub event_type: String,
}

impl PointDto {
    /// Validate the payload and bind it to `id`
    pub fn into_point(self, id: String) -> Result<Point, tripboard_core::CoreError> {
        Point::try_from(ServerPoint {
            id: Some(id),
            base_price: self.base_price,
            date_from: self.date_from,
            date_to: self.date_to,
            destination: self.destination,
            is_favorite: self.is_favorite,
            offers: self.offers,
            event_type: self.event_type,
        })
    }
}

impl From<&Point> for PointDto {
    fn from(point: &Point) -> Self {
        let server = ServerPoint::from(point);
        PointDto {
            id: server.id,
            base_price: server.base_price,
            date_from: server.date_from,
            date_to: server.date_to,
            destination: server.destination,
            is_favorite: server.is_favorite,
            offers: server.offers,
            event_type: server.event_type,
        }
    }
}
