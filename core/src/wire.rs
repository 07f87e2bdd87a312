//! Server-shaped records and their adaptation to the domain model.
//!
//! Identifiers may arrive as JSON numbers or strings; both are canonicalized
//! to strings here so nothing past this module compares mixed representations.
//! Timestamps are written back in UTC with only the fractional digits they carry.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::models::{
    Destination, DestinationId, NewPoint, Offer, OfferCatalog, OfferId, Picture, Point, PointId,
};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn optional_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

fn id_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<RawId>>::deserialize(deserializer)
        .map(|raw| raw.unwrap_or_default().into_iter().map(String::from).collect())
}

/// Format a timestamp the way the server expects it.
///
/// Fractional seconds keep exactly the digits they need, so a `Z` timestamp
/// comes back as it was received. `±hh:mm` offsets are normalised to `Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an ISO-8601 timestamp with offset
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, CoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| CoreError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Point as exchanged with the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerPoint {
    #[serde(
        default,
        deserialize_with = "optional_id_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub base_price: u32,
    pub date_from: String,
    pub date_to: String,
    #[serde(deserialize_with = "id_string")]
    pub destination: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, deserialize_with = "id_strings")]
    pub offers: Vec<String>,
    #[serde(rename = "type")]
    pub event_type: String,
}

impl TryFrom<ServerPoint> for Point {
    type Error = CoreError;

    fn try_from(server: ServerPoint) -> Result<Self, Self::Error> {
        let id = server.id.ok_or(CoreError::MissingId)?;
        let date_from = parse_timestamp(&server.date_from)?;
        let date_to = parse_timestamp(&server.date_to)?;

        if date_to < date_from {
            return Err(CoreError::InvertedDates(id));
        }

        Ok(Point {
            id: PointId::new(id),
            event_type: server.event_type.parse()?,
            destination_id: DestinationId::new(server.destination),
            date_from,
            date_to,
            base_price: server.base_price,
            offers: server.offers.into_iter().map(OfferId::new).collect(),
            is_favorite: server.is_favorite,
        })
    }
}

impl From<&Point> for ServerPoint {
    fn from(point: &Point) -> Self {
        ServerPoint {
            id: Some(point.id.to_string()),
            base_price: point.base_price,
            date_from: format_timestamp(&point.date_from),
            date_to: format_timestamp(&point.date_to),
            destination: point.destination_id.to_string(),
            is_favorite: point.is_favorite,
            offers: point.offers.iter().map(ToString::to_string).collect(),
            event_type: point.event_type.wire_name().to_string(),
        }
    }
}

impl From<&NewPoint> for ServerPoint {
    fn from(point: &NewPoint) -> Self {
        ServerPoint {
            id: None,
            base_price: point.base_price,
            date_from: format_timestamp(&point.date_from),
            date_to: format_timestamp(&point.date_to),
            destination: point.destination_id.to_string(),
            is_favorite: point.is_favorite,
            offers: point.offers.iter().map(ToString::to_string).collect(),
            event_type: point.event_type.wire_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerPicture {
    pub src: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDestination {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pictures: Vec<ServerPicture>,
}

impl From<ServerDestination> for Destination {
    fn from(server: ServerDestination) -> Self {
        Destination {
            id: DestinationId::new(server.id),
            name: server.name,
            description: server.description,
            pictures: server
                .pictures
                .into_iter()
                .map(|p| Picture {
                    src: p.src,
                    description: p.description,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerOffer {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    pub price: u32,
}

/// One entry of the `/offers` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerOfferGroup {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub offers: Vec<ServerOffer>,
}

impl From<Vec<ServerOfferGroup>> for OfferCatalog {
    fn from(groups: Vec<ServerOfferGroup>) -> Self {
        OfferCatalog::from_groups(groups.into_iter().map(|group| {
            let offers = group
                .offers
                .into_iter()
                .map(|o| Offer {
                    id: OfferId::new(o.id),
                    title: o.title,
                    price: o.price,
                })
                .collect();
            (group.event_type, offers)
        }))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::EventType;
    use serde_json::json;

    fn server_point() -> ServerPoint {
        serde_json::from_value(json!({
            "id": "0f3c",
            "base_price": 1100,
            "date_from": "2019-07-10T22:55:56.845Z",
            "date_to": "2019-07-11T11:22:13.375Z",
            "destination": "bfa5",
            "is_favorite": false,
            "offers": ["b4c3", 7],
            "type": "check-in"
        }))
        .unwrap()
    }

    #[test]
    fn test_point_round_trip_preserves_server_fields() {
        let original = server_point();
        let point = Point::try_from(original.clone()).unwrap();

        assert_eq!(point.event_type, EventType::CheckIn);
        assert_eq!(point.offers, vec![OfferId::from("b4c3"), OfferId::from("7")]);

        let back = ServerPoint::from(&point);
        assert_eq!(back, original);
    }

    #[test]
    fn test_type_is_lower_cased_on_the_wire() {
        let mut original = server_point();
        original.event_type = "Check-In".to_string();

        let point = Point::try_from(original).unwrap();
        let back = serde_json::to_value(ServerPoint::from(&point)).unwrap();

        assert_eq!(back["type"], "check-in");
    }

    #[test]
    fn test_timestamps_round_trip_exactly() {
        for stamp in [
            "2025-01-01T10:00:00Z",
            "2025-01-01T10:00:00.123456Z",
            "2019-07-10T22:55:56.845Z",
        ] {
            let mut original = server_point();
            original.date_from = stamp.to_string();
            original.date_to = "2030-01-01T00:00:00Z".to_string();

            let point = Point::try_from(original.clone()).unwrap();
            assert_eq!(ServerPoint::from(&point), original);
        }
    }

    #[test]
    fn test_offsets_are_normalised_to_utc() {
        let ts = parse_timestamp("2025-01-01T12:00:00+02:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2025-01-01T10:00:00Z");
    }

    #[test]
    fn test_numeric_ids_are_canonicalized() {
        let point: ServerPoint = serde_json::from_value(json!({
            "id": 12,
            "base_price": 5,
            "date_from": "2025-01-01T10:00:00.000Z",
            "date_to": "2025-01-01T11:00:00.000Z",
            "destination": 3,
            "type": "bus"
        }))
        .unwrap();

        assert_eq!(point.id.as_deref(), Some("12"));
        assert_eq!(point.destination, "3");
        assert!(point.offers.is_empty());
        assert!(!point.is_favorite);
    }

    #[test]
    fn test_inverted_dates_are_rejected() {
        let mut original = server_point();
        std::mem::swap(&mut original.date_from, &mut original.date_to);

        assert_eq!(
            Point::try_from(original),
            Err(CoreError::InvertedDates("0f3c".to_string()))
        );
    }

    #[test]
    fn test_new_point_serializes_without_id() {
        let point = Point::try_from(server_point()).unwrap();
        let new_point = NewPoint {
            event_type: point.event_type,
            destination_id: point.destination_id.clone(),
            date_from: point.date_from,
            date_to: point.date_to,
            base_price: point.base_price,
            offers: vec![],
            is_favorite: false,
        };

        let value = serde_json::to_value(ServerPoint::from(&new_point)).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["offers"], json!([]));
    }

    #[test]
    fn test_offer_groups_become_catalog() {
        let groups: Vec<ServerOfferGroup> = serde_json::from_value(json!([
            { "type": "Taxi", "offers": [{ "id": 1, "title": "Upgrade", "price": 120 }] },
            { "type": "bus", "offers": [] }
        ]))
        .unwrap();

        let catalog = OfferCatalog::from(groups);
        let taxi = catalog.offers_for(EventType::Taxi);
        assert_eq!(taxi.len(), 1);
        assert_eq!(taxi[0].id, OfferId::from("1"));
    }
}
