use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Server-assigned point identifier
    PointId
);
string_id!(DestinationId);
string_id!(OfferId);

/// Kind of travel event a point describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Taxi,
    Bus,
    Train,
    Ship,
    Drive,
    #[default]
    Flight,
    CheckIn,
    Sightseeing,
    Restaurant,
}

impl EventType {
    /// All event types in the order the type picker lists them
    pub const ALL: [EventType; 9] = [
        EventType::Taxi,
        EventType::Bus,
        EventType::Train,
        EventType::Ship,
        EventType::Drive,
        EventType::Flight,
        EventType::CheckIn,
        EventType::Sightseeing,
        EventType::Restaurant,
    ];

    /// Lower-case name used on the wire and as the offer catalog key
    pub fn wire_name(self) -> &'static str {
        match self {
            EventType::Taxi => "taxi",
            EventType::Bus => "bus",
            EventType::Train => "train",
            EventType::Ship => "ship",
            EventType::Drive => "drive",
            EventType::Flight => "flight",
            EventType::CheckIn => "check-in",
            EventType::Sightseeing => "sightseeing",
            EventType::Restaurant => "restaurant",
        }
    }

    /// Title-case name for display
    pub fn label(self) -> &'static str {
        match self {
            EventType::Taxi => "Taxi",
            EventType::Bus => "Bus",
            EventType::Train => "Train",
            EventType::Ship => "Ship",
            EventType::Drive => "Drive",
            EventType::Flight => "Flight",
            EventType::CheckIn => "Check-in",
            EventType::Sightseeing => "Sightseeing",
            EventType::Restaurant => "Restaurant",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventType {
    type Err = CoreError;

    /// Case-insensitive; accepts both "Check-in" and "check-in"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        EventType::ALL
            .into_iter()
            .find(|t| t.wire_name() == normalized)
            .ok_or_else(|| CoreError::UnknownEventType(s.to_string()))
    }
}

/// A single travel event of the itinerary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub event_type: EventType,
    pub destination_id: DestinationId,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub base_price: u32,
    pub offers: Vec<OfferId>,
    pub is_favorite: bool,
}

impl Point {
    pub fn duration(&self) -> Duration {
        self.date_to - self.date_from
    }

    /// Copy of the point with `is_favorite` flipped
    pub fn toggled_favorite(&self) -> Point {
        Point {
            is_favorite: !self.is_favorite,
            ..self.clone()
        }
    }
}

/// Validated point data that has not been saved yet (no server id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPoint {
    pub event_type: EventType,
    pub destination_id: DestinationId,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub base_price: u32,
    pub offers: Vec<OfferId>,
    pub is_favorite: bool,
}

impl NewPoint {
    pub fn with_id(self, id: PointId) -> Point {
        Point {
            id,
            event_type: self.event_type,
            destination_id: self.destination_id,
            date_from: self.date_from,
            date_to: self.date_to,
            base_price: self.base_price,
            offers: self.offers,
            is_favorite: self.is_favorite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub src: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
    pub description: String,
    pub pictures: Vec<Picture>,
}

impl Destination {
    /// Whether there is anything to show in the destination details section
    pub fn has_details(&self) -> bool {
        !self.description.is_empty() || !self.pictures.is_empty()
    }
}

/// Returned for lookups that miss, so consumers never branch on absence
static EMPTY_DESTINATION: Destination = Destination {
    id: DestinationId(String::new()),
    name: String::new(),
    description: String::new(),
    pictures: Vec::new(),
};

/// Read-only destination cache
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Destinations(Vec<Destination>);

impl Destinations {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self(destinations)
    }

    /// Look up by id, falling back to an empty placeholder
    pub fn get(&self, id: &DestinationId) -> &Destination {
        self.0
            .iter()
            .find(|d| &d.id == id)
            .unwrap_or(&EMPTY_DESTINATION)
    }

    pub fn contains(&self, id: &DestinationId) -> bool {
        self.0.iter().any(|d| &d.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Destination> {
        self.0.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub price: u32,
}

/// Offers available per event type, keyed by the lower-cased type name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OfferCatalog(HashMap<String, Vec<Offer>>);

impl OfferCatalog {
    /// Build from `(type, offers)` groups; later groups for the same type win
    pub fn from_groups<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Offer>)>,
        S: AsRef<str>,
    {
        Self(
            groups
                .into_iter()
                .map(|(kind, offers)| (kind.as_ref().to_lowercase(), offers))
                .collect(),
        )
    }

    pub fn offers_for(&self, event_type: EventType) -> &[Offer] {
        self.0
            .get(event_type.wire_name())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve selected offer ids to catalog entries, in catalog order
    pub fn resolve(&self, event_type: EventType, selected: &[OfferId]) -> Vec<&Offer> {
        self.offers_for(event_type)
            .iter()
            .filter(|offer| selected.contains(&offer.id))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Destinations and offers, loaded once at startup and immutable afterwards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub destinations: Destinations,
    pub offers: OfferCatalog,
}

impl Catalog {
    pub fn new(destinations: Destinations, offers: OfferCatalog) -> Self {
        Self {
            destinations,
            offers,
        }
    }

    pub fn destination_for(&self, point: &Point) -> &Destination {
        self.destinations.get(&point.destination_id)
    }

    pub fn offers_for(&self, point: &Point) -> Vec<&Offer> {
        self.offers.resolve(point.event_type, &point.offers)
    }
}

/// Blast radius of a model change, dictating re-render granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpdateType {
    /// A single point changed in place
    Patch,
    /// The visible list must be rebuilt
    Minor,
    /// The list must be rebuilt and sorting reset
    Major,
    /// Initial load finished
    Init,
}
