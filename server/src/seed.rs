use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use tripboard_core::{Destination, DestinationId, EventType, Offer, OfferId, Picture, Point, PointId};
use ulid::Ulid;

use crate::{errors::ApplicationError, state::Store};

const CITIES: [(&str, &str); 7] = [
    ("Geneva", "Geneva sits where the Rhone leaves the lake, with the Alps on the horizon."),
    ("Paris", "Paris is best explored on foot along the Seine."),
    ("Amsterdam", "Amsterdam is a city of canals, bridges and narrow gabled houses."),
    ("Chamonix", "Chamonix lies at the foot of Mont Blanc."),
    ("London", "London mixes royal parks with busy markets."),
    ("Berlin", "Berlin is known for its galleries and long summer evenings."),
    ("Madrid", "Madrid dines late and walks everywhere."),
];

/// Which data the store starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Seed {
    /// Catalog plus a few points around the current time
    #[default]
    Demo,
    /// Catalog only
    Empty,
}

impl FromStr for Seed {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "demo" => Ok(Seed::Demo),
            "empty" => Ok(Seed::Empty),
            other => Err(ApplicationError::Config(format!(
                "TRIPBOARD_SEED must be 'demo' or 'empty', got '{}'",
                other
            ))),
        }
    }
}

pub fn destinations() -> Vec<Destination> {
    CITIES
        .iter()
        .enumerate()
        .map(|(index, (name, description))| Destination {
            id: DestinationId::new((index + 1).to_string()),
            name: name.to_string(),
            description: description.to_string(),
            pictures: (0..2)
                .map(|n| Picture {
                    src: format!("https://loremflickr.com/248/152?random={}", index * 10 + n),
                    description: format!("{} photo", name),
                })
                .collect(),
        })
        .collect()
}

pub fn offers() -> Vec<(EventType, Vec<Offer>)> {
    let offer = |id: &str, title: &str, price| Offer {
        id: OfferId::from(id),
        title: title.to_string(),
        price,
    };

    EventType::ALL
        .into_iter()
        .map(|event_type| {
            let offers = match event_type {
                EventType::Taxi => vec![
                    offer("luggage", "Add luggage", 20),
                    offer("comfort", "Switch to comfort class", 50),
                ],
                EventType::Bus => vec![offer("seat", "Choose seat", 5)],
                EventType::Train => vec![
                    offer("meal", "Add meal", 15),
                    offer("comfort", "Switch to comfort class", 80),
                ],
                EventType::Ship => vec![offer("cabin", "Upgrade to private cabin", 100)],
                EventType::Drive => vec![offer("gps", "Add GPS", 10)],
                EventType::Flight => vec![
                    offer("luggage", "Add luggage", 30),
                    offer("comfort", "Switch to comfort class", 100),
                    offer("meal", "Add meal", 15),
                    offer("seats", "Choose seats", 5),
                ],
                EventType::Restaurant => vec![offer("reservation", "Table reservation", 10)],
                EventType::CheckIn | EventType::Sightseeing => vec![],
            };
            (event_type, offers)
        })
        .collect()
}

/// Points spread so that past, present and future all have members
pub fn points(now: DateTime<Utc>) -> Vec<Point> {
    let point = |event_type, destination: &str, start_hours: i64, length_minutes: i64| {
        let date_from = now + Duration::hours(start_hours);
        Point {
            id: PointId::new(Ulid::new().to_string()),
            event_type,
            destination_id: DestinationId::from(destination),
            date_from,
            date_to: date_from + Duration::minutes(length_minutes),
            base_price: 0,
            offers: vec![],
            is_favorite: false,
        }
    };

    let mut flight = point(EventType::Flight, "1", -240, 95);
    flight.base_price = 320;
    flight.offers = vec![OfferId::from("luggage"), OfferId::from("meal")];

    let mut check_in = point(EventType::CheckIn, "2", -236, 60 * 24 * 3);
    check_in.base_price = 540;
    check_in.is_favorite = true;

    let mut sightseeing = point(EventType::Sightseeing, "4", -2, 300);
    sightseeing.base_price = 60;

    let mut train = point(EventType::Train, "3", 30, 250);
    train.base_price = 110;
    train.offers = vec![OfferId::from("comfort")];

    let mut restaurant = point(EventType::Restaurant, "3", 36, 120);
    restaurant.base_price = 85;
    restaurant.offers = vec![OfferId::from("reservation")];
    restaurant.is_favorite = true;

    let mut taxi = point(EventType::Taxi, "6", 100, 40);
    taxi.base_price = 35;

    vec![flight, check_in, sightseeing, train, restaurant, taxi]
}

pub fn store(seed: Seed, now: DateTime<Utc>) -> Store {
    let points = match seed {
        Seed::Demo => points(now),
        Seed::Empty => vec![],
    };
    Store::new(points, destinations(), offers())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tripboard_core::{Catalog, Destinations, FilterType, OfferCatalog};

    #[test]
    fn test_seed_is_parsed_case_insensitively() {
        assert_eq!("Demo".parse::<Seed>().unwrap(), Seed::Demo);
        assert_eq!(" empty ".parse::<Seed>().unwrap(), Seed::Empty);
        assert!("full".parse::<Seed>().is_err());
    }

    #[test]
    fn test_demo_points_cover_every_filter() {
        let now = Utc::now();
        let points = points(now);

        for filter in FilterType::ALL {
            assert!(
                points.iter().any(|p| filter.matches(p, now)),
                "{:?} has no members",
                filter
            );
        }
    }

    #[test]
    fn test_demo_points_reference_the_catalog() {
        let catalog = Catalog::new(
            Destinations::new(destinations()),
            OfferCatalog::from_groups(
                offers()
                    .into_iter()
                    .map(|(kind, offers)| (kind.wire_name(), offers)),
            ),
        );

        for point in points(Utc::now()) {
            assert!(catalog.destinations.contains(&point.destination_id));
            assert_eq!(catalog.offers_for(&point).len(), point.offers.len());
        }
    }
}
