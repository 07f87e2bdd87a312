use serde::Serialize;

use crate::format;
use crate::models::{Catalog, Point};
use crate::sort::SortType;

/// Route title, date range and total cost of the whole trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripInfo {
    pub title: String,
    pub dates: String,
    pub cost: u64,
}

impl TripInfo {
    /// Summarize all points; `None` when there is nothing to summarize
    pub fn compute(points: &[Point], catalog: &Catalog) -> Option<TripInfo> {
        let mut points = points.to_vec();
        SortType::Day.sort(&mut points);

        let first = points.first()?;
        let last = points.last()?;

        let names: Vec<&str> = points
            .iter()
            .map(|p| catalog.destination_for(p).name.as_str())
            .filter(|name| !name.is_empty())
            .collect();

        let title = match names.as_slice() {
            [head, .., tail] if names.len() > 3 => format!("{} — ... — {}", head, tail),
            _ => names.join(" — "),
        };

        let cost = points
            .iter()
            .map(|p| {
                let offers: u64 = catalog
                    .offers_for(p)
                    .iter()
                    .map(|o| u64::from(o.price))
                    .sum();
                u64::from(p.base_price) + offers
            })
            .sum();

        Some(TripInfo {
            title,
            dates: format::trip_dates(&first.date_from, &last.date_to),
            cost,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::{
        Destination, DestinationId, Destinations, EventType, Offer, OfferCatalog, OfferId, PointId,
    };
    use chrono::{DateTime, Duration, Utc};

    fn catalog() -> Catalog {
        let destinations = ["Geneva", "Paris", "Amsterdam", "Chamonix"]
            .iter()
            .enumerate()
            .map(|(i, name)| Destination {
                id: DestinationId::new(i.to_string()),
                name: name.to_string(),
                description: String::new(),
                pictures: vec![],
            })
            .collect();
        let offers = OfferCatalog::from_groups(vec![(
            "taxi",
            vec![Offer {
                id: OfferId::from("comfort"),
                title: "Switch to comfort class".to_string(),
                price: 50,
            }],
        )]);
        Catalog::new(Destinations::new(destinations), offers)
    }

    fn point(id: &str, destination: usize, day: u32, offers: &[&str]) -> Point {
        let date_from: DateTime<Utc> = format!("2025-03-{:02}T10:00:00Z", day).parse().unwrap();
        Point {
            id: PointId::from(id),
            event_type: EventType::Taxi,
            destination_id: DestinationId::new(destination.to_string()),
            date_from,
            date_to: date_from + Duration::hours(2),
            base_price: 100,
            offers: offers.iter().map(|o| OfferId::from(*o)).collect(),
            is_favorite: false,
        }
    }

    #[test]
    fn test_empty_trip_has_no_summary() {
        assert_eq!(TripInfo::compute(&[], &catalog()), None);
    }

    #[test]
    fn test_short_route_lists_every_city() {
        let points = vec![point("2", 1, 20, &[]), point("1", 0, 18, &["comfort"])];

        let info = TripInfo::compute(&points, &catalog()).unwrap();
        assert_eq!(info.title, "Geneva — Paris");
        assert_eq!(info.dates, "18 MAR — 20");
        assert_eq!(info.cost, 250);
    }

    #[test]
    fn test_long_route_is_collapsed() {
        let points = vec![
            point("1", 0, 1, &[]),
            point("2", 1, 2, &[]),
            point("3", 2, 3, &[]),
            point("4", 3, 4, &[]),
            point("5", 99, 5, &["unknown"]),
        ];

        let info = TripInfo::compute(&points, &catalog()).unwrap();
        assert_eq!(info.title, "Geneva — ... — Chamonix");
        assert_eq!(info.cost, 500);
    }
}
