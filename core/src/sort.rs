use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Point, PointId};

/// Ordering key applied to the visible point set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    #[default]
    Day,
    Event,
    Time,
    Price,
    Offer,
}

impl SortType {
    /// Options in the order the sort bar shows them
    pub const ALL: [SortType; 5] = [
        SortType::Day,
        SortType::Event,
        SortType::Time,
        SortType::Price,
        SortType::Offer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortType::Day => "day",
            SortType::Event => "event",
            SortType::Time => "time",
            SortType::Price => "price",
            SortType::Offer => "offer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortType::Day => "Day",
            SortType::Event => "Event",
            SortType::Time => "Time",
            SortType::Price => "Price",
            SortType::Offer => "Offers",
        }
    }

    /// Event and Offers are shown but can never be selected
    pub fn is_enabled(self) -> bool {
        matches!(self, SortType::Day | SortType::Time | SortType::Price)
    }

    pub fn compare(self, a: &Point, b: &Point) -> Ordering {
        match self {
            SortType::Day => a
                .date_from
                .cmp(&b.date_from)
                .then_with(|| compare_ids(&a.id, &b.id)),
            SortType::Time => b.duration().cmp(&a.duration()),
            SortType::Price => b.base_price.cmp(&a.base_price),
            SortType::Event | SortType::Offer => Ordering::Equal,
        }
    }

    /// Stable in-place sort; equal keys keep their incoming order
    pub fn sort(self, points: &mut [Point]) {
        points.sort_by(|a, b| self.compare(a, b));
    }
}

/// Numeric when both ids are numbers, lexicographic otherwise
fn compare_ids(a: &PointId, b: &PointId) -> Ordering {
    match (a.as_str().parse::<u64>(), b.as_str().parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

impl fmt::Display for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        SortType::ALL
            .into_iter()
            .find(|t| t.name() == normalized || t.label().to_lowercase() == normalized)
            .ok_or_else(|| format!("unknown sort '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::{DestinationId, EventType};
    use chrono::{DateTime, Duration, Utc};

    fn point(id: &str, from: &str, hours: i64, price: u32) -> Point {
        let date_from: DateTime<Utc> = from.parse().unwrap();
        Point {
            id: PointId::from(id),
            event_type: EventType::Flight,
            destination_id: DestinationId::from("d"),
            date_from,
            date_to: date_from + Duration::hours(hours),
            base_price: price,
            offers: vec![],
            is_favorite: false,
        }
    }

    fn ids(points: &[Point]) -> Vec<&str> {
        points.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_price_day_and_time_orders() {
        let p1 = point("P1", "2025-01-01T10:00:00Z", 1, 100);
        let p2 = point("P2", "2025-01-02T10:00:00Z", 1, 50);

        let mut by_price = vec![p2.clone(), p1.clone()];
        SortType::Price.sort(&mut by_price);
        assert_eq!(ids(&by_price), vec!["P1", "P2"]);

        let mut by_day = vec![p2.clone(), p1.clone()];
        SortType::Day.sort(&mut by_day);
        assert_eq!(ids(&by_day), vec!["P1", "P2"]);

        // Equal durations keep the incoming order, whatever it is
        let mut by_time = vec![p2.clone(), p1.clone()];
        SortType::Time.sort(&mut by_time);
        assert_eq!(ids(&by_time), vec!["P2", "P1"]);
        let mut again = vec![p2, p1];
        SortType::Time.sort(&mut again);
        assert_eq!(ids(&by_time), ids(&again));
    }

    #[test]
    fn test_day_ties_break_on_id() {
        let mut points = vec![
            point("10", "2025-01-01T10:00:00Z", 1, 1),
            point("9", "2025-01-01T10:00:00Z", 1, 1),
            point("b", "2025-01-01T09:00:00Z", 1, 1),
            point("a", "2025-01-01T09:00:00Z", 1, 1),
        ];

        SortType::Day.sort(&mut points);
        assert_eq!(ids(&points), vec!["a", "b", "9", "10"]);
    }

    #[test]
    fn test_price_ties_keep_stored_order_not_id_order() {
        let mut points = vec![
            point("b", "2025-01-01T10:00:00Z", 1, 40),
            point("a", "2025-01-02T10:00:00Z", 1, 40),
            point("c", "2025-01-03T10:00:00Z", 1, 90),
        ];

        SortType::Price.sort(&mut points);
        assert_eq!(ids(&points), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_time_sorts_longest_first() {
        let mut points = vec![
            point("short", "2025-01-01T10:00:00Z", 1, 1),
            point("long", "2025-01-05T10:00:00Z", 30, 1),
        ];

        SortType::Time.sort(&mut points);
        assert_eq!(ids(&points), vec!["long", "short"]);
    }

    #[test]
    fn test_only_three_options_are_enabled() {
        let enabled: Vec<_> = SortType::ALL.into_iter().filter(|s| s.is_enabled()).collect();
        assert_eq!(enabled, vec![SortType::Day, SortType::Time, SortType::Price]);
    }
}
